//! Streaming CSV record reader
//!
//! Rows are read one at a time as raw bytes and decoded field by field, so
//! non-UTF-8 inputs (CP932 exports from Japanese business systems, Latin-1
//! spreadsheets) stream the same way UTF-8 files do.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use encoding_rs::Encoding;
use qr_batch_types::{Error, Record, Result};

/// Header-driven reader yielding one [`Record`] per data row
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Arc<[String]>,
    encoding: &'static Encoding,
    raw: csv::ByteRecord,
}

impl RecordReader<File> {
    /// Open a CSV file. The first line is taken as the header row.
    ///
    /// `encoding` is a WHATWG label such as `utf-8` or `shift_jis`.
    pub fn open<P: AsRef<Path>>(path: P, encoding: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_reader(file, encoding)
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(rdr: R, encoding: &str) -> Result<Self> {
        let encoding = lookup_encoding(encoding)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let raw_headers = reader.byte_headers()?.clone();
        let line = raw_headers.position().map(|p| p.line()).unwrap_or(1);
        let mut headers = decode_fields(&raw_headers, encoding, line)?;
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        Ok(Self {
            reader,
            headers: headers.into(),
            encoding,
            raw: csv::ByteRecord::new(),
        })
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.raw) {
            Ok(true) => {
                let line = self.raw.position().map(|p| p.line()).unwrap_or(0);
                let record = decode_fields(&self.raw, self.encoding, line)
                    .map(|values| Record::new(line, Arc::clone(&self.headers), values));
                Some(record)
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

fn decode_fields(
    raw: &csv::ByteRecord,
    encoding: &'static Encoding,
    line: u64,
) -> Result<Vec<String>> {
    raw.iter()
        .map(|field| {
            encoding
                .decode_without_bom_handling_and_without_replacement(field)
                .map(|s| s.into_owned())
                .ok_or_else(|| Error::Decode {
                    line,
                    encoding: encoding.name().to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reader(content: &[u8]) -> RecordReader<&[u8]> {
        RecordReader::from_reader(content, "utf-8").unwrap()
    }

    #[test]
    fn test_reads_header_and_rows() {
        let mut rdr = reader(b"cedula,nombre\n1001,Alice\n1002,Bob\n");

        let first = rdr.next().unwrap().unwrap();
        assert_eq!(first.get("cedula").unwrap(), "1001");
        assert_eq!(first.line(), 2);

        let second = rdr.next().unwrap().unwrap();
        assert_eq!(second.get("nombre").unwrap(), "Bob");
        assert_eq!(second.line(), 3);

        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_short_row_is_not_a_csv_error() {
        let mut rdr = reader(b"cedula,nombre\n1001\n");
        let record = rdr.next().unwrap().unwrap();
        assert_eq!(record.get("cedula").unwrap(), "1001");
        assert!(matches!(
            record.get("nombre"),
            Err(Error::MissingValue { .. })
        ));
    }

    #[test]
    fn test_strips_utf8_bom_from_header() {
        let mut rdr = reader(b"\xef\xbb\xbfcedula,nombre\n1001,Alice\n");
        let record = rdr.next().unwrap().unwrap();
        assert_eq!(record.get("cedula").unwrap(), "1001");
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let mut rdr = reader(b"cedula,nombre\n");
        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_shift_jis_input() {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("番号,氏名\n1001,山田\n");
        let mut rdr = RecordReader::from_reader(&encoded[..], "shift_jis").unwrap();

        let record = rdr.next().unwrap().unwrap();
        assert_eq!(record.get("番号").unwrap(), "1001");
        assert_eq!(record.get("氏名").unwrap(), "山田");
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let mut rdr = reader(b"cedula,nombre\n1001,\xff\xfe\n");
        assert!(matches!(rdr.next(), Some(Err(Error::Decode { line: 2, .. }))));
    }

    #[test]
    fn test_unknown_encoding() {
        let result = RecordReader::from_reader(&b"a,b\n"[..], "no-such-encoding");
        assert!(matches!(result, Err(Error::UnknownEncoding(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        match RecordReader::open(&path, "utf-8") {
            Err(Error::SourceNotFound(p)) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected SourceNotFound"),
        }
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cedula,nombre").unwrap();
        writeln!(file, "1001,Alice").unwrap();
        file.flush().unwrap();

        let records: Vec<_> = RecordReader::open(file.path(), "utf-8")
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
