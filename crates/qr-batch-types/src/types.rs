//! Data types shared across the batch pipeline

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorCorrection, Result};

/// One parsed row of the input table
///
/// Values are looked up by header name. The header is shared between all
/// records produced by the same reader.
#[derive(Debug, Clone)]
pub struct Record {
    line: u64,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(line: u64, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            line,
            headers,
            values,
        }
    }

    /// 1-based line number of this row in the input file
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Look up a field by header name.
    ///
    /// A repeated header name resolves to its last occurrence.
    pub fn get(&self, field: &str) -> Result<&str> {
        let position = self
            .headers
            .iter()
            .rposition(|h| h == field)
            .ok_or_else(|| Error::MissingField {
                field: field.to_string(),
                line: self.line,
            })?;

        self.values
            .get(position)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingValue {
                field: field.to_string(),
                line: self.line,
            })
    }
}

/// Fixed parameters handed to the QR encoder and rasterizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingOptions {
    #[serde(default)]
    pub error_correction: ErrorCorrection,

    /// Smallest QR version (1-40) to use
    #[serde(default = "default_min_version")]
    pub min_version: u8,

    /// Pixels per module
    #[serde(default = "default_module_scale")]
    pub module_scale: u32,

    /// Quiet zone width in modules
    #[serde(default = "default_border")]
    pub border: u32,

    /// Grow the version until the payload fits
    #[serde(default = "default_true")]
    pub auto_fit: bool,

    #[serde(default = "default_foreground")]
    pub foreground: [u8; 3],

    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

fn default_min_version() -> u8 {
    1
}

fn default_module_scale() -> u32 {
    10
}

fn default_border() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

fn default_foreground() -> [u8; 3] {
    [0, 0, 0]
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::default(),
            min_version: default_min_version(),
            module_scale: default_module_scale(),
            border: default_border(),
            auto_fit: true,
            foreground: default_foreground(),
            background: default_background(),
        }
    }
}

/// A record that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub line: u64,
    /// Identifier if it could be read
    pub identifier: Option<String>,
    pub reason: String,
}

/// Why a run stopped before the end of the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abort {
    pub line: u64,
    pub field: String,
}

/// Outcome of one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Records read from the input, including skipped ones
    pub processed: usize,
    /// Artifacts written
    pub written: usize,
    pub skipped: usize,
    pub failures: Vec<RecordFailure>,
    pub aborted: Option<Abort>,
}

impl ConversionSummary {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}
