//! Error types for qr-batch

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Column '{field}' not found in input header (line {line})")]
    MissingField { field: String, line: u64 },

    #[error("Line {line} has no value for column '{field}'")]
    MissingValue { field: String, line: u64 },

    #[error("Identifier '{identifier}' cannot be used as a file name: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Line {line} could not be decoded as {encoding}")]
    Decode { line: u64, encoding: String },

    #[error("Image size out of range: {0}")]
    ImageSize(String),

    #[error("Unknown input encoding: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_names_path() {
        let err = Error::SourceNotFound(PathBuf::from("missing.csv"));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_qr_error_converts() {
        let err: Error = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, Error::Encode(_)));
    }
}
