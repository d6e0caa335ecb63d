//! Core types for CSV-to-QR batch conversion

mod error;
mod types;

pub use error::*;
pub use types::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for the run summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// QR error correction level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    #[default]
    #[value(alias = "l")]
    Low,
    /// ~15% recovery
    #[value(alias = "m")]
    Medium,
    /// ~25% recovery
    #[value(alias = "q")]
    Quartile,
    /// ~30% recovery
    #[value(alias = "h")]
    High,
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCorrection::Low => write!(f, "low"),
            ErrorCorrection::Medium => write!(f, "medium"),
            ErrorCorrection::Quartile => write!(f, "quartile"),
            ErrorCorrection::High => write!(f, "high"),
        }
    }
}

/// What to do when a record lacks one of the required columns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Stop the whole batch at the first such record
    #[default]
    Abort,
    /// Skip the record and keep going
    Skip,
}

impl std::fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingFieldPolicy::Abort => write!(f, "abort"),
            MissingFieldPolicy::Skip => write!(f, "skip"),
        }
    }
}
