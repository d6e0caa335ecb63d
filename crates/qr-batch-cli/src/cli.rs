//! CLI definition using clap

use clap::{Parser, Subcommand};
use qr_batch_types::{ErrorCorrection, MissingFieldPolicy, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qr-batch")]
#[command(version)]
#[command(about = "Generate one QR code image per CSV row")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Only print the summary and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate QR code images from a CSV file
    Generate {
        /// CSV file to read
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Directory for the generated images
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Column encoded into each QR code and used as the file name
        #[arg(long)]
        id_field: Option<String>,

        /// Column shown next to the identifier in the report
        #[arg(long)]
        name_field: Option<String>,

        /// Input text encoding (utf-8, shift_jis, windows-1252, ...)
        #[arg(long)]
        encoding: Option<String>,

        /// Error correction level
        #[arg(long, short = 'e')]
        error_correction: Option<ErrorCorrection>,

        /// Pixels per QR module
        #[arg(long)]
        scale: Option<u32>,

        /// Quiet zone width in modules
        #[arg(long)]
        border: Option<u32>,

        /// Smallest QR version to use (1-40)
        #[arg(long)]
        min_version: Option<u8>,

        /// Use exactly the minimum version instead of growing to fit
        #[arg(long)]
        no_fit: bool,

        /// What to do when a required column is missing
        #[arg(long)]
        on_missing_field: Option<MissingFieldPolicy>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default input CSV
        #[arg(long)]
        set_input: Option<PathBuf>,

        /// Set default output directory
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Set identifier column
        #[arg(long)]
        set_id_field: Option<String>,

        /// Set display name column
        #[arg(long)]
        set_name_field: Option<String>,

        /// Set input text encoding
        #[arg(long)]
        set_encoding: Option<String>,

        /// Set missing column policy
        #[arg(long)]
        set_on_missing_field: Option<MissingFieldPolicy>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
