//! QR Batch - generate one QR code PNG per CSV row
//!
//! Reads a CSV file and writes `<identifier>.png` for every record.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    match commands::execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
