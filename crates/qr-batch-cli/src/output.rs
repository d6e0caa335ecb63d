//! Console output: per-record progress lines and the run summary

use indicatif::{ProgressBar, ProgressStyle};
use qr_batch_app::converter::{ConversionEvent, ConversionReporter};
use qr_batch_types::{ConversionSummary, OutputFormat, Result};

/// Prints converter events to the terminal while a spinner counts records
pub struct ConsoleReporter {
    pb: ProgressBar,
    show_records: bool,
}

impl ConsoleReporter {
    /// `show_records` controls the per-record success lines; diagnostics are
    /// always printed.
    pub fn new(show_records: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} records {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { pb, show_records }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    fn line(&self, message: String) {
        self.pb.suspend(|| println!("{}", message));
    }

    fn diagnostic(&self, message: String) {
        self.pb.suspend(|| eprintln!("{}", message));
    }
}

impl ConversionReporter for ConsoleReporter {
    fn report(&mut self, event: ConversionEvent) {
        match event {
            ConversionEvent::DirectoryCreated { path } => {
                if self.show_records {
                    self.line(format!("Directory '{}' created.", path.display()));
                }
            }
            ConversionEvent::RecordWritten {
                identifier,
                name,
                path,
                ..
            } => {
                self.pb.inc(1);
                self.pb.set_message(identifier.clone());
                if self.show_records {
                    self.line(format!(
                        "QR generated for ID: {} and name: {} -> {}",
                        identifier,
                        name,
                        path.display()
                    ));
                }
            }
            ConversionEvent::FieldMissing {
                line,
                field,
                aborting,
            } => {
                self.pb.inc(1);
                let action = if aborting { "stopping" } else { "skipping row" };
                self.diagnostic(format!(
                    "Error: column '{}' not found in the CSV file (line {}); check the configuration. {}.",
                    field, line, action
                ));
            }
            ConversionEvent::RecordFailed {
                line,
                identifier,
                reason,
            } => {
                self.pb.inc(1);
                match identifier {
                    Some(id) => self.diagnostic(format!(
                        "Error processing row with ID '{}' (line {}): {}",
                        id, line, reason
                    )),
                    None => self.diagnostic(format!(
                        "Error processing row at line {}: {}",
                        line, reason
                    )),
                }
            }
            ConversionEvent::Finished { .. } => self.finish(),
        }
    }
}

pub fn output_summary(output_format: OutputFormat, summary: &ConversionSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(summary)?;
        println!("{}", content);
        return Ok(());
    }

    println!();
    if let Some(abort) = &summary.aborted {
        println!(
            "--- Stopped at line {}: column '{}' missing. {} QR codes generated. ---",
            abort.line, abort.field, summary.written
        );
    } else {
        println!(
            "--- Process finished. {} QR codes generated. ---",
            summary.written
        );
    }

    if summary.skipped > 0 {
        println!("Skipped rows:  {}", summary.skipped);
    }

    Ok(())
}
