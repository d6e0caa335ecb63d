//! CSV-to-QR batch conversion
//!
//! Records are streamed from the input in order. Each one yields a PNG named
//! after its identifier. Failures while encoding or writing one record skip
//! that record only. A required column missing from the header stops the
//! batch under [`MissingFieldPolicy::Abort`]; files already written stay on
//! disk and the summary counts only what came before.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use qr_batch_infra::{ensure_output_directory, QrRenderer, RecordReader};
use qr_batch_types::{
    Abort, ConversionSummary, Error, MissingFieldPolicy, RecordFailure, Result,
};

use crate::config::Config;
use crate::naming::artifact_path;

/// Progress notifications emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    DirectoryCreated {
        path: PathBuf,
    },
    RecordWritten {
        line: u64,
        identifier: String,
        name: String,
        path: PathBuf,
    },
    FieldMissing {
        line: u64,
        field: String,
        aborting: bool,
    },
    RecordFailed {
        line: u64,
        identifier: Option<String>,
        reason: String,
    },
    Finished {
        summary: ConversionSummary,
    },
}

/// Receives [`ConversionEvent`]s as the converter works through the input
pub trait ConversionReporter {
    fn report(&mut self, event: ConversionEvent);
}

/// Reporter that discards every event
#[derive(Debug, Default)]
pub struct SilentReporter;

impl ConversionReporter for SilentReporter {
    fn report(&mut self, _event: ConversionEvent) {}
}

impl ConversionReporter for Vec<ConversionEvent> {
    fn report(&mut self, event: ConversionEvent) {
        self.push(event);
    }
}

/// Batch converter bound to one configuration
pub struct BatchConverter {
    config: Config,
    renderer: QrRenderer,
}

impl BatchConverter {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let renderer = QrRenderer::new(config.encoding.clone());
        Ok(Self { config, renderer })
    }

    /// Convert every record of the input file.
    ///
    /// Returns `Err` only for whole-run failures: missing input, unreadable
    /// or undecodable CSV, output directory creation. A missing-column abort
    /// is reported through [`ConversionSummary::aborted`].
    pub fn run(&self, reporter: &mut dyn ConversionReporter) -> Result<ConversionSummary> {
        let records = RecordReader::open(&self.config.input, &self.config.input_encoding)?;

        let output_dir = &self.config.output_dir;
        if ensure_output_directory(output_dir)? {
            reporter.report(ConversionEvent::DirectoryCreated {
                path: output_dir.clone(),
            });
        }

        let mut summary = ConversionSummary {
            input: self.config.input.clone(),
            output_dir: output_dir.clone(),
            ..ConversionSummary::default()
        };

        for record in records {
            let record = record?;
            summary.processed += 1;

            let line = record.line();
            let identifier = match record.get(&self.config.id_field) {
                Ok(value) => value.trim(),
                Err(e) => match self.lookup_failed(e, line, None, &mut summary, reporter) {
                    ControlFlow::Break(()) => break,
                    ControlFlow::Continue(()) => continue,
                },
            };
            let name = match record.get(&self.config.name_field) {
                Ok(value) => value.trim(),
                Err(e) => {
                    match self.lookup_failed(e, line, Some(identifier), &mut summary, reporter) {
                        ControlFlow::Break(()) => break,
                        ControlFlow::Continue(()) => continue,
                    }
                }
            };

            match self.write_artifact(output_dir, identifier) {
                Ok(path) => {
                    summary.written += 1;
                    reporter.report(ConversionEvent::RecordWritten {
                        line,
                        identifier: identifier.to_string(),
                        name: name.to_string(),
                        path,
                    });
                }
                Err(e) => {
                    let reason = e.to_string();
                    reporter.report(ConversionEvent::RecordFailed {
                        line,
                        identifier: Some(identifier.to_string()),
                        reason: reason.clone(),
                    });
                    skip(&mut summary, line, Some(identifier.to_string()), reason);
                }
            }
        }

        reporter.report(ConversionEvent::Finished {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    /// Report a failed field lookup. `Break` when the batch must stop.
    fn lookup_failed(
        &self,
        error: Error,
        line: u64,
        identifier: Option<&str>,
        summary: &mut ConversionSummary,
        reporter: &mut dyn ConversionReporter,
    ) -> ControlFlow<()> {
        let identifier = identifier.map(str::to_string);
        let reason = match error {
            Error::MissingField { field, line } => {
                let aborting = self.config.on_missing_field == MissingFieldPolicy::Abort;
                reporter.report(ConversionEvent::FieldMissing {
                    line,
                    field: field.clone(),
                    aborting,
                });
                if aborting {
                    summary.aborted = Some(Abort { line, field });
                    return ControlFlow::Break(());
                }
                format!("column '{}' not found", field)
            }
            e => {
                let reason = e.to_string();
                reporter.report(ConversionEvent::RecordFailed {
                    line,
                    identifier: identifier.clone(),
                    reason: reason.clone(),
                });
                reason
            }
        };
        skip(summary, line, identifier, reason);
        ControlFlow::Continue(())
    }

    fn write_artifact(&self, output_dir: &Path, identifier: &str) -> Result<PathBuf> {
        let path = artifact_path(output_dir, identifier)?;
        self.renderer.render_to_file(identifier, &path)?;
        Ok(path)
    }
}

fn skip(summary: &mut ConversionSummary, line: u64, identifier: Option<String>, reason: String) {
    summary.skipped += 1;
    summary.failures.push(RecordFailure {
        line,
        identifier,
        reason,
    });
}
