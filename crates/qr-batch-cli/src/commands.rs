//! Command handlers

use std::path::{Path, PathBuf};

use qr_batch_app::config::Config;
use qr_batch_app::converter::BatchConverter;
use qr_batch_types::{Error, ErrorCorrection, MissingFieldPolicy, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_summary, ConsoleReporter};

/// Overrides for a single `generate` run
#[derive(Debug, Default)]
struct GenerateOverrides {
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    id_field: Option<String>,
    name_field: Option<String>,
    encoding: Option<String>,
    error_correction: Option<ErrorCorrection>,
    scale: Option<u32>,
    border: Option<u32>,
    min_version: Option<u8>,
    no_fit: bool,
    on_missing_field: Option<MissingFieldPolicy>,
}

impl GenerateOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(id_field) = self.id_field {
            config.id_field = id_field;
        }
        if let Some(name_field) = self.name_field {
            config.name_field = name_field;
        }
        if let Some(encoding) = self.encoding {
            config.input_encoding = encoding;
        }
        if let Some(level) = self.error_correction {
            config.encoding.error_correction = level;
        }
        if let Some(scale) = self.scale {
            config.encoding.module_scale = scale;
        }
        if let Some(border) = self.border {
            config.encoding.border = border;
        }
        if let Some(min_version) = self.min_version {
            config.encoding.min_version = min_version;
        }
        if self.no_fit {
            config.encoding.auto_fit = false;
        }
        if let Some(policy) = self.on_missing_field {
            config.on_missing_field = policy;
        }
    }
}

/// Execute CLI command, returning the process exit code
pub fn execute(cli: Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            id_field,
            name_field,
            encoding,
            error_correction,
            scale,
            border,
            min_version,
            no_fit,
            on_missing_field,
        } => {
            let mut config = load_config(config_path)?;
            GenerateOverrides {
                input,
                output_dir,
                id_field,
                name_field,
                encoding,
                error_correction,
                scale,
                border,
                min_version,
                no_fit,
                on_missing_field,
            }
            .apply(&mut config);

            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_generate(config, output_format, cli.quiet)
        }

        Commands::Config {
            show,
            set_input,
            set_output_dir,
            set_id_field,
            set_name_field,
            set_encoding,
            set_on_missing_field,
            set_output,
            reset,
        } => {
            let mut updates = load_config(config_path)?;
            let mut modified = false;

            if let Some(input) = set_input {
                updates.input = input;
                modified = true;
            }
            if let Some(output_dir) = set_output_dir {
                updates.output_dir = output_dir;
                modified = true;
            }
            if let Some(id_field) = set_id_field {
                updates.id_field = id_field;
                modified = true;
            }
            if let Some(name_field) = set_name_field {
                updates.name_field = name_field;
                modified = true;
            }
            if let Some(encoding) = set_encoding {
                updates.input_encoding = encoding;
                modified = true;
            }
            if let Some(policy) = set_on_missing_field {
                updates.on_missing_field = policy;
                modified = true;
            }
            if let Some(output_format) = set_output {
                updates.output_format = output_format;
                modified = true;
            }

            cmd_config(config_path, updates, modified, show, reset)?;
            Ok(0)
        }
    }
}

/// Config from `--config`, or the default location when absent
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn save_config(config: &Config, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
}

fn cmd_generate(config: Config, output_format: OutputFormat, quiet: bool) -> Result<i32> {
    let converter = BatchConverter::new(config)?;
    let show_records = !quiet && output_format == OutputFormat::Table;
    let mut reporter = ConsoleReporter::new(show_records);

    match converter.run(&mut reporter) {
        Ok(summary) => {
            output_summary(output_format, &summary)?;
            Ok(if summary.is_complete() { 0 } else { 1 })
        }
        Err(Error::SourceNotFound(path)) => {
            reporter.finish();
            eprintln!("Error: the file '{}' was not found.", path.display());
            Ok(1)
        }
        Err(e) => {
            reporter.finish();
            eprintln!("An unexpected error occurred: {}", e);
            Ok(1)
        }
    }
}

fn cmd_config(
    config_path: Option<&Path>,
    updates: Config,
    modified: bool,
    show: bool,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        save_config(&config, config_path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    if modified {
        updates.validate()?;
        save_config(&updates, config_path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", updates);
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Config file:      {}", path.display());
    }

    Ok(())
}
