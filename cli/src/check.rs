#![deny(missing_docs)]

//! # Check Command
//!
//! Loads a design document, validates it and prints every finding.
//!
//! 1. **Load**: `.json` files are read as JSON, anything else as YAML.
//! 2. **Attach**: back-references left out of the document are set to their
//!    owners, unless `--no-attach` asks to check them as written.
//! 3. **Validate**: media type defaults are applied, then the whole design is
//!    checked in one pass.
//! 4. **Report**: one `<context>: <message>` line per finding, or a JSON
//!    array of `{context, message}` objects.

use crate::error::CliResult;
use designval_core::{validate_api, ApiDefinition, AppError, AppResult, ValidationErrors};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output rendering shared by the commands.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// Pretty printed JSON.
    Json,
}

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Design document to validate (`.json`, otherwise YAML).
    pub file: PathBuf,

    /// Report format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text, env = "DESIGNVAL_FORMAT")]
    pub format: OutputFormat,

    /// Validate back-references exactly as written in the document.
    #[clap(long)]
    pub no_attach: bool,
}

/// Reads a design document, picking the decoder from the file extension.
pub fn load_design(path: &Path) -> AppResult<ApiDefinition> {
    let content = fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    tracing::debug!(path = %path.display(), json = is_json, "loading design");

    let api: ApiDefinition = if is_json {
        serde_json::from_str(&content)
            .map_err(|e| AppError::Parse(format!("{}: {}", path.display(), e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Parse(format!("{}: {}", path.display(), e)))?
    };
    Ok(api)
}

/// Executes the check and writes the report to `out`.
///
/// Returns the number of findings; zero means the design is valid.
pub fn execute(args: &CheckArgs, out: &mut impl Write) -> CliResult<usize> {
    let mut api = load_design(&args.file)?;
    if !args.no_attach {
        api.attach_parents();
    }

    let findings = match validate_api(&mut api) {
        Ok(()) => ValidationErrors::new(),
        Err(verr) => verr,
    };
    tracing::info!(
        path = %args.file.display(),
        findings = findings.len(),
        "design checked"
    );

    match args.format {
        OutputFormat::Text if findings.is_empty() => {
            writeln!(out, "{}: design is valid", args.file.display())?;
        }
        OutputFormat::Text => writeln!(out, "{}", findings)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &findings).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(findings.len())
}
