#![deny(missing_docs)]

//! # Kinds Command
//!
//! Lists the request-time error taxonomy so that client authors can key on
//! codes and titles.

use crate::check::OutputFormat;
use crate::error::CliResult;
use designval_core::ErrorKind;
use std::io::Write;

/// Arguments for the kinds command.
#[derive(clap::Args, Debug, Clone)]
pub struct KindsArgs {
    /// Listing format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Writes every kind with its code and title.
pub fn execute(args: &KindsArgs, out: &mut impl Write) -> CliResult<()> {
    match args.format {
        OutputFormat::Text => {
            for kind in ErrorKind::ALL {
                writeln!(out, "{:>2}  {:<22} {}", kind.code(), format!("{:?}", kind), kind)?;
            }
        }
        OutputFormat::Json => {
            let listing: Vec<serde_json::Value> = ErrorKind::ALL
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "code": kind.code(),
                        "name": format!("{:?}", kind),
                        "title": kind.title(),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &listing).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing() {
        let mut out = Vec::new();
        execute(&KindsArgs { format: OutputFormat::Text }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with(" 1  InvalidParamType"));
        assert!(lines[0].ends_with("invalid parameter value"));
        assert!(lines[9].starts_with("10  InvalidLength"));
    }

    #[test]
    fn test_json_listing() {
        let mut out = Vec::new();
        execute(&KindsArgs { format: OutputFormat::Json }, &mut out).unwrap();
        let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(listing.as_array().unwrap().len(), 10);
        assert_eq!(
            listing[5],
            serde_json::json!({
                "code": 6,
                "name": "MissingHeader",
                "title": "missing required HTTP header",
            })
        );
    }
}
