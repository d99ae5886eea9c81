//! CLI command implementations.

pub mod batch;
pub mod check;
pub mod export;
pub mod handcode;
pub mod init;
pub mod reliability;
pub mod search;
pub mod slots;

use std::path::Path;

use anyhow::{Context, Result};

/// Report format for commands with structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print to stdout, or write to `output` when given.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
