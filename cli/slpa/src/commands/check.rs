//! `slpa check`: parse a code and run the constraint checks.

use anyhow::{Context, Result};
use slpa_core::code;
use slpa_core::schema::Field;
use slpa_core::{check, EntryMode, Transcription};

use crate::manifest::SlpaManifest;

pub(crate) fn render(manifest: &SlpaManifest, raw: &str, unrestricted: bool) -> Result<String> {
    let mut options = manifest.transcription_options()?;
    if unrestricted {
        options.mode = EntryMode::Unrestricted;
    }
    let transcription = Transcription::parse(raw, &options).context("parsing transcription code")?;

    let canonical = transcription.to_code(&options)?;
    let bodies = code::split_fields(&canonical)?;

    let mut out = String::new();
    out.push_str(&format!("Code: {canonical}\n"));
    for (field, body) in Field::ALL.iter().zip(bodies) {
        out.push_str(&format!("  {:<22} {body}\n", field.name()));
    }
    if transcription.is_empty() {
        out.push_str("Transcription is empty\n");
    }

    let violations = check(&transcription, &manifest.constraints);
    if violations.is_empty() {
        out.push_str("No constraint violations.\n");
    } else {
        out.push_str(&format!("{} constraint violation(s):\n", violations.len()));
        for v in &violations {
            out.push_str(&format!("  {v}\n"));
        }
    }
    Ok(out)
}

pub fn run(manifest: &SlpaManifest, raw: &str, unrestricted: bool) -> Result<()> {
    print!("{}", render(manifest, raw, unrestricted)?);
    Ok(())
}
