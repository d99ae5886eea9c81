//! `slpa batch`: every annotator against a base sheet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use slpa_reliability::{compare_many, read_sheet, AnnotatorSheet, BatchReport};

use super::{emit, OutputFormat};
use crate::manifest::SlpaManifest;

#[derive(Serialize)]
struct AnnotatorReport<'a> {
    annotator: &'a str,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// Annotator name from a sheet path: its file stem.
fn annotator_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn render(
    manifest: &SlpaManifest,
    base: &Path,
    others: &[PathBuf],
    format: OutputFormat,
) -> Result<String> {
    let base_sheet = read_sheet(base).context("reading base sheet")?;
    let sheets = others
        .iter()
        .map(|path| -> Result<(String, AnnotatorSheet)> {
            let sheet = read_sheet(path).with_context(|| format!("reading {}", path.display()))?;
            Ok((annotator_name(path), sheet))
        })
        .collect::<Result<Vec<_>>>()?;

    let results = compare_many(
        &base_sheet,
        sheets.iter().map(|(name, sheet)| (name.as_str(), sheet)),
        &manifest.reliability,
    );

    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (name, report) in &results {
                out.push_str(&format!("=== {} vs {name} ===\n\n{report}\n", annotator_name(base)));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let reports: Vec<AnnotatorReport> = results
                .iter()
                .map(|(annotator, report)| AnnotatorReport { annotator, report })
                .collect();
            Ok(serde_json::to_string_pretty(&reports)? + "\n")
        }
    }
}

pub fn run(
    manifest: &SlpaManifest,
    base: &Path,
    others: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    emit(&render(manifest, base, others, format)?, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(dir: &Path, name: &str, words: &[&str]) -> PathBuf {
        let mut text = String::from("header\n");
        for word in words {
            let mut cells = vec![word.to_string()];
            cells.resize(5 + 151, String::new());
            text.push_str(&cells.join(","));
            text.push('\n');
        }
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn names_annotators_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let base = sheet(dir.path(), "alice.csv", &["HOUSE", "CAT"]);
        let bob = sheet(dir.path(), "bob.csv", &["HOUSE"]);
        let carol = sheet(dir.path(), "carol.csv", &["HOUSE", "DOG"]);
        let manifest = SlpaManifest::default();

        let others = [bob, carol];
        let text = render(&manifest, &base, &others, OutputFormat::Text).unwrap();
        assert!(text.contains("=== alice vs bob ==="));
        assert!(text.contains("=== alice vs carol ==="));

        let json = render(&manifest, &base, &others, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let reports = value.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["annotator"], "bob");
        assert_eq!(reports[0]["entries"].as_array().unwrap().len(), 4);
        assert_eq!(reports[0]["skipped"], serde_json::json!(["CAT"]));
        assert_eq!(reports[1]["skipped"], serde_json::json!(["CAT", "DOG"]));
    }

    #[test]
    fn unreadable_sheet_fails() {
        let dir = tempfile::tempdir().unwrap();
        let base = sheet(dir.path(), "alice.csv", &["HOUSE"]);
        let missing = dir.path().join("nobody.csv");
        assert!(render(&SlpaManifest::default(), &base, &[missing], OutputFormat::Text).is_err());
    }
}
