//! `slpa init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use slpa_core::Corpus;

use crate::manifest::{SlpaManifest, MANIFEST_FILE};

/// Create a new project in the directory `name`, relative to cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("sheets")).context("creating sheets/ directory")?;

    fs::write(project_dir.join(MANIFEST_FILE), SlpaManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    Corpus::new()
        .save(&project_dir.join("corpus.json"))
        .context("writing corpus.json")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/corpus.json");
    println!("  {name}/sheets/");

    Ok(())
}
