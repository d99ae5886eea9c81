//! SLPA CLI: transcription checking, reliability analysis and handshape export.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use commands::OutputFormat;
use manifest::SlpaManifest;

#[derive(Parser)]
#[command(name = "slpa", version, about = "Sign Language Phonetic Annotation tools")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new annotation project
    Init {
        /// Project name
        name: String,
    },
    /// List the transcription slots
    Slots {
        /// Show a single slot (1-34)
        #[arg(long)]
        slot: Option<usize>,
    },
    /// Parse a transcription code and report constraint violations
    Check {
        /// Bracketed code, e.g. "[V]1[O=EH]2..."
        code: String,
        /// Accept symbols outside the slot alphabets
        #[arg(long)]
        unrestricted: bool,
    },
    /// Compare one word between two annotator sheets
    Reliability {
        /// First annotator's sheet (CSV)
        first: PathBuf,
        /// Second annotator's sheet (CSV)
        second: PathBuf,
        /// Word to compare (case-insensitive)
        #[arg(long)]
        word: String,
        /// Configuration/hand: 1 = config1hand1 ... 4 = config2hand2
        #[arg(long, default_value_t = 1)]
        config: usize,
        /// Section 1-19, or 20 for every section
        #[arg(long, default_value_t = 20)]
        section: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compare every annotator sheet against a base sheet
    Batch {
        /// Base annotator's sheet
        base: PathBuf,
        /// Sheets to compare against the base
        #[arg(required = true)]
        others: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert a handshape code to joint rotations
    Handcode {
        /// A bracketed code, a handCode.txt file, or a directory containing one
        input: String,
        /// Hand side: L or R
        #[arg(long, default_value = "L")]
        hand: String,
        /// Hand colour as three channels in 0..1
        #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
        color: Option<Vec<f32>>,
        /// Print the renderer request instead of the pose
        #[arg(long)]
        request: bool,
        /// Also write handCode.txt into this directory
        #[arg(long)]
        write_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export a corpus as CSV
    Export {
        /// Corpus file (defaults to the manifest's corpus)
        corpus: Option<PathBuf>,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Find signs whose transcriptions match a query code
    Search {
        /// Bracketed query code; blank slots match anything
        #[arg(long)]
        code: String,
        /// Configuration/hand to search (1-4); all four when omitted
        #[arg(long)]
        config: Option<usize>,
        /// Corpus file (defaults to the manifest's corpus)
        corpus: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Slots { slot } => commands::slots::run(slot),

        Commands::Check { code, unrestricted } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            commands::check::run(&manifest, &code, unrestricted)
        }

        Commands::Reliability {
            first,
            second,
            word,
            config,
            section,
            format,
        } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            commands::reliability::run(
                &manifest, &first, &second, &word, config, section, format,
            )
        }

        Commands::Batch {
            base,
            others,
            format,
            output,
        } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            commands::batch::run(&manifest, &base, &others, format, output.as_deref())
        }

        Commands::Handcode {
            input,
            hand,
            color,
            request,
            write_dir,
            format,
        } => commands::handcode::run(
            &input,
            &hand,
            color.as_deref(),
            request,
            write_dir.as_deref(),
            format,
        ),

        Commands::Export { corpus, output } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let corpus = resolve_corpus(corpus, &manifest, project_dir.as_deref())?;
            commands::export::run(&manifest, &corpus, output.as_deref())
        }

        Commands::Search {
            code,
            config,
            corpus,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let corpus = resolve_corpus(corpus, &manifest, project_dir.as_deref())?;
            commands::search::run(&manifest, &corpus, &code, config)
        }
    }
}

/// Load `slpa.toml` if one exists above `cwd`, falling back to defaults.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(SlpaManifest, Option<PathBuf>)> {
    match SlpaManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => {
            tracing::debug!(dir = %dir.display(), "using project manifest");
            Ok((manifest, Some(dir)))
        }
        None => Ok((SlpaManifest::default(), None)),
    }
}

/// The corpus path given on the command line, or the manifest's.
fn resolve_corpus(
    explicit: Option<PathBuf>,
    manifest: &SlpaManifest,
    project_dir: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    match (&manifest.project.corpus, project_dir) {
        (Some(corpus), Some(dir)) => Ok(dir.join(corpus)),
        _ => anyhow::bail!("no corpus given and no [project] corpus in slpa.toml"),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use slpa_core::{Corpus, HandConfig, Sign, TranscriptionOptions};

    /// init, then export and search against the project's corpus.
    #[test]
    fn init_export_search_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("workflow");
        commands::init::create_project(&project, "workflow").unwrap();

        let (manifest, found) = SlpaManifest::find_and_load(&project).unwrap().unwrap();
        let corpus_path = resolve_corpus(None, &manifest, Some(&found)).unwrap();
        assert!(corpus_path.is_file());

        let mut corpus = Corpus::load(&corpus_path).unwrap();
        let mut sign = Sign::new("HOUSE");
        sign.transcription_mut(HandConfig::Config1Hand2)
            .set_slot(2, "L", &TranscriptionOptions::default())
            .unwrap();
        corpus.insert(sign).unwrap();
        corpus.save(&corpus_path).unwrap();

        let csv = commands::export::render(&manifest, &corpus_path).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("HOUSE,,[_]1[L___]2"));

        let query = "[_]1[L___]2[__\u{2205}/______]3[1___]4[_2___]5[_3___]6[_4___]7";
        let hits = commands::search::find(&manifest, &corpus_path, query, None).unwrap();
        assert_eq!(hits, vec!["HOUSE".to_string()]);
        let hits = commands::search::find(&manifest, &corpus_path, query, Some(1)).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn corpus_must_be_resolvable() {
        let manifest = SlpaManifest::default();
        assert!(resolve_corpus(None, &manifest, None).is_err());
        let explicit = PathBuf::from("c.json");
        assert_eq!(
            resolve_corpus(Some(explicit.clone()), &manifest, None).unwrap(),
            explicit
        );
    }
}
