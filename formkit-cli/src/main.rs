//! formkit: edit form schema documents from the command line.
//!
//! Usage:
//!   formkit new
//!   formkit kinds
//!   formkit validate form.json
//!   formkit apply form.json intents.json
//!
//! `-` in place of the document path reads it from stdin.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use formkit_cli::{CliConfig, DEFAULT_CONFIG_FILE, apply_intents, render};
use formkit_model::{EditorIntent, FieldKind, FieldStamp, FormDocument};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "formkit")]
#[command(about = "Edit form schema documents")]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an empty document
    New,
    /// List the field kinds and their starting schemas
    Kinds,
    /// Check that a document satisfies every invariant
    Validate {
        document: PathBuf,
    },
    /// Apply a JSON array of intents to a document
    Apply {
        document: PathBuf,
        intents: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = CliConfig::load_from(&args.config)?;
    let config = loaded.config;

    let log_level = if args.verbose { Level::DEBUG } else { config.level() };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    loaded.source.log();

    match args.command {
        Command::New => {
            println!("{}", render(&FormDocument::new(), &config.output)?);
        }
        Command::Kinds => {
            for kind in FieldKind::ALL {
                let template = serde_json::to_string(&kind.template())?;
                let key = serde_json::to_string(&kind)?;
                println!("{:<14} {:<18} {}", key.trim_matches('"'), kind, template);
            }
        }
        Command::Validate { document } => {
            let document = load_document(&document)?;
            document.validate()?;
            info!("Document is valid ({} fields)", document.len());
        }
        Command::Apply { document, intents } => {
            let document = load_document(&document)?;
            let raw = std::fs::read_to_string(&intents)
                .with_context(|| format!("failed to read {}", intents.display()))?;
            let intents: Vec<EditorIntent> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse intents in {}", intents.display()))?;

            let mut clock = FieldStamp::now();
            let report = apply_intents(&document, &intents, &config.apply, &mut clock)?;
            if !report.skipped.is_empty() {
                info!(
                    "{} of {} intents skipped",
                    report.skipped.len(),
                    intents.len()
                );
            }
            println!("{}", render(&report.document, &config.output)?);
        }
    }
    Ok(())
}

fn load_document(path: &Path) -> Result<FormDocument> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    if raw.trim().is_empty() {
        bail!("document is empty");
    }
    let document = FormDocument::from_json(&raw)
        .with_context(|| format!("invalid document {}", path.display()))?;
    Ok(document)
}
