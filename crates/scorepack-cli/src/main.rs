//! # scorepack-cli
//!
//! CLI for inspecting and checking score packages.
//!
//! The binary loads a directory-layout score package with the standard
//! reader and either prints a document summary (`inspect`) or reflects the
//! load outcome in its exit status (`check`).

use anyhow::Context;
use clap::Parser;
use scorepack_container::{DirContainer, ImageStore, ScoreContainer};
use scorepack_model::MasterScore;
use scorepack_reader::{ReaderConfig, ScoreReader};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "scorepack")]
#[command(about = "Score package inspection tool")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Load a package and print a document summary
    Inspect {
        /// Package directory path
        package: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Load the document even when its version is unsupported
        #[arg(long)]
        ignore_version_error: bool,
    },

    /// Load a package and reflect the outcome in the exit status
    Check {
        /// Package directory path
        package: String,

        /// Load the document even when its version is unsupported
        #[arg(long)]
        ignore_version_error: bool,
    },
}

#[derive(Serialize)]
struct Summary {
    package: String,
    modified: Option<chrono::DateTime<chrono::Utc>>,
    version: i32,
    program_version: String,
    program_revision: String,
    excerpts: Vec<String>,
    images: Vec<String>,
    has_audio: bool,
    settings_migrations: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            package,
            json,
            ignore_version_error,
        } => inspect(&package, json, ignore_version_error),
        Commands::Check {
            package,
            ignore_version_error,
        } => check(&package, ignore_version_error),
    }
}

fn load_package(
    package: &str,
    ignore_version_error: bool,
) -> anyhow::Result<(DirContainer, MasterScore, scorepack_reader::LoadReport)> {
    let container =
        DirContainer::open(package).with_context(|| format!("opening package '{package}'"))?;
    let config = ReaderConfig {
        ignore_version_error,
        ..ReaderConfig::default()
    };
    let images = ImageStore::new();
    let mut master = MasterScore::new();
    let report = ScoreReader::new(config, &images).load(&mut master, &container);
    Ok((container, master, report))
}

fn inspect(package: &str, json: bool, ignore_version_error: bool) -> anyhow::Result<()> {
    let (container, master, report) = load_package(package, ignore_version_error)?;
    if let Err(e) = &report.outcome {
        anyhow::bail!("loading score document: {e}");
    }

    let summary = Summary {
        package: package.to_string(),
        modified: container.modified(),
        version: master.msc_version,
        program_version: master.program_version.clone(),
        program_revision: format!("{:x}", master.program_revision),
        excerpts: master.excerpts.iter().map(|e| e.name.clone()).collect(),
        images: container.image_file_names(),
        has_audio: master.audio.is_some(),
        settings_migrations: report.settings.migrations.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("package:          {}", summary.package);
        if let Some(modified) = summary.modified {
            println!("modified:         {modified}");
        }
        println!("format version:   {}", summary.version);
        println!(
            "program version:  {} (rev {})",
            summary.program_version, summary.program_revision
        );
        println!("excerpts:         {}", summary.excerpts.join(", "));
        println!("images:           {}", summary.images.len());
        println!("audio:            {}", if summary.has_audio { "yes" } else { "no" });
        println!("migrations:       {}", summary.settings_migrations);
    }
    Ok(())
}

fn check(package: &str, ignore_version_error: bool) -> anyhow::Result<()> {
    let (_, master, report) = load_package(package, ignore_version_error)?;
    match report.outcome {
        Ok(()) => {
            tracing::info!(
                package,
                version = master.msc_version,
                excerpts = master.excerpts.len(),
                "package is loadable"
            );
            println!("ok");
            Ok(())
        }
        Err(e) => {
            println!("failed: {e}");
            std::process::exit(1);
        }
    }
}
