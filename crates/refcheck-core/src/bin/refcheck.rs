//! refcheck CLI
//!
//! Runs the pipeline (or a single phase) and prints the result structures
//! as JSON. Human-readable report rendering lives downstream.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use refcheck_core::{run_pipeline, BibliographyProcessor, CitationExtractor};

#[derive(Parser)]
#[command(
    name = "refcheck",
    about = "Validate in-text citations against a bibliography"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract citations from document files
    Extract {
        /// Document files to scan
        documents: Vec<PathBuf>,
    },
    /// Parse and index a bibliography file
    Bibliography {
        /// Bibliography source file
        source: PathBuf,
    },
    /// Run the full pipeline: extract, process, cross-validate
    Validate {
        /// Bibliography source file
        #[arg(long)]
        bibliography: PathBuf,
        /// Document files to scan
        documents: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract { documents } => {
            let outcome = CitationExtractor::new().extract_from_files(&documents);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Bibliography { source } => {
            let outcome = BibliographyProcessor::new().load_from_file(&source)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Validate {
            bibliography,
            documents,
        } => {
            let run = run_pipeline(&documents, &bibliography)?;
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
    }
    Ok(())
}
