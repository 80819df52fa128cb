mod error;
mod index;
mod model;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use model::NGramModel;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ngq")]
#[command(about = "Query precomputed n-gram frequency indexes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up how often a token sequence occurs in the corpus
    Count {
        /// Top index directory (contains 1grams/, 2grams/, ...)
        dir: PathBuf,

        /// 1 to 4 tokens, in order
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Print the total token count of the corpus
    Total {
        /// Top index directory
        dir: PathBuf,
    },
    /// Show the bound indexes and their document counts
    Info {
        /// Top index directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Count { dir, tokens } => {
            let model = open_model(&dir)?;
            println!("{}", model.count(&tokens)?);
        }
        Commands::Total { dir } => {
            let model = open_model(&dir)?;
            println!("{}", model.total_token_count()?);
        }
        Commands::Info { dir } => {
            let model = open_model(&dir)?;
            println!("top directory: {}", model.top_dir().display());
            for (size, handle) in model.handles() {
                println!(
                    "  {}grams: {} documents ({})",
                    size,
                    handle.num_docs(),
                    handle.dir().display()
                );
            }
            match model.total_token_count() {
                Ok(total) => println!("  total token count: {total}"),
                Err(e) => eprintln!("ngq: total token count unavailable: {e}"),
            }
        }
    }

    Ok(())
}

fn open_model(dir: &Path) -> Result<NGramModel> {
    NGramModel::open(dir)
        .with_context(|| format!("failed to open n-gram index at {}", dir.display()))
}
