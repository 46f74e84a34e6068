use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::builder;
use search_core::persist::{save_index, IndexPaths};
use search_core::source::DirSource;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the document search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a directory of plain-text documents
    Build {
        /// Input directory containing .txt documents
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build(&input, &output),
    }
}

fn build(input: &str, output: &str) -> Result<()> {
    let started = std::time::Instant::now();
    let source = DirSource::new(input);
    let index = builder::build_from_source(&source)?;
    let paths = IndexPaths::new(output);
    let snapshot = save_index(&paths, &index)?;
    tracing::info!(
        num_docs = index.num_docs,
        terms = index.num_terms(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        snapshot = %snapshot.display(),
        "index build complete"
    );
    Ok(())
}
