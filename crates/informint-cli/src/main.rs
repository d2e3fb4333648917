mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use informint_analytics::AnalyticsEngine;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "informint-cli")]
#[command(about = "Engagement analytics over scraped Instagram posts")]
struct Cli {
    /// YAML file overriding the engagement benchmark table
    #[arg(long, global = true, env = "INFORMINT_BENCHMARKS_PATH")]
    benchmarks: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the full batch report as JSON
    Analyze {
        /// JSON file with an array of posts (or `{"data": [...]}`)
        file: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print per-post engagement and reach
    Engagement {
        file: PathBuf,
    },
    /// Print creators ranked by average performance score
    Creators {
        file: PathBuf,
    },
    /// Export analyzed posts as CSV
    Export {
        file: PathBuf,
        /// Write to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the benchmark tables in force
    Benchmarks,
}

fn build_engine(benchmarks: Option<&std::path::Path>) -> anyhow::Result<AnalyticsEngine> {
    let benchmarks = match benchmarks {
        Some(path) => informint_core::load_benchmarks(path)?,
        None => informint_core::Benchmarks::default(),
    };
    Ok(AnalyticsEngine::new(benchmarks))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("informint-cli ready; run with --help to list commands");
        return Ok(());
    };

    let engine = build_engine(cli.benchmarks.as_deref())?;
    match command {
        Commands::Analyze { file, pretty } => report::run_analyze(&engine, &file, pretty),
        Commands::Engagement { file } => report::run_engagement(&engine, &file),
        Commands::Creators { file } => report::run_creators(&engine, &file),
        Commands::Export { file, out } => report::run_export(&engine, &file, out.as_deref()),
        Commands::Benchmarks => report::run_benchmarks(&engine),
    }
}
