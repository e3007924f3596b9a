mod pipeline;
mod promo;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Find and track small-business outreach leads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the place provider and print qualified leads.
    Search {
        /// Free-text query, e.g. "restaurants in colombo".
        query: String,

        /// Save a specific qualified lead to the pipeline by place id.
        /// May be repeated.
        #[arg(long = "save", value_name = "PLACE_ID")]
        save: Vec<String>,

        /// Save every qualified lead to the pipeline.
        #[arg(long, conflicts_with = "save")]
        save_all: bool,
    },
    /// Manage the saved lead pipeline.
    Pipeline {
        #[command(subcommand)]
        command: pipeline::PipelineCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Search {
            query,
            save,
            save_all,
        } => search::run(&config, &query, &save, save_all).await,
        Commands::Pipeline { command } => pipeline::run(&config, command).await,
    }
}
