//! kotae CLI
//!
//! Main entry point for the kotae command-line tool.
//! Answers questions from a Kendra index with a Bedrock model.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ConfigCommand};
use kotae_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// kotae - answer questions from your search index with an LLM
#[derive(Parser, Debug)]
#[command(name = "kotae")]
#[command(about = "Retrieval-augmented answers from Kendra and Bedrock", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./kotae.yaml if present)
    #[arg(short, long, global = true, env = "KOTAE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Search index id
    #[arg(short, long, global = true)]
    index_id: Option<String>,

    /// Generation model id
    #[arg(short, long, global = true)]
    model_id: Option<String>,

    /// Generation provider (bedrock, http)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Generation endpoint (http provider)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// AWS region
    #[arg(long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question
    Ask(AskCommand),

    /// Show the resolved configuration
    Config(ConfigCommand),
}

// One request at a time on a single thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from config file and environment
    let config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.index_id,
        cli.model_id,
        cli.provider,
        cli.endpoint,
        cli.region,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("kotae starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {:?}", config.model_id);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Config(_) => "config",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Config(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
