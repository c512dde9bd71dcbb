//! Main entry point for the guardrails translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guardrails_translator::cli::commands::{self, Commands};
use guardrails_translator::TranslatorConfig;

/// Guardrails Translator - LLM translation with a profanity guardrail
#[derive(Parser, Debug)]
#[command(name = "guardrails-translator", version, about, long_about = None)]
struct Args {
    /// API key for Gemini (optional, defaults to GOOGLE_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use (default: gemini-1.5-pro)
    #[arg(long)]
    model: Option<String>,

    /// Configuration file (JSON, TOML or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = TranslatorConfig::load(args.config.as_deref())?;

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        config.api_key = api_key;
    }
    if let Some(model) = args.model {
        config.model = model;
    }

    // Execute command
    match args.command {
        Some(Commands::Translate { text, target_lang }) => {
            commands::handle_translate(config, text, target_lang).await?;
        }
        Some(Commands::Serve { host, port }) => {
            commands::handle_serve(config, host, port).await?;
        }
        Some(Commands::Check { text }) => {
            commands::handle_check(config, text).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
