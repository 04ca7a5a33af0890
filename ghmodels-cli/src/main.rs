//! ghmodels CLI - text and vision prompts against GitHub Models
//!
//! ```bash
//! export GITHUB_TOKEN=<token>
//! ghmodels basic
//! ghmodels ask "What is the capital of France?"
//! ghmodels vision --image example.jpg --format jpeg --follow-up "Also, tell me a fun fact about Paris."
//! ```

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ghmodels::prelude::{Credential, ImageAsset, ImageDetail, ModelsClient};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, FileConfig};

/// Text and vision chat completions against GitHub Models
#[derive(Parser)]
#[command(name = "ghmodels")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "GHMODELS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Inference endpoint (overrides config)
    #[arg(long, env = "GHMODELS_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Model to use (overrides config)
    #[arg(short, long, env = "GHMODELS_MODEL", global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send "4+4=" with temperature 0.7
    Basic,

    /// Ask a plain text question
    Ask(AskArgs),

    /// Ask about a local image
    Vision(VisionArgs),
}

/// Arguments for the ask command
#[derive(Args)]
struct AskArgs {
    /// Question to send
    prompt: String,

    /// Sampling temperature, passed through unchecked
    #[arg(short, long)]
    temperature: Option<f64>,
}

/// Arguments for the vision command
#[derive(Args)]
struct VisionArgs {
    /// Image file to embed
    #[arg(short, long, default_value = "example.jpg")]
    image: PathBuf,

    /// Declared image format (defaults to the file extension)
    #[arg(short, long)]
    format: Option<String>,

    /// Question about the image
    #[arg(short, long, default_value = "What's in this image?")]
    prompt: String,

    /// Image detail level: low, high or auto
    #[arg(short, long, default_value = "low")]
    detail: ImageDetail,

    /// Plain-text question sent after the image message
    #[arg(long)]
    follow_up: Option<String>,
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Request failed.
    #[error(transparent)]
    Models(#[from] ghmodels::Error),
    /// Async runtime could not start.
    #[error("failed to create tokio runtime: {0}")]
    Runtime(std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::Runtime)
        .and_then(|rt| rt.block_on(run(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ghmodels={level},ghmodels_cli={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<(), CliError> {
    let credential = Credential::from_env()?;

    let file = match &cli.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let client = ModelsClient::new(config::resolve(file, cli.endpoint, cli.model), credential)?;
    tracing::debug!(endpoint = %client.config().endpoint, model = client.model(), "client ready");

    let text = match cli.command {
        Commands::Basic => client.ask("4+4=", Some(0.7)).await?,
        Commands::Ask(args) => client.ask(&args.prompt, args.temperature).await?,
        Commands::Vision(args) => cmd_vision(&client, args).await?,
    };

    println!("{text}");
    Ok(())
}

/// Describe a local image.
async fn cmd_vision(client: &ModelsClient, args: VisionArgs) -> ghmodels::Result<String> {
    let asset = match args.format {
        Some(format) => ImageAsset::new(args.image, format),
        None => ImageAsset::from_path(args.image),
    };

    client
        .ask_about_image(
            &args.prompt,
            &asset,
            args.detail,
            args.follow_up.as_deref(),
        )
        .await
}
