//! Brandforge - brand palettes and generated client configurations
//!
//! Command-line entry point: generate a themed client configuration,
//! preview a resolved palette, or merge generated copy into an existing
//! configuration document.

mod cli;

use brandforge_core::{error::Result, GeneratorConfig};
use clap::{Parser, Subcommand};
use cli::helpers::BusinessArgs;
use cli::palette::PaletteFormat;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "brandforge")]
#[command(about = "Brand palettes and AI-generated client website configurations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (TOML); BRANDFORGE_* environment variables override it
    #[arg(short, long, global = true, env = "BRANDFORGE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a client configuration, theme stylesheet and metadata
    Generate {
        #[command(flatten)]
        business: BusinessArgs,

        /// Skip the text generation service and use the placeholder configuration
        #[arg(long)]
        offline: bool,
    },

    /// Resolve and print the palette without generating anything
    Palette {
        #[command(flatten)]
        business: BusinessArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = PaletteFormat::Json)]
        format: PaletteFormat,
    },

    /// Merge a content JSON file into a configuration document
    Merge {
        /// Base configuration document (JavaScript)
        base: PathBuf,

        /// Content payload (JSON)
        content: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "brandforge={level},brandforge_core={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Brandforge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = GeneratorConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Generate { business, offline } => {
            cli::generate::handle(business, offline, config).await
        }
        Commands::Palette { business, format } => cli::palette::handle(business, format),
        Commands::Merge { base, content } => cli::merge::handle(&base, &content, &config.validator),
    }
}
