//! iconkit CLI
//!
//! Developer tool for generating and bundling icon component packages.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// iconkit - React icon package generator
#[derive(Parser)]
#[command(name = "iconkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "iconkit.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default iconkit.yaml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Generate component sources without bundling
    Generate {
        /// Icon metadata file (.json, .yaml or .yml)
        #[arg(short, long)]
        metadata: String,

        /// Directory to write sources to
        #[arg(short, long, default_value = "src")]
        output: String,
    },

    /// Generate components and bundle them into es/, lib/ and umd/
    Build {
        /// Icon metadata file (.json, .yaml or .yml)
        #[arg(short, long)]
        metadata: String,

        /// Package output directory
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Run the three bundle passes concurrently
        #[arg(long)]
        concurrent: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Init { path } => {
            commands::init::run(&path).await?;
        }
        Commands::Generate { metadata, output } => {
            commands::generate::run(&cli.config, &metadata, &output).await?;
        }
        Commands::Build {
            metadata,
            output,
            concurrent,
        } => {
            commands::build::run(&cli.config, &metadata, &output, concurrent).await?;
        }
    }

    Ok(())
}
