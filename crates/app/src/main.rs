//! Stitch CLI - Main Entry Point
//!
//! Parses the command line, loads client settings, authenticates and runs
//! one admin API command.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod common;
mod export;
mod find_app;
mod import;

use common::CommonArgs;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(name = "stitch")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the app with the given client app id as JSON.
    FindApp(find_app::FindAppArgs),
    /// Download an app's archive.
    Export(export::ExportArgs),
    /// Push an archive to an existing app.
    Import(import::ImportArgs),
    /// List the changes an import would make.
    Diff(import::DiffArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = cli.common.connect().await?;

    match cli.command {
        Commands::FindApp(args) => args.run(&client).await,
        Commands::Export(args) => args.run(&client).await,
        Commands::Import(args) => args.run(&client).await,
        Commands::Diff(args) => args.run(&client).await,
    }
}
