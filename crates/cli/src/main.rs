use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config_file;
mod provider;

use commands::{rules::RulesArgs, scan::ScanArgs};

#[derive(Parser)]
#[command(name = "kansa")]
#[command(about = "Static scanner for security, performance, maintainability, and AI-generation signals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files or directories and report findings
    Scan(ScanArgs),

    /// List the built-in rule catalog
    Rules(RulesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args),
        Commands::Rules(args) => commands::rules::execute(args),
    }
}
