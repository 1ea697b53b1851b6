mod commands;
mod config;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{batch::BatchArgs, render::RenderArgs, types::TypesArgs, validate::ValidateArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formrender", about = "Render form schemas to HTML")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one schema with optional form data
    Render(RenderArgs),
    /// Render one schema against many data files in parallel
    Batch(BatchArgs),
    /// Validate form data against a schema and print the result as JSON
    Validate(ValidateArgs),
    /// List the field types the default registry can render
    Types(TypesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Batch(args) => args.run(),
        Commands::Validate(args) => args.run(),
        Commands::Types(args) => args.run(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
