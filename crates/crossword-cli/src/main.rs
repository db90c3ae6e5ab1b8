mod cli;
mod commands;
mod error;
mod logging;
mod render;
mod stats;
mod theme;

use crate::cli::{Cli, Commands};
use crate::commands::Context;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error};

fn main() {
    if let Err(e) = run_app() {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    debug!("Parsed arguments: {:?}", &cli);

    let ctx = Context::new(cli.data_dir.clone());

    match &cli.command {
        Commands::New(args) => commands::new::run(&ctx, args),
        Commands::Show(args) => commands::show::show(&ctx, args),
        Commands::Fill(args) => commands::play::fill(&ctx, args),
        Commands::Clear(args) => commands::play::clear(&ctx, args),
        Commands::Reveal(args) => commands::play::reveal(&ctx, args),
        Commands::Status => commands::show::status(&ctx),
        Commands::Stats => commands::show::stats(&ctx),
    }
}
