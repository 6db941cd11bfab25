mod shell;

use clap::Parser;
use plan_core::{Config, Result};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trainingsplan")]
#[command(about = "Interactive workout plan tracker", long_about = None)]
struct Cli {
    /// Override config file location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    // Initialize logging
    plan_core::logging::init_with_level(&config.logging.level);
    tracing::debug!("Starting shell with {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = shell::Shell::new(config, stdin.lock(), stdout.lock())?;
    shell.run()
}
