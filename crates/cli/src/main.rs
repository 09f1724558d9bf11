use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod completion;
mod execute;
mod validate;

use commands::Commands;
use flowenv_core::constants::FLOWENV_LOG_VAR;

#[derive(Parser)]
#[command(name = "flowenv")]
#[command(about = "Workflow runner with sealed secrets in the environment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    cli.command.execute().await?;
    Ok(())
}

/// Diagnostics go to stderr so stdout stays clean for tokens and paths.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(FLOWENV_LOG_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
