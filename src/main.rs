//! bufcheck - buffer backlog health check for log-forwarding pods

use anyhow::Result;
use bufcheck::cli::Cli;
use bufcheck::commands;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    setup_tracing(cli.verbose);

    // Handle color settings
    if cli.no_color {
        owo_colors::set_override(false);
    }

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    if let Err(e) = commands::run_check(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "bufcheck", &mut std::io::stdout());
}
