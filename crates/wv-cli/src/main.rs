use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wv_cli::commands::{check, week};
use wv_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Week {
            date,
            offset,
            timezone,
            events,
            json,
        } => {
            let args = week::WeekArgs {
                date: date.as_deref(),
                offset: *offset,
                timezone: timezone.as_deref(),
                events: events.as_deref(),
                json: *json,
            };
            week::run(&mut stdout, &config, &args, chrono::Utc::now())?;
        }
        Commands::Check { events } => {
            check::run(&mut stdout, &config, events.as_deref())?;
        }
    }

    Ok(())
}
