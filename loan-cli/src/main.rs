use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{debug, warn};

use loan_cli::cli::{Cli, Command};
use loan_cli::config::AppConfig;
use loan_cli::{app, logging};

// ─── logging ─────────────────────────────────────────────────────────────────

/// Apply the `[logging]` section on top of the default subscriber.
///
/// * `RUST_LOG` wins over the configured level.
/// * A log file that cannot be opened is reported and skipped.
fn configure_logging(
    config: &AppConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    if !logging::env_filter_is_set() {
        logging::set_log_level(&config.logging.level)?;
    }
    if let Some(path) = &config.logging.file {
        if let Err(error) = logging::enable_file_logging(path) {
            warn!(%error, "file logging disabled");
        }
    }
    if quiet {
        logging::set_console_enabled(false)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let config = AppConfig::discover(cli.config.as_deref())?.apply(cli.overrides());
    configure_logging(&config, cli.quiet).context("invalid [logging] configuration")?;
    debug!(?config, "configuration resolved");

    let output = match cli.command {
        Command::Repayment {
            principal,
            rate,
            years,
        } => app::repayment_report(principal, rate, years)?,
        Command::Wizard(command) => {
            let mut session = app::open_session(&config).await?;
            app::run_wizard(&mut session, command, Local::now()).await?
        }
        Command::Applications(args) => {
            let records = app::load_applications(&args.file)?;
            app::applications_report(&records, &args)?
        }
        Command::Team(args) => {
            let members = app::load_team(&args.file)?;
            app::team_report(&members, &args)?
        }
    };

    println!("{output}");
    Ok(())
}
