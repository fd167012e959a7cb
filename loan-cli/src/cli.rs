use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Home Online loan application tools.
///
/// Estimates repayments, walks a home-loan application through its wizard
/// steps with the draft saved between runs, and lists the admin dashboard's
/// applications and team.
#[derive(Debug, Parser)]
#[command(name = "home-online", version, about)]
pub struct Cli {
    /// TOML configuration file. Defaults to `home-online.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Draft storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `home-online.db`) or `sqlite::memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Key the wizard draft is saved under.
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Hide log output on stderr. File logging is unaffected.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            connection_string: self.db.clone(),
            session_key: self.session.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the monthly repayment for a loan.
    Repayment {
        /// Amount borrowed, in dollars.
        #[arg(long)]
        principal: f64,

        /// Annual interest rate as a percentage, e.g. 6.19.
        #[arg(long)]
        rate: f64,

        /// Loan term in years.
        #[arg(long)]
        years: f64,
    },

    /// Work on the saved loan application.
    #[command(subcommand)]
    Wizard(WizardCommand),

    /// List applications from a CSV export.
    Applications(ApplicationsArgs),

    /// List team members from a CSV export.
    Team(TeamArgs),
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum WizardCommand {
    /// Show the current step and its fields.
    Show,

    /// Set a field on the draft, e.g. `set loan_amount 650000`.
    Set { field: String, value: String },

    /// Continue to the next step if the current one is complete.
    Next,

    /// Go back one step.
    Back,

    /// Go to a step by number (1-based). Only earlier or completed steps.
    Jump { step: usize },

    /// Discard the draft and start again.
    Reset,

    /// Lodge the application.
    Submit {
        /// Application reference. Generated from the current time if omitted.
        #[arg(long)]
        reference: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort column.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = loan_core::admin::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ApplicationsArgs {
    /// Applications CSV file.
    #[arg(long)]
    pub file: PathBuf,

    /// Only applications with this status code, e.g. `under_review`.
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, Clone, Args)]
pub struct TeamArgs {
    /// Team CSV file.
    #[arg(long)]
    pub file: PathBuf,

    /// Only members with this role code, e.g. `broker`.
    #[arg(long)]
    pub role: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_wizard_set_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "home-online",
            "wizard",
            "set",
            "loan_amount",
            "650000",
            "--backend",
            "memory",
        ])
        .unwrap();

        assert_eq!(cli.backend.as_deref(), Some("memory"));
        match cli.command {
            Command::Wizard(command) => assert_eq!(
                command,
                WizardCommand::Set {
                    field: "loan_amount".to_string(),
                    value: "650000".to_string(),
                }
            ),
            other => panic!("expected wizard command, got {other:?}"),
        }
    }

    #[test]
    fn parses_applications_listing() {
        let cli = Cli::try_parse_from([
            "home-online",
            "applications",
            "--file",
            "apps.csv",
            "--status",
            "submitted",
            "--sort",
            "loan_amount",
            "--desc",
            "--page",
            "2",
        ])
        .unwrap();

        match cli.command {
            Command::Applications(args) => {
                assert_eq!(args.status.as_deref(), Some("submitted"));
                assert!(args.list.desc);
                assert_eq!(args.list.page, 2);
                assert_eq!(args.list.page_size, loan_core::admin::DEFAULT_PAGE_SIZE);
            }
            other => panic!("expected applications command, got {other:?}"),
        }
    }

    #[test]
    fn repayment_requires_all_three_values() {
        assert!(Cli::try_parse_from(["home-online", "repayment", "--principal", "1"]).is_err());
    }

    #[test]
    fn overrides_collect_store_flags() {
        let cli = Cli::try_parse_from(["home-online", "--db", "x.db", "wizard", "show"]).unwrap();

        assert_eq!(cli.overrides().connection_string.as_deref(), Some("x.db"));
        assert_eq!(cli.overrides().backend, None);
    }
}
