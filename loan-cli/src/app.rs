//! Command handlers. Each returns the text to print so the binary stays a
//! thin shell around them.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use loan_core::admin::{ApplicationSortKey, ListQuery, Page, SortSpec, TeamSortKey, query};
use loan_core::calculations::{RepaymentInput, summarize};
use loan_core::models::{ApplicationRecord, ApplicationStatus, Choice, Field, TeamMember, TeamRole};
use loan_core::store::{FormStore, InMemoryStoreFactory, StoreRegistry};
use loan_core::wizard::{SessionError, Wizard, WizardSession};
use loan_data::{ApplicationLoader, TeamLoader};
use loan_store_sqlite::SqliteStoreFactory;
use tracing::{debug, info};

use crate::cli::{ApplicationsArgs, ListArgs, TeamArgs, WizardCommand};
use crate::config::AppConfig;
use crate::utils::{format_currency, format_currency_f64, opt_display};

/// Every backend this binary can open drafts in.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(InMemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn FormStore>> {
    let store_config = config.store_config();
    let store = build_registry()
        .create(&store_config)
        .await
        .with_context(|| format!("failed to open '{}' store", store_config.backend))?;
    Ok(Arc::from(store))
}

pub async fn open_session(config: &AppConfig) -> Result<WizardSession> {
    let store = open_store(config).await?;
    WizardSession::open(Wizard::home_loan(), store, config.wizard.session_key.as_str())
        .await
        .context("failed to open wizard session")
}

// ─── repayment ───────────────────────────────────────────────────────────────

pub fn repayment_report(
    principal: f64,
    rate: f64,
    years: f64,
) -> Result<String> {
    let input = RepaymentInput::new(principal, rate, years)?;
    let summary = summarize(&input);

    let mut out = String::new();
    writeln!(out, "Loan amount:      {}", format_currency_f64(input.principal()))?;
    writeln!(out, "Interest rate:    {}% p.a.", input.annual_rate_percent())?;
    writeln!(
        out,
        "Term:             {} years ({} repayments)",
        input.term_years(),
        input.payment_count()
    )?;
    writeln!(out, "Monthly payment:  {}", format_currency_f64(summary.monthly_payment))?;
    writeln!(out, "Total repayments: {}", format_currency_f64(summary.total_repayment))?;
    write!(out, "Total interest:   {}", format_currency_f64(summary.total_interest))?;
    Ok(out)
}

// ─── wizard ──────────────────────────────────────────────────────────────────

/// Reference for an application lodged at `now`, e.g. `HO-20261018-093012`.
pub fn submission_reference(now: DateTime<Local>) -> String {
    format!("HO-{}", now.format("%Y%m%d-%H%M%S"))
}

pub async fn run_wizard(
    session: &mut WizardSession,
    command: WizardCommand,
    now: DateTime<Local>,
) -> Result<String> {
    debug!(?command, key = session.key(), "wizard command");

    match command {
        WizardCommand::Show => Ok(render_session(session)),
        WizardCommand::Set { field, value } => {
            let field = Field::lookup(&field)?;
            session.set_field(field, &value).await?;
            Ok(format!(
                "{} set to '{}'",
                field.label(),
                session.form().value(field)
            ))
        }
        WizardCommand::Next => {
            let navigation = session.advance().await?;
            if navigation.rejected {
                let mut out = format!(
                    "Step {} is not complete. Still needed:",
                    navigation.step + 1
                );
                for field in &navigation.missing {
                    write!(out, "\n  {} ({})", field.as_str(), field.label())?;
                }
                Ok(out)
            } else {
                Ok(render_session(session))
            }
        }
        WizardCommand::Back => {
            session.back().await?;
            Ok(render_session(session))
        }
        WizardCommand::Jump { step } => {
            if step == 0 {
                bail!("steps are numbered from 1");
            }
            let navigation = session.jump(step - 1).await?;
            if navigation.rejected {
                Ok(format!(
                    "Cannot jump to step {step}; stayed on step {}",
                    navigation.step + 1
                ))
            } else {
                Ok(render_session(session))
            }
        }
        WizardCommand::Reset => {
            session.reset().await?;
            Ok("Draft discarded.".to_string())
        }
        WizardCommand::Submit { reference } => {
            let reference = reference.unwrap_or_else(|| submission_reference(now));
            match session.submit(reference, now.date_naive()).await {
                Ok(record) => {
                    info!(reference = %record.reference, "application lodged");
                    Ok(render_submission(&record))
                }
                Err(SessionError::Incomplete { step, name, missing }) => {
                    let keys: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
                    Ok(format!(
                        "Cannot submit: step {} ({name}) is missing {}",
                        step + 1,
                        keys.join(", ")
                    ))
                }
                Err(error) => Err(error.into()),
            }
        }
    }
}

pub fn render_session(session: &WizardSession) -> String {
    let wizard = session.wizard();
    let step = session.current_step();
    let missing = session.missing_fields();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Step {} of {}: {}",
        step.index() + 1,
        wizard.len(),
        step.name()
    );
    for field in step.fields() {
        let marker = if missing.contains(field) {
            "!"
        } else if step.is_required(*field) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            " {marker} {:<24} {}",
            field.as_str(),
            opt_display(Some(session.form().value(*field)))
        );
    }

    let completed: Vec<String> = session
        .progress()
        .completed_steps
        .iter()
        .map(|index| (index + 1).to_string())
        .collect();
    let _ = write!(out, "Completed steps: {}", opt_display(Some(completed.join(", "))));

    if let Some(estimate) = session.repayment_estimate() {
        let _ = write!(
            out,
            "\nEstimated repayment: {} per month",
            format_currency_f64(estimate.monthly_payment)
        );
    }
    out
}

fn render_submission(record: &ApplicationRecord) -> String {
    format!(
        "Application {} lodged on {} for {}\nLoan amount: {}\nStatus: {}",
        record.reference,
        record.lodged_on,
        record.applicant_name,
        format_currency(record.loan_amount),
        record.status
    )
}

// ─── admin listings ──────────────────────────────────────────────────────────

fn parse_code<T: Choice>(
    what: &str,
    code: &str,
) -> Result<T> {
    T::from_code(code.trim())
        .with_context(|| format!("unknown {what} '{code}'; expected one of: {}", T::option_list()))
}

fn list_query<F, K: Choice>(
    list: &ListArgs,
    filter: Option<F>,
) -> Result<ListQuery<F, K>> {
    let sort = match &list.sort {
        Some(code) => {
            let key = parse_code::<K>("sort column", code)?;
            Some(if list.desc {
                SortSpec::descending(key)
            } else {
                SortSpec::ascending(key)
            })
        }
        None => None,
    };

    Ok(ListQuery {
        search: list.search.clone().unwrap_or_default(),
        filter,
        sort,
        page: list.page,
        page_size: list.page_size,
    })
}

fn page_footer<T>(page: &Page<'_, T>) -> String {
    format!(
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, page.total_items
    )
}

pub fn applications_report(
    records: &[ApplicationRecord],
    args: &ApplicationsArgs,
) -> Result<String> {
    let status = args
        .status
        .as_deref()
        .map(|code| parse_code::<ApplicationStatus>("status", code))
        .transpose()?;
    let list_query = list_query::<_, ApplicationSortKey>(&args.list, status)?;
    let page = query(records, &list_query);

    let mut out = String::new();
    writeln!(
        out,
        "{:<10} {:<22} {:>14} {:>6} {:<24} {:<14} {}",
        "REFERENCE", "APPLICANT", "LOAN", "LVR%", "STATUS", "BROKER", "LODGED"
    )?;
    for record in &page.items {
        writeln!(
            out,
            "{:<10} {:<22} {:>14} {:>6} {:<24} {:<14} {}",
            record.reference,
            record.applicant_name,
            format_currency(record.loan_amount),
            opt_display(record.loan_to_value_ratio()),
            record.status.as_str(),
            opt_display(record.broker.as_deref()),
            record.lodged_on
        )?;
    }
    write!(out, "{}", page_footer(&page))?;
    Ok(out)
}

pub fn team_report(
    members: &[TeamMember],
    args: &TeamArgs,
) -> Result<String> {
    let role = args
        .role
        .as_deref()
        .map(|code| parse_code::<TeamRole>("role", code))
        .transpose()?;
    let list_query = list_query::<_, TeamSortKey>(&args.list, role)?;
    let page = query(members, &list_query);

    let mut out = String::new();
    writeln!(
        out,
        "{:<20} {:<20} {:<16} {:>6} {}",
        "NAME", "ROLE", "TEAM", "ACTIVE", "EMAIL"
    )?;
    for member in &page.items {
        let name = if member.active {
            member.name.clone()
        } else {
            format!("{} (inactive)", member.name)
        };
        writeln!(
            out,
            "{:<20} {:<20} {:<16} {:>6} {}",
            name,
            member.role.label(),
            member.team,
            member.active_applications,
            member.email
        )?;
    }
    write!(out, "{}", page_footer(&page))?;
    Ok(out)
}

pub fn load_applications(path: &Path) -> Result<Vec<ApplicationRecord>> {
    let records = ApplicationLoader::load_from_file(path)
        .with_context(|| format!("failed to load applications from {}", path.display()))?;
    debug!(count = records.len(), "applications loaded");
    Ok(records)
}

pub fn load_team(path: &Path) -> Result<Vec<TeamMember>> {
    let members = TeamLoader::load_from_file(path)
        .with_context(|| format!("failed to load team from {}", path.display()))?;
    debug!(count = members.len(), "team loaded");
    Ok(members)
}
