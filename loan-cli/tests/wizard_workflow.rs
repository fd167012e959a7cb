//! Drives the wizard commands end to end against a SQLite draft file, the
//! way separate `home-online wizard ...` invocations would.

use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use loan_cli::app::{open_session, run_wizard};
use loan_cli::cli::WizardCommand;
use loan_cli::config::{AppConfig, Overrides};
use pretty_assertions::assert_eq;

struct TempDb(PathBuf);

impl TempDb {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "home-online-cli-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    fn config(&self) -> AppConfig {
        AppConfig::default().apply(Overrides {
            backend: Some("sqlite".to_string()),
            connection_string: Some(self.0.display().to_string()),
            session_key: Some("workflow".to_string()),
        })
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap()
}

/// One CLI invocation: open the session fresh, run one command.
async fn invoke(
    config: &AppConfig,
    command: WizardCommand,
) -> String {
    let mut session = open_session(config).await.expect("open session");
    run_wizard(&mut session, command, now())
        .await
        .expect("command failed")
}

async fn set(
    config: &AppConfig,
    field: &str,
    value: &str,
) {
    invoke(
        config,
        WizardCommand::Set {
            field: field.to_string(),
            value: value.to_string(),
        },
    )
    .await;
}

#[tokio::test]
async fn complete_application_across_invocations() {
    let db = TempDb::new("complete");
    let config = db.config();

    set(&config, "full_name", "Jane Citizen").await;
    set(&config, "email", "jane@example.com.au").await;
    set(&config, "phone", "0412 345 678").await;
    set(&config, "date_of_birth", "12/04/1990").await;
    set(&config, "residency_status", "permanent resident").await;
    assert!(invoke(&config, WizardCommand::Next).await.starts_with("Step 2 of 6: Property"));

    set(&config, "propertyPurpose", "owner-occupied").await;
    set(&config, "property_type", "townhouse").await;
    set(&config, "property_state", "QLD").await;
    set(&config, "property_value", "$780,000").await;
    invoke(&config, WizardCommand::Next).await;

    set(&config, "employment_type", "full_time").await;
    set(&config, "annual_income", "132000").await;
    invoke(&config, WizardCommand::Next).await;

    set(&config, "monthly_expenses", "2900").await;
    set(&config, "savings", "95000").await;
    invoke(&config, WizardCommand::Next).await;

    set(&config, "loan_amount", "624000").await;
    set(&config, "loan_term_years", "30").await;
    set(&config, "loan_purpose", "purchase").await;
    set(&config, "repayment_type", "principal_and_interest").await;
    set(&config, "interest_rate", "6.19").await;
    let review = invoke(&config, WizardCommand::Next).await;
    assert!(review.starts_with("Step 6 of 6: Review and submit"), "{review}");
    assert!(review.contains("Estimated repayment:"), "{review}");

    set(&config, "agree_to_terms", "yes").await;
    set(&config, "agree_to_privacy", "yes").await;
    let lodged = invoke(&config, WizardCommand::Submit { reference: None }).await;

    assert_eq!(
        lodged,
        "Application HO-20261018-140500 lodged on 2026-10-18 for Jane Citizen\n\
         Loan amount: $624,000.00\n\
         Status: Submitted"
    );

    let fresh = invoke(&config, WizardCommand::Show).await;
    assert!(fresh.starts_with("Step 1 of 6"), "{fresh}");
    assert!(fresh.contains(" ! full_name"), "{fresh}");
}

async fn fill_personal(config: &AppConfig) {
    set(config, "full_name", "Sam Lee").await;
    set(config, "email", "sam@example.com.au").await;
    set(config, "phone", "0400 000 000").await;
    set(config, "date_of_birth", "1985-01-30").await;
    set(config, "residency_status", "citizen").await;
}

#[tokio::test]
async fn jump_to_step_left_by_back_is_refused() {
    let db = TempDb::new("jump-refused");
    let config = db.config();

    fill_personal(&config).await;
    invoke(&config, WizardCommand::Next).await;
    invoke(&config, WizardCommand::Back).await;

    let out = invoke(&config, WizardCommand::Jump { step: 2 }).await;

    assert_eq!(out, "Cannot jump to step 2; stayed on step 1");
    let shown = invoke(&config, WizardCommand::Show).await;
    assert!(shown.starts_with("Step 1 of 6"), "{shown}");
}

#[tokio::test]
async fn back_then_jump_forward_to_completed_step() {
    let db = TempDb::new("jump");
    let config = db.config();

    fill_personal(&config).await;
    invoke(&config, WizardCommand::Next).await;
    set(&config, "property_purpose", "investment").await;
    set(&config, "property_type", "apartment").await;
    set(&config, "property_state", "VIC").await;
    set(&config, "property_value", "610000").await;
    invoke(&config, WizardCommand::Next).await;
    invoke(&config, WizardCommand::Back).await;
    invoke(&config, WizardCommand::Back).await;

    let out = invoke(&config, WizardCommand::Jump { step: 2 }).await;

    assert!(out.starts_with("Step 2 of 6: Property"), "{out}");
}

#[tokio::test]
async fn reset_discards_saved_draft() {
    let db = TempDb::new("reset");
    let config = db.config();
    set(&config, "full_name", "Temporary").await;

    assert_eq!(invoke(&config, WizardCommand::Reset).await, "Draft discarded.");

    let session = open_session(&config).await.expect("open session");
    assert_eq!(session.form().personal.full_name, "");
}
