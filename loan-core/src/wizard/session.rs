//! A single applicant's pass through the wizard.
//!
//! The session owns the draft [`FormState`] and the navigation progress and
//! writes both to a [`FormStore`] whenever they change:
//!
//! | key               | value                                   |
//! |-------------------|-----------------------------------------|
//! | `<key>`           | FormState as JSON                       |
//! | `<key>:progress`  | `{ current_step, completed_steps }`     |

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::{RepaymentInput, RepaymentSummary, summarize};
use crate::models::{ApplicationRecord, ApplicationStatus, Field, FieldError, FormState};
use crate::store::{FormStore, StoreError};

use super::gate::{Navigation, missing_fields};
use super::step::{Step, Wizard};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("step {} ({name}) is incomplete: {} required field(s) missing", .step + 1, .missing.len())]
    Incomplete {
        step: usize,
        name: String,
        missing: Vec<Field>,
    },
}

/// Navigation state persisted next to the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current_step: usize,
    pub completed_steps: BTreeSet<usize>,
}

pub struct WizardSession {
    wizard: Wizard,
    store: Arc<dyn FormStore>,
    key: String,
    form: FormState,
    progress: Progress,
}

impl WizardSession {
    /// Resume the draft saved under `key`, or start a blank one.
    ///
    /// A draft that no longer parses is logged and replaced by a blank form;
    /// it is overwritten on the next change.
    pub async fn open(
        wizard: Wizard,
        store: Arc<dyn FormStore>,
        key: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let key = key.into();

        let form = match store.load(&key).await? {
            Some(json) => FormState::from_json(&json).unwrap_or_else(|error| {
                warn!(%key, %error, "discarding unreadable draft");
                FormState::default()
            }),
            None => FormState::default(),
        };

        let mut progress = match store.load(&progress_key(&key)).await? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|error| {
                warn!(%key, %error, "discarding unreadable progress");
                Progress::default()
            }),
            None => Progress::default(),
        };
        let last = wizard.last_index();
        progress.current_step = progress.current_step.min(last);
        progress.completed_steps.retain(|step| *step <= last);

        debug!(%key, step = progress.current_step, "wizard session opened");
        Ok(Self {
            wizard,
            store,
            key,
            form,
            progress,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn current_index(&self) -> usize {
        self.progress.current_step
    }

    pub fn current_step(&self) -> &Step {
        self.wizard.step_clamped(self.progress.current_step)
    }

    pub fn is_on_last_step(&self) -> bool {
        self.progress.current_step == self.wizard.last_index()
    }

    /// Required fields on the current step that still block `advance`.
    pub fn missing_fields(&self) -> Vec<Field> {
        missing_fields(self.current_step(), &self.form)
    }

    /// Apply `change` to the draft and persist it.
    ///
    /// The session only takes the new draft once the store has accepted it.
    pub async fn update<F>(
        &mut self,
        change: F,
    ) -> Result<(), SessionError>
    where
        F: FnOnce(&mut FormState),
    {
        let mut draft = self.form.clone();
        change(&mut draft);
        self.commit_form(draft).await
    }

    /// Parse raw input into `field`, then persist the draft.
    pub async fn set_field(
        &mut self,
        field: Field,
        raw: &str,
    ) -> Result<(), SessionError> {
        let mut draft = self.form.clone();
        draft.set(field, raw)?;
        self.commit_form(draft).await?;
        debug!(key = %self.key, field = field.as_str(), "field updated");
        Ok(())
    }

    /// Move forward if the current step's gate passes.
    ///
    /// A rejected advance is a normal outcome: the returned [`Navigation`]
    /// lists the fields still missing.
    pub async fn advance(&mut self) -> Result<Navigation, SessionError> {
        let current = self.progress.current_step;
        let navigation = self.wizard.request_advance(current, &self.form);

        if navigation.rejected {
            warn!(
                key = %self.key,
                step = current,
                missing = ?navigation.missing.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "advance rejected"
            );
            return Ok(navigation);
        }

        self.progress.completed_steps.insert(current);
        self.progress.current_step = navigation.step;
        self.save_progress().await?;
        Ok(navigation)
    }

    pub async fn back(&mut self) -> Result<usize, SessionError> {
        let previous = self.wizard.request_back(self.progress.current_step);
        if previous != self.progress.current_step {
            self.progress.current_step = previous;
            self.save_progress().await?;
        }
        Ok(previous)
    }

    pub async fn jump(
        &mut self,
        target: usize,
    ) -> Result<Navigation, SessionError> {
        let navigation = self.wizard.request_jump(
            target,
            self.progress.current_step,
            &self.progress.completed_steps,
        );

        if navigation.rejected {
            debug!(key = %self.key, target, "jump ignored");
        } else if navigation.step != self.progress.current_step {
            self.progress.current_step = navigation.step;
            self.save_progress().await?;
        }
        Ok(navigation)
    }

    /// Forget the draft entirely and start again at the first step.
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.store.clear(&self.key).await?;
        self.store.clear(&progress_key(&self.key)).await?;
        self.form.reset();
        self.progress = Progress::default();
        debug!(key = %self.key, "wizard session reset");
        Ok(())
    }

    /// Repayment figures for the loan described so far.
    ///
    /// `None` until loan amount, interest rate and term are all filled in
    /// with usable values.
    pub fn repayment_estimate(&self) -> Option<RepaymentSummary> {
        let loan = &self.form.loan;
        let principal = loan.loan_amount?.to_f64()?;
        let rate = loan.interest_rate?.to_f64()?;
        let years = f64::from(loan.loan_term_years?);

        RepaymentInput::new(principal, rate, years)
            .ok()
            .map(|input| summarize(&input))
    }

    /// Check every step and turn the draft into a lodged application.
    ///
    /// On success the persisted draft is cleared and the session starts
    /// over. The first failing step is reported otherwise, and nothing is
    /// changed.
    pub async fn submit(
        &mut self,
        reference: impl Into<String>,
        lodged_on: NaiveDate,
    ) -> Result<ApplicationRecord, SessionError> {
        if let Some(step) = self
            .wizard
            .steps()
            .iter()
            .find(|step| !missing_fields(step, &self.form).is_empty())
        {
            return Err(SessionError::Incomplete {
                step: step.index(),
                name: step.name().to_string(),
                missing: missing_fields(step, &self.form),
            });
        }

        let personal = &self.form.personal;
        let record = ApplicationRecord {
            reference: reference.into(),
            applicant_name: personal.full_name.clone(),
            email: personal.email.clone(),
            loan_amount: self.form.loan.loan_amount.unwrap_or(Decimal::ZERO),
            property_value: self.form.property.property_value.unwrap_or(Decimal::ZERO),
            status: ApplicationStatus::Submitted,
            broker: None,
            lodged_on,
        };

        self.reset().await?;
        debug!(reference = %record.reference, "application submitted");
        Ok(record)
    }

    async fn commit_form(
        &mut self,
        draft: FormState,
    ) -> Result<(), SessionError> {
        let json = draft.to_json().map_err(StoreError::from)?;
        self.store.save(&self.key, &json).await?;
        self.form = draft;
        Ok(())
    }

    async fn save_progress(&self) -> Result<(), SessionError> {
        let json = serde_json::to_string(&self.progress).map_err(StoreError::from)?;
        self.store.save(&progress_key(&self.key), &json).await?;
        Ok(())
    }
}

fn progress_key(key: &str) -> String {
    format!("{key}:progress")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::to_currency;
    use crate::store::InMemoryStore;

    const KEY: &str = "loan-application";

    async fn open(store: &Arc<InMemoryStore>) -> WizardSession {
        WizardSession::open(Wizard::home_loan(), store.clone(), KEY)
            .await
            .unwrap()
    }

    async fn fill_personal(session: &mut WizardSession) {
        session.set_field(Field::FullName, "Jane Citizen").await.unwrap();
        session.set_field(Field::Email, "jane@example.com.au").await.unwrap();
        session.set_field(Field::Phone, "0412 345 678").await.unwrap();
        session.set_field(Field::DateOfBirth, "1990-04-12").await.unwrap();
        session.set_field(Field::ResidencyStatus, "citizen").await.unwrap();
    }

    async fn fill_property(session: &mut WizardSession) {
        session.set_field(Field::PropertyPurpose, "owner_occupied").await.unwrap();
        session.set_field(Field::PropertyType, "house").await.unwrap();
        session.set_field(Field::PropertyState, "nsw").await.unwrap();
        session.set_field(Field::PropertyValue, "900000").await.unwrap();
    }

    async fn fill_everything(session: &mut WizardSession) {
        fill_personal(session).await;
        fill_property(session).await;
        session
            .update(|form| {
                form.set(Field::EmploymentType, "full_time").unwrap();
                form.set(Field::AnnualIncome, "145000").unwrap();
                form.set(Field::MonthlyExpenses, "3200").unwrap();
                form.set(Field::Savings, "0").unwrap();
                form.set(Field::LoanAmount, "720000").unwrap();
                form.set(Field::LoanTermYears, "30").unwrap();
                form.set(Field::LoanPurpose, "purchase").unwrap();
                form.set(Field::RepaymentType, "principal_and_interest").unwrap();
                form.set(Field::AgreeToTerms, "yes").unwrap();
                form.set(Field::AgreeToPrivacy, "yes").unwrap();
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn new_session_starts_blank_on_first_step() {
        let store = Arc::new(InMemoryStore::new());

        let session = open(&store).await;

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.form(), &FormState::default());
    }

    #[tokio::test]
    async fn every_mutation_is_persisted() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;

        session.set_field(Field::FullName, "Jane").await.unwrap();

        let saved = store.load(KEY).await.unwrap().unwrap();
        assert_eq!(FormState::from_json(&saved).unwrap(), *session.form());
    }

    #[tokio::test]
    async fn reopened_session_resumes_form_and_progress() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;
        session.advance().await.unwrap();

        let resumed = open(&store).await;

        assert_eq!(resumed.form(), session.form());
        assert_eq!(resumed.current_index(), 1);
        assert!(resumed.progress().completed_steps.contains(&0));
    }

    #[tokio::test]
    async fn invalid_input_leaves_form_unchanged() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;

        let result = session.set_field(Field::LoanAmount, "lots").await;

        assert!(matches!(result, Err(SessionError::Field(_))));
        assert_eq!(session.form().loan.loan_amount, None);
        assert_eq!(store.load(KEY).await.unwrap(), None);
    }

    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl FormStore for ReadOnlyStore {
        async fn save(
            &self,
            _key: &str,
            _value: &str,
        ) -> Result<(), StoreError> {
            Err(StoreError::Database("disk is read-only".to_string()))
        }

        async fn load(
            &self,
            _key: &str,
        ) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn clear(
            &self,
            _key: &str,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_save_leaves_form_unchanged() {
        let mut session = WizardSession::open(Wizard::home_loan(), Arc::new(ReadOnlyStore), KEY)
            .await
            .unwrap();

        let set = session.set_field(Field::FullName, "Jane").await;
        let updated = session
            .update(|form| form.personal.email = "jane@example.com.au".to_string())
            .await;

        assert!(matches!(set, Err(SessionError::Store(StoreError::Database(_)))));
        assert!(matches!(updated, Err(SessionError::Store(_))));
        assert_eq!(session.form(), &FormState::default());
    }

    #[tokio::test]
    async fn advance_rejected_until_step_complete() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        session.set_field(Field::FullName, "Jane").await.unwrap();

        let navigation = session.advance().await.unwrap();

        assert!(navigation.rejected);
        assert_eq!(navigation.step, 0);
        assert_eq!(
            navigation.missing,
            vec![
                Field::Email,
                Field::Phone,
                Field::DateOfBirth,
                Field::ResidencyStatus
            ]
        );
        assert!(session.progress().completed_steps.is_empty());
    }

    #[tokio::test]
    async fn advance_marks_step_completed() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;

        let navigation = session.advance().await.unwrap();

        assert!(!navigation.rejected);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_step().name(), "Property");
    }

    #[tokio::test]
    async fn jump_to_step_left_by_back_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;
        session.advance().await.unwrap();
        session.back().await.unwrap();

        let navigation = session.jump(1).await.unwrap();

        assert!(navigation.rejected);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.progress().completed_steps, BTreeSet::from([0]));
    }

    #[tokio::test]
    async fn jump_forward_only_to_completed_steps() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;
        session.advance().await.unwrap();
        fill_property(&mut session).await;
        session.advance().await.unwrap();
        session.back().await.unwrap();
        session.back().await.unwrap();

        assert!(session.jump(2).await.unwrap().rejected);
        assert!(session.jump(3).await.unwrap().rejected);
        assert_eq!(session.current_index(), 0);

        let navigation = session.jump(1).await.unwrap();
        assert!(!navigation.rejected);
        assert_eq!(session.current_index(), 1);
    }

    #[tokio::test]
    async fn back_on_first_step_is_a_noop() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;

        assert_eq!(session.back().await.unwrap(), 0);
        assert_eq!(store.load(&progress_key(KEY)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reset_clears_store_and_state() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;
        session.advance().await.unwrap();

        session.reset().await.unwrap();

        assert_eq!(session.form(), &FormState::default());
        assert_eq!(session.current_index(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn corrupt_draft_is_replaced_by_blank_form() {
        let store = Arc::new(InMemoryStore::new());
        store.save(KEY, "{not json").await.unwrap();
        let progress = r#"{"current_step":42,"completed_steps":[0,1,42]}"#;
        store.save(&progress_key(KEY), progress).await.unwrap();

        let session = open(&store).await;

        assert_eq!(session.form(), &FormState::default());
        assert_eq!(session.current_index(), 5);
        assert_eq!(session.progress().completed_steps, BTreeSet::from([0, 1]));
    }

    #[tokio::test]
    async fn repayment_estimate_needs_amount_rate_and_term() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        session.set_field(Field::LoanAmount, "400000").await.unwrap();
        session.set_field(Field::LoanTermYears, "30").await.unwrap();

        assert_eq!(session.repayment_estimate(), None);

        session.set_field(Field::InterestRate, "4.99").await.unwrap();
        let estimate = session.repayment_estimate().unwrap();

        assert_eq!(to_currency(estimate.monthly_payment), Some(dec!(2144.84)));
    }

    #[tokio::test]
    async fn repayment_estimate_none_for_zero_term() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        session.set_field(Field::LoanAmount, "400000").await.unwrap();
        session.set_field(Field::InterestRate, "5").await.unwrap();
        session.set_field(Field::LoanTermYears, "0").await.unwrap();

        assert_eq!(session.repayment_estimate(), None);
    }

    #[tokio::test]
    async fn submit_reports_first_incomplete_step() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_personal(&mut session).await;

        let result = session
            .submit("HO-1", NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
            .await;

        match result {
            Err(SessionError::Incomplete { step, name, missing }) => {
                assert_eq!(step, 1);
                assert_eq!(name, "Property");
                assert_eq!(missing.first(), Some(&Field::PropertyPurpose));
            }
            other => panic!("expected Incomplete, got {other:?}"),
        }
        assert_eq!(session.form().personal.full_name, "Jane Citizen");
    }

    #[tokio::test]
    async fn submit_rejects_unticked_declarations() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_everything(&mut session).await;
        session.set_field(Field::AgreeToPrivacy, "no").await.unwrap();

        let result = session
            .submit("HO-2", NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
            .await;

        assert!(matches!(
            result,
            Err(SessionError::Incomplete { step: 5, .. })
        ));
    }

    #[tokio::test]
    async fn submit_produces_record_and_clears_draft() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = open(&store).await;
        fill_everything(&mut session).await;
        let lodged_on = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        let record = session.submit("HO-20261018-0001", lodged_on).await.unwrap();

        assert_eq!(record.reference, "HO-20261018-0001");
        assert_eq!(record.applicant_name, "Jane Citizen");
        assert_eq!(record.loan_amount, dec!(720000));
        assert_eq!(record.property_value, dec!(900000));
        assert_eq!(record.status, ApplicationStatus::Submitted);
        assert_eq!(record.lodged_on, lodged_on);
        assert!(store.is_empty().await);
        assert_eq!(session.form(), &FormState::default());
    }
}
