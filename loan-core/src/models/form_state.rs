//! The loan application draft collected by the wizard.

use serde::{Deserialize, Serialize};

use super::employment::EmploymentDetails;
use super::financial::FinancialPosition;
use super::loan_requirements::LoanRequirements;
use super::personal::PersonalDetails;
use super::property::PropertyDetails;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    pub agree_to_terms: bool,
    pub agree_to_privacy: bool,
}

/// Every value the applicant can enter, grouped by wizard section.
///
/// The set of fields is fixed: values are overwritten or reset to their
/// default, never removed. Unknown keys in persisted JSON are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormState {
    pub personal: PersonalDetails,
    pub property: PropertyDetails,
    pub employment: EmploymentDetails,
    pub financial: FinancialPosition,
    pub loan: LoanRequirements,
    pub declarations: Declarations,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Serialize for a key-value store.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
