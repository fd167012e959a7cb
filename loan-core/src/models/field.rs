//! Typed access to individual form fields.
//!
//! [`Field`] enumerates every value in a [`FormState`]. Reads go through
//! [`FormState::value`] and writes from raw host input go through
//! [`FormState::set`]; both are plain `match` tables, so adding a field means
//! adding one arm to each.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::choice::{Choice, choice_enum};
use super::employment::EmploymentType;
use super::form_state::FormState;
use super::loan_requirements::{LoanPurpose, RateType, RepaymentType};
use super::personal::{MaritalStatus, ResidencyStatus};
use super::property::{AustralianState, PropertyPurpose, PropertyType};

choice_enum! {
    /// Every field of the loan application, keyed by its stable name.
    Field {
        FullName => ("full_name", "Full name"),
        Email => ("email", "Email address"),
        Phone => ("phone", "Phone number"),
        DateOfBirth => ("date_of_birth", "Date of birth"),
        ResidencyStatus => ("residency_status", "Residency status"),
        MaritalStatus => ("marital_status", "Marital status"),
        Dependants => ("dependants", "Number of dependants"),
        CurrentAddress => ("current_address", "Current address"),

        PropertyPurpose => ("property_purpose", "Property purpose"),
        PropertyType => ("property_type", "Property type"),
        PropertyState => ("property_state", "Property state"),
        PropertyAddress => ("property_address", "Property address"),
        PropertyValue => ("property_value", "Property value"),
        FirstHomeBuyer => ("first_home_buyer", "First home buyer"),
        HasFoundProperty => ("has_found_property", "Property found"),

        EmploymentType => ("employment_type", "Employment type"),
        EmployerName => ("employer_name", "Employer name"),
        Occupation => ("occupation", "Occupation"),
        YearsEmployed => ("years_employed", "Years with employer"),
        AnnualIncome => ("annual_income", "Annual income"),

        MonthlyExpenses => ("monthly_expenses", "Monthly living expenses"),
        Savings => ("savings", "Savings"),
        ExistingDebts => ("existing_debts", "Existing debts"),
        CreditCardLimits => ("credit_card_limits", "Credit card limits"),
        OwnsOtherProperty => ("owns_other_property", "Owns other property"),

        LoanAmount => ("loan_amount", "Loan amount"),
        DepositAmount => ("deposit_amount", "Deposit amount"),
        LoanTermYears => ("loan_term_years", "Loan term (years)"),
        LoanPurpose => ("loan_purpose", "Loan purpose"),
        RepaymentType => ("repayment_type", "Repayment type"),
        RateType => ("rate_type", "Rate type"),
        InterestRate => ("interest_rate", "Interest rate (%)"),

        AgreeToTerms => ("agree_to_terms", "Agree to terms"),
        AgreeToPrivacy => ("agree_to_privacy", "Agree to privacy policy"),
    }
}

impl Field {
    /// Resolve a field from host input.
    ///
    /// Accepts the canonical key (`loan_amount`) as well as camelCase
    /// (`loanAmount`) and kebab-case (`loan-amount`) spellings.
    pub fn lookup(name: &str) -> Result<Self, FieldError> {
        let mut key = String::with_capacity(name.len() + 4);
        for ch in name.trim().chars() {
            if ch.is_ascii_uppercase() {
                if !key.is_empty() {
                    key.push('_');
                }
                key.push(ch.to_ascii_lowercase());
            } else if ch == '-' || ch == ' ' {
                key.push('_');
            } else {
                key.push(ch);
            }
        }

        Self::parse(&key).ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }
}

/// How strictly a required field is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// Any entered value counts, including `0` and `false`.
    #[default]
    Present,
    /// Numbers must be greater than zero (loan amount, property value).
    Positive,
    /// Flags must be `true` (declarations).
    Affirmed,
}

/// Borrowed view of a single field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<Decimal>),
    Count(Option<u32>),
    Date(Option<NaiveDate>),
    Choice(Option<&'static str>),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Blank text and absent values are missing. Flags are always present.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Number(value) => value.is_some(),
            Self::Count(value) => value.is_some(),
            Self::Date(value) => value.is_some(),
            Self::Choice(value) => value.is_some(),
            Self::Flag(_) => true,
        }
    }

    pub fn satisfies(&self, requirement: Requirement) -> bool {
        match (requirement, self) {
            (Requirement::Positive, Self::Number(value)) => {
                value.is_some_and(|v| v > Decimal::ZERO)
            }
            (Requirement::Positive, Self::Count(value)) => value.is_some_and(|v| v > 0),
            (Requirement::Affirmed, Self::Flag(value)) => *value,
            _ => self.is_present(),
        }
    }
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(Some(value)) => write!(f, "{value}"),
            Self::Count(Some(value)) => write!(f, "{value}"),
            Self::Date(Some(value)) => write!(f, "{}", value.format("%Y-%m-%d")),
            Self::Choice(Some(code)) => f.write_str(code),
            Self::Flag(value) => f.write_str(if *value { "yes" } else { "no" }),
            Self::Number(None) | Self::Count(None) | Self::Date(None) | Self::Choice(None) => {
                Ok(())
            }
        }
    }
}

/// Raw host input that could not be stored in a field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: Field, value: String },

    #[error("{field}: value cannot be negative")]
    Negative { field: Field },

    #[error("{field}: '{value}' is not a whole number")]
    InvalidCount { field: Field, value: String },

    #[error("{field}: '{value}' is not a date (use YYYY-MM-DD or DD/MM/YYYY)")]
    InvalidDate { field: Field, value: String },

    #[error("{field}: '{value}' is not one of: {options}")]
    UnknownOption {
        field: Field,
        value: String,
        options: String,
    },

    #[error("{field}: '{value}' is not yes or no")]
    InvalidFlag { field: Field, value: String },
}

impl FormState {
    /// Read the current value of `field`.
    pub fn value(
        &self,
        field: Field,
    ) -> FieldValue<'_> {
        let personal = &self.personal;
        let property = &self.property;
        let employment = &self.employment;
        let financial = &self.financial;
        let loan = &self.loan;

        match field {
            Field::FullName => FieldValue::Text(&personal.full_name),
            Field::Email => FieldValue::Text(&personal.email),
            Field::Phone => FieldValue::Text(&personal.phone),
            Field::DateOfBirth => FieldValue::Date(personal.date_of_birth),
            Field::ResidencyStatus => {
                FieldValue::Choice(personal.residency_status.map(Choice::code))
            }
            Field::MaritalStatus => FieldValue::Choice(personal.marital_status.map(Choice::code)),
            Field::Dependants => FieldValue::Count(personal.dependants),
            Field::CurrentAddress => FieldValue::Text(&personal.current_address),

            Field::PropertyPurpose => {
                FieldValue::Choice(property.property_purpose.map(Choice::code))
            }
            Field::PropertyType => FieldValue::Choice(property.property_type.map(Choice::code)),
            Field::PropertyState => FieldValue::Choice(property.property_state.map(Choice::code)),
            Field::PropertyAddress => FieldValue::Text(&property.property_address),
            Field::PropertyValue => FieldValue::Number(property.property_value),
            Field::FirstHomeBuyer => FieldValue::Flag(property.first_home_buyer),
            Field::HasFoundProperty => FieldValue::Flag(property.has_found_property),

            Field::EmploymentType => {
                FieldValue::Choice(employment.employment_type.map(Choice::code))
            }
            Field::EmployerName => FieldValue::Text(&employment.employer_name),
            Field::Occupation => FieldValue::Text(&employment.occupation),
            Field::YearsEmployed => FieldValue::Count(employment.years_employed),
            Field::AnnualIncome => FieldValue::Number(employment.annual_income),

            Field::MonthlyExpenses => FieldValue::Number(financial.monthly_expenses),
            Field::Savings => FieldValue::Number(financial.savings),
            Field::ExistingDebts => FieldValue::Number(financial.existing_debts),
            Field::CreditCardLimits => FieldValue::Number(financial.credit_card_limits),
            Field::OwnsOtherProperty => FieldValue::Flag(financial.owns_other_property),

            Field::LoanAmount => FieldValue::Number(loan.loan_amount),
            Field::DepositAmount => FieldValue::Number(loan.deposit_amount),
            Field::LoanTermYears => FieldValue::Count(loan.loan_term_years),
            Field::LoanPurpose => FieldValue::Choice(loan.loan_purpose.map(Choice::code)),
            Field::RepaymentType => FieldValue::Choice(loan.repayment_type.map(Choice::code)),
            Field::RateType => FieldValue::Choice(loan.rate_type.map(Choice::code)),
            Field::InterestRate => FieldValue::Number(loan.interest_rate),

            Field::AgreeToTerms => FieldValue::Flag(self.declarations.agree_to_terms),
            Field::AgreeToPrivacy => FieldValue::Flag(self.declarations.agree_to_privacy),
        }
    }

    /// Parse `raw` and store it in `field`.
    ///
    /// Blank input clears optional values. On error the form is unchanged.
    pub fn set(
        &mut self,
        field: Field,
        raw: &str,
    ) -> Result<(), FieldError> {
        match field {
            Field::FullName => self.personal.full_name = text(raw),
            Field::Email => self.personal.email = text(raw),
            Field::Phone => self.personal.phone = text(raw),
            Field::DateOfBirth => self.personal.date_of_birth = date(field, raw)?,
            Field::ResidencyStatus => {
                self.personal.residency_status = choice::<ResidencyStatus>(field, raw)?
            }
            Field::MaritalStatus => {
                self.personal.marital_status = choice::<MaritalStatus>(field, raw)?
            }
            Field::Dependants => self.personal.dependants = count(field, raw)?,
            Field::CurrentAddress => self.personal.current_address = text(raw),

            Field::PropertyPurpose => {
                self.property.property_purpose = choice::<PropertyPurpose>(field, raw)?
            }
            Field::PropertyType => {
                self.property.property_type = choice::<PropertyType>(field, raw)?
            }
            Field::PropertyState => {
                self.property.property_state = choice::<AustralianState>(field, raw)?
            }
            Field::PropertyAddress => self.property.property_address = text(raw),
            Field::PropertyValue => self.property.property_value = money(field, raw)?,
            Field::FirstHomeBuyer => self.property.first_home_buyer = flag(field, raw)?,
            Field::HasFoundProperty => self.property.has_found_property = flag(field, raw)?,

            Field::EmploymentType => {
                self.employment.employment_type = choice::<EmploymentType>(field, raw)?
            }
            Field::EmployerName => self.employment.employer_name = text(raw),
            Field::Occupation => self.employment.occupation = text(raw),
            Field::YearsEmployed => self.employment.years_employed = count(field, raw)?,
            Field::AnnualIncome => self.employment.annual_income = money(field, raw)?,

            Field::MonthlyExpenses => self.financial.monthly_expenses = money(field, raw)?,
            Field::Savings => self.financial.savings = money(field, raw)?,
            Field::ExistingDebts => self.financial.existing_debts = money(field, raw)?,
            Field::CreditCardLimits => self.financial.credit_card_limits = money(field, raw)?,
            Field::OwnsOtherProperty => self.financial.owns_other_property = flag(field, raw)?,

            Field::LoanAmount => self.loan.loan_amount = money(field, raw)?,
            Field::DepositAmount => self.loan.deposit_amount = money(field, raw)?,
            Field::LoanTermYears => self.loan.loan_term_years = count(field, raw)?,
            Field::LoanPurpose => self.loan.loan_purpose = choice::<LoanPurpose>(field, raw)?,
            Field::RepaymentType => self.loan.repayment_type = choice::<RepaymentType>(field, raw)?,
            Field::RateType => self.loan.rate_type = choice::<RateType>(field, raw)?,
            Field::InterestRate => {
                self.loan.interest_rate = money(field, raw.trim().trim_end_matches('%'))?
            }

            Field::AgreeToTerms => self.declarations.agree_to_terms = flag(field, raw)?,
            Field::AgreeToPrivacy => self.declarations.agree_to_privacy = flag(field, raw)?,
        }
        Ok(())
    }
}

fn text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Money and percentages: `$` prefix and thousands separators are accepted.
fn money(
    field: Field,
    raw: &str,
) -> Result<Option<Decimal>, FieldError> {
    let normalized = raw.trim().trim_start_matches('$').replace(',', "");
    if normalized.is_empty() {
        return Ok(None);
    }

    let value: Decimal = normalized.parse().map_err(|_| FieldError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::Negative { field });
    }
    Ok(Some(value))
}

fn count(
    field: Field,
    raw: &str,
) -> Result<Option<u32>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FieldError::InvalidCount {
            field,
            value: raw.to_string(),
        })
}

fn date(
    field: Field,
    raw: &str,
) -> Result<Option<NaiveDate>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| FieldError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

fn choice<T: Choice>(
    field: Field,
    raw: &str,
) -> Result<Option<T>, FieldError> {
    let code = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    if code.is_empty() {
        return Ok(None);
    }

    T::from_code(&code)
        .map(Some)
        .ok_or_else(|| FieldError::UnknownOption {
            field,
            value: raw.to_string(),
            options: T::option_list(),
        })
}

fn flag(
    field: Field,
    raw: &str,
) -> Result<bool, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        _ => Err(FieldError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}
