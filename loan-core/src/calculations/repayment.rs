//! Fixed monthly repayment for an amortizing home loan.
//!
//! ```text
//! monthly_rate = R / 100 / 12
//! n            = T * 12
//! payment      = P / n                                         if monthly_rate == 0
//! payment      = P * monthly_rate * (1 + monthly_rate)^n
//!                  / ((1 + monthly_rate)^n - 1)                otherwise
//! ```
//!
//! The second case is evaluated as `P * monthly_rate / (1 - (1 + monthly_rate)^-n)`,
//! which tends to `P * monthly_rate` for very large rates instead of overflowing.
//!
//! Arithmetic is plain `f64` and nothing is rounded here; use
//! [`to_currency`](super::common::to_currency) when displaying results.
//!
//! # Example
//!
//! ```
//! use loan_core::calculations::{RepaymentInput, monthly_payment};
//!
//! let input = RepaymentInput::new(120_000.0, 0.0, 10.0).unwrap();
//!
//! assert_eq!(monthly_payment(&input), 1000.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an input is rejected before it reaches the formula.
#[derive(Debug, Error, PartialEq)]
pub enum RepaymentInputError {
    #[error("principal must be greater than zero, got {0}")]
    NonPositivePrincipal(f64),

    #[error("annual rate cannot be negative, got {0}%")]
    NegativeRate(f64),

    #[error("term must be greater than zero, got {0} years")]
    NonPositiveTerm(f64),
}

/// A validated repayment question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepaymentInput {
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
}

impl RepaymentInput {
    /// # Errors
    ///
    /// Returns [`RepaymentInputError`] when the principal or term is not
    /// strictly positive, or the rate is negative. NaN fails every check.
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_years: f64,
    ) -> Result<Self, RepaymentInputError> {
        if !(principal > 0.0 && principal.is_finite()) {
            return Err(RepaymentInputError::NonPositivePrincipal(principal));
        }
        if !(annual_rate_percent >= 0.0 && annual_rate_percent.is_finite()) {
            return Err(RepaymentInputError::NegativeRate(annual_rate_percent));
        }
        if !(term_years > 0.0 && term_years.is_finite()) {
            return Err(RepaymentInputError::NonPositiveTerm(term_years));
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> f64 {
        self.term_years
    }

    /// Number of monthly repayments over the term.
    pub fn payment_count(&self) -> f64 {
        self.term_years * 12.0
    }
}

/// Headline figures shown next to a repayment estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub total_interest: f64,
}

/// The fixed monthly repayment that clears `input.principal` over the term.
pub fn monthly_payment(input: &RepaymentInput) -> f64 {
    let monthly_rate = input.annual_rate_percent / 100.0 / 12.0;
    let n = input.payment_count();

    if monthly_rate == 0.0 {
        return input.principal / n;
    }

    // P*r / (1 - (1+r)^-n) stays finite when (1+r)^n would overflow.
    let discount = 1.0 - (1.0 + monthly_rate).powf(-n);
    if discount <= 0.0 {
        return input.principal / n;
    }
    input.principal * monthly_rate / discount
}

pub fn summarize(input: &RepaymentInput) -> RepaymentSummary {
    let monthly_payment = monthly_payment(input);
    let total_repayment = monthly_payment * input.payment_count();

    RepaymentSummary {
        monthly_payment,
        total_repayment,
        total_interest: total_repayment - input.principal,
    }
}
