//! Loan calculations behind the repayment calculator and the wizard's
//! estimate panel.

pub mod common;
pub mod repayment;

pub use repayment::{
    RepaymentInput, RepaymentInputError, RepaymentSummary, monthly_payment, summarize,
};
