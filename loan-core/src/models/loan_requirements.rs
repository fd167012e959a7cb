use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::choice_enum;

choice_enum! {
    LoanPurpose {
        Purchase => ("purchase", "Purchase"),
        Refinance => ("refinance", "Refinance"),
        Construction => ("construction", "Construction"),
        EquityRelease => ("equity_release", "Equity release"),
    }
}

choice_enum! {
    RepaymentType {
        PrincipalAndInterest => ("principal_and_interest", "Principal and interest"),
        InterestOnly => ("interest_only", "Interest only"),
    }
}

choice_enum! {
    RateType {
        Variable => ("variable", "Variable"),
        Fixed => ("fixed", "Fixed"),
        Split => ("split", "Split"),
    }
}

/// What the applicant wants to borrow and on which terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequirements {
    pub loan_amount: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub loan_term_years: Option<u32>,
    pub loan_purpose: Option<LoanPurpose>,
    pub repayment_type: Option<RepaymentType>,
    pub rate_type: Option<RateType>,
    /// Indicative annual rate, in percent (e.g. `5.99`).
    pub interest_rate: Option<Decimal>,
}
