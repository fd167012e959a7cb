use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Assets and liabilities used for serviceability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPosition {
    pub monthly_expenses: Option<Decimal>,
    pub savings: Option<Decimal>,
    pub existing_debts: Option<Decimal>,
    pub credit_card_limits: Option<Decimal>,
    pub owns_other_property: bool,
}
