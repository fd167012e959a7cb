use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::choice_enum;

choice_enum! {
    EmploymentType {
        FullTime => ("full_time", "Full time"),
        PartTime => ("part_time", "Part time"),
        Casual => ("casual", "Casual"),
        SelfEmployed => ("self_employed", "Self employed"),
        Contract => ("contract", "Contractor"),
        NotEmployed => ("not_employed", "Not employed"),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentDetails {
    pub employment_type: Option<EmploymentType>,
    pub employer_name: String,
    pub occupation: String,
    pub years_employed: Option<u32>,
    /// Gross annual income before tax.
    pub annual_income: Option<Decimal>,
}
