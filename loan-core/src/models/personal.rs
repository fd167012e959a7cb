use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::choice_enum;

choice_enum! {
    /// Australian residency status of the applicant.
    ResidencyStatus {
        Citizen => ("citizen", "Australian citizen"),
        PermanentResident => ("permanent_resident", "Permanent resident"),
        TemporaryVisa => ("temporary_visa", "Temporary visa holder"),
        NonResident => ("non_resident", "Non-resident"),
    }
}

choice_enum! {
    MaritalStatus {
        Single => ("single", "Single"),
        Married => ("married", "Married"),
        DeFacto => ("de_facto", "De facto"),
        Separated => ("separated", "Separated"),
        Divorced => ("divorced", "Divorced"),
        Widowed => ("widowed", "Widowed"),
    }
}

/// Who is applying and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub residency_status: Option<ResidencyStatus>,
    pub marital_status: Option<MaritalStatus>,
    pub dependants: Option<u32>,
    pub current_address: String,
}
