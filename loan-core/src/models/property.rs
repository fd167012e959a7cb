use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::choice_enum;

choice_enum! {
    PropertyPurpose {
        OwnerOccupied => ("owner_occupied", "Owner occupied"),
        Investment => ("investment", "Investment"),
    }
}

choice_enum! {
    PropertyType {
        House => ("house", "House"),
        Apartment => ("apartment", "Apartment or unit"),
        Townhouse => ("townhouse", "Townhouse"),
        Land => ("land", "Vacant land"),
    }
}

choice_enum! {
    /// State or territory the security property is located in.
    AustralianState {
        Nsw => ("nsw", "New South Wales"),
        Vic => ("vic", "Victoria"),
        Qld => ("qld", "Queensland"),
        Wa => ("wa", "Western Australia"),
        Sa => ("sa", "South Australia"),
        Tas => ("tas", "Tasmania"),
        Act => ("act", "Australian Capital Territory"),
        Nt => ("nt", "Northern Territory"),
    }
}

/// The property being purchased or refinanced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub property_purpose: Option<PropertyPurpose>,
    pub property_type: Option<PropertyType>,
    pub property_state: Option<AustralianState>,
    pub property_address: String,
    pub property_value: Option<Decimal>,
    pub first_home_buyer: bool,
    pub has_found_property: bool,
}
