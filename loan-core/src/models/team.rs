use serde::{Deserialize, Serialize};

use super::choice::choice_enum;

choice_enum! {
    TeamRole {
        Broker => ("broker", "Broker"),
        CreditAnalyst => ("credit_analyst", "Credit analyst"),
        SettlementOfficer => ("settlement_officer", "Settlement officer"),
        TeamLead => ("team_lead", "Team lead"),
        Admin => ("admin", "Administrator"),
    }
}

/// A staff member shown on the admin teams page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    pub role: TeamRole,
    pub team: String,
    pub active_applications: u32,
    pub active: bool,
}
