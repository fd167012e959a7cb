use std::cmp::Ordering;

use crate::models::choice::choice_enum;
use crate::models::{ApplicationRecord, ApplicationStatus, TeamMember, TeamRole};

use super::listing::Listing;

choice_enum! {
    /// Columns of the applications table.
    ApplicationSortKey {
        Reference => ("reference", "Reference"),
        Applicant => ("applicant", "Applicant"),
        LoanAmount => ("loan_amount", "Loan amount"),
        Status => ("status", "Status"),
        LodgedOn => ("lodged_on", "Lodged"),
    }
}

choice_enum! {
    /// Columns of the team table.
    TeamSortKey {
        Name => ("name", "Name"),
        Team => ("team", "Team"),
        ActiveApplications => ("active_applications", "Active applications"),
    }
}

impl Listing for ApplicationRecord {
    type Filter = ApplicationStatus;
    type SortKey = ApplicationSortKey;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.reference.as_str(),
            self.applicant_name.as_str(),
            self.email.as_str(),
        ];
        if let Some(broker) = &self.broker {
            fields.push(broker.as_str());
        }
        fields
    }

    fn matches_filter(
        &self,
        status: ApplicationStatus,
    ) -> bool {
        self.status == status
    }

    fn compare_by(
        &self,
        other: &Self,
        key: ApplicationSortKey,
    ) -> Ordering {
        match key {
            ApplicationSortKey::Reference => self.reference.cmp(&other.reference),
            ApplicationSortKey::Applicant => self
                .applicant_name
                .to_lowercase()
                .cmp(&other.applicant_name.to_lowercase()),
            ApplicationSortKey::LoanAmount => self.loan_amount.cmp(&other.loan_amount),
            // declaration order is lifecycle order
            ApplicationSortKey::Status => self.status.cmp(&other.status),
            ApplicationSortKey::LodgedOn => self.lodged_on.cmp(&other.lodged_on),
        }
    }
}

impl Listing for TeamMember {
    type Filter = TeamRole;
    type SortKey = TeamSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.team.as_str()]
    }

    fn matches_filter(
        &self,
        role: TeamRole,
    ) -> bool {
        self.role == role
    }

    fn compare_by(
        &self,
        other: &Self,
        key: TeamSortKey,
    ) -> Ordering {
        match key {
            TeamSortKey::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            TeamSortKey::Team => self.team.to_lowercase().cmp(&other.team.to_lowercase()),
            TeamSortKey::ActiveApplications => {
                self.active_applications.cmp(&other.active_applications)
            }
        }
    }
}
