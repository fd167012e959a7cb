use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::choice_enum;
use crate::calculations::common::round_half_up;

choice_enum! {
    /// Where an application sits in the brokerage pipeline.
    ///
    /// The post-approval stages (accepted, signing, settled) drive the
    /// customer-facing status pages.
    ApplicationStatus {
        Draft => ("draft", "Draft"),
        Submitted => ("submitted", "Submitted"),
        UnderReview => ("under_review", "Under review"),
        ConditionallyApproved => ("conditionally_approved", "Conditionally approved"),
        Approved => ("approved", "Approved"),
        Accepted => ("accepted", "Offer accepted"),
        Signing => ("signing", "Signing documents"),
        Settled => ("settled", "Settled"),
        Declined => ("declined", "Declined"),
        Withdrawn => ("withdrawn", "Withdrawn"),
    }
}

impl ApplicationStatus {
    /// Settled, declined and withdrawn applications never move again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Declined | Self::Withdrawn)
    }

    /// The next stage on the happy path, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Submitted),
            Self::Submitted => Some(Self::UnderReview),
            Self::UnderReview => Some(Self::ConditionallyApproved),
            Self::ConditionallyApproved => Some(Self::Approved),
            Self::Approved => Some(Self::Accepted),
            Self::Accepted => Some(Self::Signing),
            Self::Signing => Some(Self::Settled),
            Self::Settled | Self::Declined | Self::Withdrawn => None,
        }
    }

    pub fn can_transition_to(
        &self,
        target: Self,
    ) -> bool {
        if self.is_terminal() {
            return false;
        }

        match target {
            Self::Withdrawn => true,
            Self::Declined => matches!(
                self,
                Self::Submitted | Self::UnderReview | Self::ConditionallyApproved
            ),
            _ => self.next() == Some(target),
        }
    }
}

/// An application as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub reference: String,
    pub applicant_name: String,
    pub email: String,
    pub loan_amount: Decimal,
    pub property_value: Decimal,
    pub status: ApplicationStatus,
    pub broker: Option<String>,
    pub lodged_on: NaiveDate,
}

impl ApplicationRecord {
    /// Loan-to-value ratio as a percentage rounded to cents.
    ///
    /// `None` when the property value is zero.
    pub fn loan_to_value_ratio(&self) -> Option<Decimal> {
        if self.property_value.is_zero() {
            return None;
        }
        let ratio = self.loan_amount / self.property_value * Decimal::ONE_HUNDRED;
        Some(round_half_up(ratio))
    }
}
