mod application;
pub(crate) mod choice;
mod employment;
mod field;
mod financial;
mod form_state;
mod loan_requirements;
mod personal;
mod property;
mod team;

pub use application::{ApplicationRecord, ApplicationStatus};
pub use choice::Choice;
pub use employment::{EmploymentDetails, EmploymentType};
pub use field::{Field, FieldError, FieldValue, Requirement};
pub use financial::FinancialPosition;
pub use form_state::{Declarations, FormState};
pub use loan_requirements::{LoanPurpose, LoanRequirements, RateType, RepaymentType};
pub use personal::{MaritalStatus, PersonalDetails, ResidencyStatus};
pub use property::{AustralianState, PropertyDetails, PropertyPurpose, PropertyType};
pub use team::{TeamMember, TeamRole};
