use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{Field, Requirement};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,

    #[error("step at position {position} has index {index}; indices must run 0, 1, 2, ...")]
    NonContiguousIndex { position: usize, index: usize },
}

/// One page of the wizard.
///
/// `fields` lists everything the page collects, in display order.
/// `required_fields` is the subset the gate checks before moving on, each
/// with its own [`Requirement`]. Both are fixed once the step is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    index: usize,
    name: String,
    fields: Vec<Field>,
    required_fields: BTreeMap<Field, Requirement>,
}

impl Step {
    pub fn new(
        index: usize,
        name: impl Into<String>,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            fields: Vec::new(),
            required_fields: BTreeMap::new(),
        }
    }

    /// Collect `field` on this step without requiring it.
    pub fn optional(
        mut self,
        field: Field,
    ) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    /// Require `field` to be present.
    pub fn require(
        self,
        field: Field,
    ) -> Self {
        self.require_with(field, Requirement::Present)
    }

    pub fn require_with(
        mut self,
        field: Field,
        requirement: Requirement,
    ) -> Self {
        self.required_fields.insert(field, requirement);
        self.optional(field)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn required_fields(&self) -> &BTreeMap<Field, Requirement> {
        &self.required_fields
    }

    pub fn is_required(
        &self,
        field: Field,
    ) -> bool {
        self.required_fields.contains_key(&field)
    }
}

/// An ordered, non-empty list of steps with contiguous indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    steps: Vec<Step>,
}

impl Wizard {
    /// # Errors
    ///
    /// [`WizardError::NoSteps`] for an empty list and
    /// [`WizardError::NonContiguousIndex`] when a step's index does not
    /// match its position.
    pub fn new(steps: Vec<Step>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        if let Some((position, step)) = steps
            .iter()
            .enumerate()
            .find(|(position, step)| step.index != *position)
        {
            return Err(WizardError::NonContiguousIndex {
                position,
                index: step.index,
            });
        }
        Ok(Self { steps })
    }

    /// The consumer home-loan application.
    pub fn home_loan() -> Self {
        let steps = vec![
            Step::new(0, "Personal details")
                .require(Field::FullName)
                .require(Field::Email)
                .require(Field::Phone)
                .require(Field::DateOfBirth)
                .require(Field::ResidencyStatus)
                .optional(Field::MaritalStatus)
                .optional(Field::Dependants)
                .optional(Field::CurrentAddress),
            Step::new(1, "Property")
                .require(Field::PropertyPurpose)
                .require(Field::PropertyType)
                .require(Field::PropertyState)
                .require_with(Field::PropertyValue, Requirement::Positive)
                .optional(Field::PropertyAddress)
                .optional(Field::FirstHomeBuyer)
                .optional(Field::HasFoundProperty),
            Step::new(2, "Employment")
                .require(Field::EmploymentType)
                .require(Field::AnnualIncome)
                .optional(Field::EmployerName)
                .optional(Field::Occupation)
                .optional(Field::YearsEmployed),
            Step::new(3, "Financial position")
                .require(Field::MonthlyExpenses)
                .require(Field::Savings)
                .optional(Field::ExistingDebts)
                .optional(Field::CreditCardLimits)
                .optional(Field::OwnsOtherProperty),
            Step::new(4, "Loan requirements")
                .require_with(Field::LoanAmount, Requirement::Positive)
                .require_with(Field::LoanTermYears, Requirement::Positive)
                .require(Field::LoanPurpose)
                .require(Field::RepaymentType)
                .optional(Field::DepositAmount)
                .optional(Field::RateType)
                .optional(Field::InterestRate),
            Step::new(5, "Review and submit")
                .require_with(Field::AgreeToTerms, Requirement::Affirmed)
                .require_with(Field::AgreeToPrivacy, Requirement::Affirmed),
        ];

        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the submission step.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn step(
        &self,
        index: usize,
    ) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The step at `index`, or the last step when `index` is past the end.
    pub fn step_clamped(
        &self,
        index: usize,
    ) -> &Step {
        &self.steps[index.min(self.last_index())]
    }
}
