//! Forward gating and navigation between wizard steps.
//!
//! Nothing here fails. Moves that are not allowed leave the index where it
//! was and report `rejected`; the host decides what to show.

use std::collections::BTreeSet;

use crate::models::{Field, FormState};

use super::step::{Step, Wizard};

/// Where the wizard ended up after a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub step: usize,
    pub rejected: bool,
    /// Required fields that blocked an advance. Empty otherwise.
    pub missing: Vec<Field>,
}

impl Navigation {
    fn moved(step: usize) -> Self {
        Self {
            step,
            rejected: false,
            missing: Vec::new(),
        }
    }

    fn stayed(
        step: usize,
        missing: Vec<Field>,
    ) -> Self {
        Self {
            step,
            rejected: true,
            missing,
        }
    }
}

/// `true` when every required field of `step` meets its requirement.
pub fn can_advance(
    step: &Step,
    form: &FormState,
) -> bool {
    step.required_fields()
        .iter()
        .all(|(field, requirement)| form.value(*field).satisfies(*requirement))
}

/// Required fields of `step` that do not yet meet their requirement, in
/// display order.
pub fn missing_fields(
    step: &Step,
    form: &FormState,
) -> Vec<Field> {
    step.fields()
        .iter()
        .copied()
        .filter(|field| {
            step.required_fields()
                .get(field)
                .is_some_and(|requirement| !form.value(*field).satisfies(*requirement))
        })
        .collect()
}

impl Wizard {
    /// One step forward, staying put on the last step.
    pub fn next_step(
        &self,
        current: usize,
    ) -> usize {
        current.saturating_add(1).min(self.last_index())
    }

    /// One step back, staying put on the first step.
    pub fn previous_step(
        &self,
        current: usize,
    ) -> usize {
        current.saturating_sub(1).min(self.last_index())
    }

    /// A jump may revisit any earlier step, or go forward to a step that was
    /// already completed. Targets past the last step are never allowed.
    pub fn can_jump(
        &self,
        target: usize,
        current: usize,
        completed: &BTreeSet<usize>,
    ) -> bool {
        target <= self.last_index() && (target <= current || completed.contains(&target))
    }

    pub fn request_advance(
        &self,
        current: usize,
        form: &FormState,
    ) -> Navigation {
        let step = self.step_clamped(current);
        let missing = missing_fields(step, form);

        if missing.is_empty() {
            Navigation::moved(self.next_step(step.index()))
        } else {
            Navigation::stayed(step.index(), missing)
        }
    }

    pub fn request_back(
        &self,
        current: usize,
    ) -> usize {
        self.previous_step(current)
    }

    pub fn request_jump(
        &self,
        target: usize,
        current: usize,
        completed: &BTreeSet<usize>,
    ) -> Navigation {
        if self.can_jump(target, current, completed) {
            Navigation::moved(target)
        } else {
            Navigation::stayed(current.min(self.last_index()), Vec::new())
        }
    }
}
