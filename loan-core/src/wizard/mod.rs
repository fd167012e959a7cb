//! The linear application wizard: step definitions, the forward gate, and
//! a persisted session that ties them to a [`FormStore`](crate::store::FormStore).

mod gate;
mod session;
mod step;

pub use gate::{Navigation, can_advance, missing_fields};
pub use session::{Progress, SessionError, WizardSession};
pub use step::{Step, Wizard, WizardError};
