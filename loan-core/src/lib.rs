pub mod admin;
pub mod calculations;
pub mod models;
pub mod store;
pub mod wizard;

pub use models::*;
pub use store::{FormStore, StoreError};
pub use wizard::{SessionError, Wizard, WizardSession};
