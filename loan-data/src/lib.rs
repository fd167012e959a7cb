//! CSV loaders for the admin dashboard's application and team lists.

mod loader;

pub use loader::{ApplicationLoader, ApplicationRow, LoaderError, TeamLoader, TeamRow};
