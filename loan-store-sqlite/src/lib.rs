//! SQLite backend for [`loan_core::FormStore`].

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteStore;
