pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::{InMemoryStore, InMemoryStoreFactory};
pub use repository::{FormStore, StoreError};
