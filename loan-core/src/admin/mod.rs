//! Admin dashboard listings over application and team records.

mod listing;
mod records;

pub use listing::{DEFAULT_PAGE_SIZE, ListQuery, Listing, Page, SortDirection, SortSpec, query};
pub use records::{ApplicationSortKey, TeamSortKey};
