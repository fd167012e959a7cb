//! Search, filter, sort and paginate an in-memory slice of records.
//!
//! The dashboard keeps its records client side; a [`ListQuery`] describes
//! one view of them and [`query`] produces the matching [`Page`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A record type the admin dashboard can list.
pub trait Listing {
    /// Value a view can narrow the records to (status, role, ...).
    type Filter: Copy + PartialEq;
    /// Column a view can sort by.
    type SortKey: Copy;

    /// Text fields that free-text search looks in.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_filter(
        &self,
        filter: Self::Filter,
    ) -> bool;

    fn compare_by(
        &self,
        other: &Self,
        key: Self::SortKey,
    ) -> Ordering;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K> SortSpec<K> {
    pub fn ascending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// One view over a record list. Every part is optional; the default query
/// returns the first page of everything in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F, K> {
    pub search: String,
    pub filter: Option<F>,
    pub sort: Option<SortSpec<K>>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl<F, K> Default for ListQuery<F, K> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<F, K> ListQuery<F, K> {
    pub fn search(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        self.search = text.into();
        self
    }

    pub fn filter(
        mut self,
        filter: F,
    ) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(
        mut self,
        sort: SortSpec<K>,
    ) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(
        mut self,
        page: usize,
        page_size: usize,
    ) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// The page actually returned, after clamping.
    pub page: usize,
    pub page_size: usize,
    /// Records matching search and filter, across all pages.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Apply `query` to `records`.
///
/// Out-of-range paging never fails: a zero page size counts as one, page 0
/// counts as page 1, and a page past the end returns the last page.
pub fn query<'a, T: Listing>(
    records: &'a [T],
    query: &ListQuery<T::Filter, T::SortKey>,
) -> Page<'a, T> {
    let needle = query.search.trim().to_lowercase();

    let mut matches: Vec<&T> = records
        .iter()
        .filter(|record| needle.is_empty() || matches_search(*record, &needle))
        .filter(|record| query.filter.is_none_or(|filter| record.matches_filter(filter)))
        .collect();

    if let Some(sort) = query.sort {
        // sort_by is stable, so ties keep source order in both directions
        matches.sort_by(|a, b| {
            let ordering = a.compare_by(b, sort.key);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let page_size = query.page_size.max(1);
    let total_items = matches.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let items = matches
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

fn matches_search<T: Listing>(
    record: &T,
    needle: &str,
) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
