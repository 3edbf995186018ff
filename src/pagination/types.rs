//! Pagination types
//!
//! The termination logic of the aggregator lives here as plain synchronous
//! state so it can be exercised without any I/O.

use crate::error::{Error, Result};
use serde::Serialize;
use tracing::warn;

/// Result of processing a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page next
    Continue(u32),
    /// Every page has been retrieved
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Page size and grand total, fixed by the first page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Items per full page
    pub page_size: u64,
    /// Grand total across all pages
    pub total_items: u64,
}

impl PageLayout {
    /// Number of pages implied by the layout
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.page_size)
    }

    /// Item count a consistent upstream returns for `page`
    pub fn expected_items(&self, page: u32) -> u64 {
        let before = u64::from(page.saturating_sub(1)) * self.page_size;
        self.total_items.saturating_sub(before).min(self.page_size)
    }

    /// Reject a page whose counts contradict the layout
    pub fn verify(&self, page: u32, items_on_page: u64, total_items: u64) -> Result<()> {
        if total_items != self.total_items {
            return Err(Error::shape_mismatch(format!(
                "total item count changed from {} to {} on page {page}",
                self.total_items, total_items
            )));
        }

        let expected = self.expected_items(page);
        if items_on_page != expected {
            return Err(Error::shape_mismatch(format!(
                "page {page} carries {items_on_page} items, expected {expected}"
            )));
        }

        Ok(())
    }
}

/// Tracks progress through one logical listing
///
/// Starts at page 1 with a provisional page count of 1. The first page fixes
/// the [`PageLayout`]; every later page must agree with it. A first page that
/// is empty, or already holds at least the reported total, ends the walk.
#[derive(Debug, Clone)]
pub struct PaginationState {
    page: u32,
    total_pages: u64,
    layout: Option<PageLayout>,
    fetched: u64,
    done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            layout: None,
            fetched: 0,
            done: false,
        }
    }

    /// Page to fetch next
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Pages processed so far
    pub fn pages_fetched(&self) -> u32 {
        self.page - 1
    }

    /// Current page count
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Layout established by the first page
    pub fn layout(&self) -> Option<PageLayout> {
        self.layout
    }

    /// Items accounted for so far
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Is pagination complete?
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Account for the page just fetched and decide what comes next
    pub fn process_page(&mut self, items_on_page: usize, total_items: u64) -> Result<NextPage> {
        if self.done {
            return Ok(NextPage::Done);
        }

        let items = items_on_page as u64;
        let layout = match self.layout {
            Some(layout) => {
                layout.verify(self.page, items, total_items)?;
                layout
            }
            None if items == 0 => {
                if total_items > 0 {
                    warn!("First page is empty but upstream reports {total_items} items");
                }
                self.page += 1;
                self.done = true;
                return Ok(NextPage::Done);
            }
            None => {
                if items > total_items {
                    warn!("First page carries {items} items but upstream reports {total_items}");
                }
                let layout = PageLayout {
                    page_size: items,
                    total_items,
                };
                self.layout = Some(layout);
                layout
            }
        };

        self.fetched += items;
        self.total_pages = layout.total_pages().max(1);
        self.page += 1;

        if u64::from(self.page) > self.total_pages {
            self.done = true;
            Ok(NextPage::Done)
        } else {
            Ok(NextPage::Continue(self.page))
        }
    }
}

/// Every item of a listing, merged across pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedResult<T> {
    /// Number of items actually accumulated
    pub total: usize,
    /// Items in upstream order
    pub items: Vec<T>,
}

impl<T> AggregatedResult<T> {
    /// Wrap accumulated items
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }

    /// An empty result
    pub fn empty() -> Self {
        Self::from_items(Vec::new())
    }

    /// Project every item into another shape
    pub fn map<U, F>(self, f: F) -> AggregatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        AggregatedResult::from_items(self.items.into_iter().map(f).collect())
    }
}
