//! Pagination module
//!
//! Aggregates a paginated upstream listing into one ordered collection.
//!
//! # Overview
//!
//! The upstream catalog reveals its page size and grand total only in the
//! body of a page, so the walk is read-then-decide:
//!
//! ```text
//! Fetching(1) ──► process_page ──► Continue(n) ──► Fetching(n) ─┐
//!                      ▲                                        │
//!                      └────────────────────────────────────────┘
//!                      └──► Done
//! ```
//!
//! The first page fixes the [`PageLayout`]. Later pages that disagree with
//! it abort the walk instead of silently truncating or overrunning it.

mod aggregator;
mod types;

pub use aggregator::Aggregator;
pub use types::{AggregatedResult, NextPage, PageLayout, PaginationState};
