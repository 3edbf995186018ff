//! Page fetch contract
//!
//! Defines the request/response shapes of a single upstream page fetch and
//! the [`PageFetcher`] trait the aggregator drives.

use crate::error::Result;
use crate::types::{SortBy, SortOrder};
use async_trait::async_trait;

/// Parameters of one upstream page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Upstream identifier of the artist
    pub resource_id: String,
    /// 1-based page number
    pub page: u32,
    /// Sort criterion, passed through unchanged
    pub sort_by: SortBy,
    /// Sort direction, passed through unchanged
    pub sort_order: SortOrder,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn new(resource_id: impl Into<String>, sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            resource_id: resource_id.into(),
            page: 1,
            sort_by,
            sort_order,
        }
    }

    /// Same query, different page
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// One decoded upstream page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse<T> {
    /// Items on this page, in upstream order
    pub items: Vec<T>,
    /// Grand total across all pages as reported by upstream
    pub total_item_count: u64,
}

impl<T> PageResponse<T> {
    /// Create a page response
    pub fn new(items: Vec<T>, total_item_count: u64) -> Self {
        Self {
            items,
            total_item_count,
        }
    }

    /// Number of items carried by this page
    pub fn items_on_page(&self) -> usize {
        self.items.len()
    }
}

/// Fetches a single page of a paginated upstream listing
///
/// Implementations make exactly one outbound call per invocation and never
/// retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type produced by this fetcher
    type Item: Send;

    /// Fetch and decode one page
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<Self::Item>>;
}
