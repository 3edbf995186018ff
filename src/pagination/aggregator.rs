//! Pagination aggregator
//!
//! Walks every page of one upstream listing and merges the items.

use super::types::{AggregatedResult, NextPage, PaginationState};
use crate::config::AggregationConfig;
use crate::error::{Error, Result};
use crate::types::{SortBy, SortOrder};
use crate::upstream::{PageFetcher, PageRequest, PageResponse};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

/// Collects all pages of an upstream listing into one result
///
/// Holds no per-request state: a single instance is shared by every
/// concurrent request. Dropping the future returned by
/// [`aggregate`](Self::aggregate) drops any in-flight fetch and stops the
/// walk.
#[derive(Debug, Clone)]
pub struct Aggregator<F> {
    fetcher: F,
    config: AggregationConfig,
}

impl<F: PageFetcher> Aggregator<F> {
    /// Create an aggregator with default limits
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, AggregationConfig::default())
    }

    /// Create an aggregator with custom limits
    pub fn with_config(fetcher: F, config: AggregationConfig) -> Self {
        Self { fetcher, config }
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch every page of a listing and merge the items in upstream order
    ///
    /// Any failed page aborts the whole call; partial results are never
    /// returned.
    pub async fn aggregate(
        &self,
        resource_id: &str,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<AggregatedResult<F::Item>> {
        let base = PageRequest::new(resource_id, sort_by, sort_order);
        let mut state = PaginationState::new();
        let mut accumulated = Vec::new();

        let first = self.fetcher.fetch_page(&base).await?;
        let mut next = absorb(&mut state, &mut accumulated, first)?;

        if next.is_continue() {
            self.check_page_limit(state.total_pages())?;
        }

        if next.is_continue() && self.config.prefetch_concurrency > 1 {
            self.fetch_remaining_concurrently(&base, &mut state, &mut accumulated)
                .await?;
        } else {
            while let NextPage::Continue(page) = next {
                let response = self.fetcher.fetch_page(&base.with_page(page)).await?;
                next = absorb(&mut state, &mut accumulated, response)?;
            }
        }

        info!(
            "Aggregated {} items for {} in {} pages",
            accumulated.len(),
            resource_id,
            state.pages_fetched()
        );

        Ok(AggregatedResult::from_items(accumulated))
    }

    /// Fetch exactly one page of a listing
    pub async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<F::Item>> {
        if request.page == 0 {
            return Err(Error::invalid_request("page numbers start at 1"));
        }
        self.fetcher.fetch_page(request).await
    }

    /// Fetch pages 2..=N with bounded concurrency, absorbing them in order
    async fn fetch_remaining_concurrently(
        &self,
        base: &PageRequest,
        state: &mut PaginationState,
        accumulated: &mut Vec<F::Item>,
    ) -> Result<()> {
        // The page limit check guarantees this fits in u32
        let last = state.total_pages() as u32;
        let fetcher = &self.fetcher;

        let mut pages = stream::iter(state.page()..=last)
            .map(|page| {
                let request = base.with_page(page);
                async move { fetcher.fetch_page(&request).await }
            })
            .buffered(self.config.prefetch_concurrency);

        while let Some(response) = pages.try_next().await? {
            if absorb(state, accumulated, response)?.is_done() {
                break;
            }
        }

        Ok(())
    }

    fn check_page_limit(&self, total_pages: u64) -> Result<()> {
        if total_pages > u64::from(self.config.max_pages) {
            return Err(Error::PageLimitExceeded {
                total_pages,
                max_pages: self.config.max_pages,
            });
        }
        Ok(())
    }
}

/// Feed one page into the state and keep its items
fn absorb<T>(
    state: &mut PaginationState,
    accumulated: &mut Vec<T>,
    response: PageResponse<T>,
) -> Result<NextPage> {
    let page = state.page();
    let next = state.process_page(response.items_on_page(), response.total_item_count)?;

    debug!(
        "Page {}/{}: {} items, {} accumulated",
        page,
        state.total_pages(),
        response.items_on_page(),
        accumulated.len() + response.items_on_page()
    );

    accumulated.extend(response.items);
    Ok(next)
}
