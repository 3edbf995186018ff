//! Artist listing service
//!
//! Owns one aggregator per listing kind and applies the boundary's `page`
//! semantics: no page (or page 0) returns the full listing, page `n >= 1`
//! returns that single upstream page.

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::Aggregator;
use crate::types::{Item, ResourceKind, SortBy, SortOrder};
use crate::upstream::{CatalogFetcher, PageRequest};
use serde::Deserialize;
use tracing::debug;

/// Listing parameters accepted at the boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Single upstream page to return; absent or 0 means every page
    pub page: Option<u32>,
    /// Sort criterion (default: popularity)
    pub sort_by: Option<SortBy>,
    /// Sort direction (default: desc)
    pub sort_order: Option<SortOrder>,
}

/// Items returned for one listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Accumulated count for full listings, upstream grand total for single pages
    pub total: u64,
    /// Page served, when a single page was requested
    pub page: Option<u32>,
    /// Items in upstream order
    pub items: Vec<Item>,
}

/// Songs and albums aggregators sharing one upstream HTTP client
#[derive(Debug, Clone)]
pub struct Gateway {
    songs: Aggregator<CatalogFetcher>,
    albums: Aggregator<CatalogFetcher>,
}

impl Gateway {
    /// Build the gateway from a validated configuration
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.upstream.http_client_config())?;

        let songs = CatalogFetcher::songs(client.clone(), &config.upstream);
        let albums = CatalogFetcher::albums(client, &config.upstream);

        Ok(Self {
            songs: Aggregator::with_config(songs, config.aggregation.clone()),
            albums: Aggregator::with_config(albums, config.aggregation.clone()),
        })
    }

    /// Aggregator serving a listing kind
    pub fn aggregator(&self, kind: ResourceKind) -> &Aggregator<CatalogFetcher> {
        match kind {
            ResourceKind::Songs => &self.songs,
            ResourceKind::Albums => &self.albums,
        }
    }

    /// List an artist's songs or albums
    pub async fn list(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        query: ListQuery,
    ) -> Result<Listing> {
        let resource_id = resource_id.trim();
        if resource_id.is_empty() {
            return Err(Error::invalid_request("artist id must not be empty"));
        }

        let sort_by = query.sort_by.unwrap_or_default();
        let sort_order = query.sort_order.unwrap_or_default();
        let aggregator = self.aggregator(kind);

        match query.page {
            None | Some(0) => {
                debug!("Listing all {kind} for {resource_id} ({sort_by} {sort_order})");
                let result = aggregator.aggregate(resource_id, sort_by, sort_order).await?;
                Ok(Listing {
                    total: result.total as u64,
                    page: None,
                    items: result.items,
                })
            }
            Some(page) => {
                debug!("Listing {kind} page {page} for {resource_id} ({sort_by} {sort_order})");
                let request = PageRequest::new(resource_id, sort_by, sort_order).with_page(page);
                let response = aggregator.fetch_page(&request).await?;
                Ok(Listing {
                    total: response.total_item_count,
                    page: Some(page),
                    items: response.items,
                })
            }
        }
    }
}
