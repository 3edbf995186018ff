//! Catalog API page fetcher

use super::dto::{AlbumsEnvelope, SongsEnvelope};
use super::types::{PageFetcher, PageRequest, PageResponse};
use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Item, ResourceKind};
use async_trait::async_trait;
use tracing::debug;

/// Fetches artist listing pages from the upstream catalog API
///
/// Holds only configuration and a shared HTTP client, so one instance can
/// serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: HttpClient,
    kind: ResourceKind,
    path: String,
}

impl CatalogFetcher {
    /// Create a fetcher for an arbitrary endpoint path
    pub fn new(client: HttpClient, kind: ResourceKind, path: impl Into<String>) -> Self {
        Self {
            client,
            kind,
            path: path.into(),
        }
    }

    /// Fetcher for the artist songs endpoint
    pub fn songs(client: HttpClient, config: &UpstreamConfig) -> Self {
        Self::new(client, ResourceKind::Songs, &config.songs_path)
    }

    /// Fetcher for the artist albums endpoint
    pub fn albums(client: HttpClient, config: &UpstreamConfig) -> Self {
        Self::new(client, ResourceKind::Albums, &config.albums_path)
    }

    /// Listing kind served by this fetcher
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn request_config(request: &PageRequest) -> RequestConfig {
        RequestConfig::new()
            .query("id", &request.resource_id)
            .query("page", request.page)
            .query("sort_order", request.sort_order)
            .query("category", request.sort_by)
    }

    async fn decode(&self, request: &PageRequest) -> Result<Option<(Vec<Item>, u64)>> {
        let config = Self::request_config(request);
        let listing = match self.kind {
            ResourceKind::Songs => self
                .client
                .get_json::<SongsEnvelope>(&self.path, config)
                .await?
                .top_songs
                .map(|l| (l.songs, l.total)),
            ResourceKind::Albums => self
                .client
                .get_json::<AlbumsEnvelope>(&self.path, config)
                .await?
                .top_albums
                .map(|l| (l.albums, l.total)),
        };
        Ok(listing)
    }
}

#[async_trait]
impl PageFetcher for CatalogFetcher {
    type Item = Item;

    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<Item>> {
        let listing = match self.decode(request).await {
            Ok(listing) => listing,
            Err(e) if e.upstream_status_code() == Some(404) => None,
            Err(e) => return Err(e),
        };

        let Some((items, total)) = listing else {
            return Err(Error::not_found(self.kind, &request.resource_id));
        };

        debug!(
            "Fetched {} page {} for {}: {} items (total {})",
            self.kind,
            request.page,
            request.resource_id,
            items.len(),
            total
        );

        Ok(PageResponse::new(items, total))
    }
}
