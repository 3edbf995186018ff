//! Upstream fetcher module
//!
//! Issues one GET per page against the catalog API and decodes the body into
//! a typed [`PageResponse`].
//!
//! # Failure modes
//!
//! - Transport failure, timeout or non-2xx status: `UpstreamUnavailable`
//! - Body that does not match the expected listing: `UpstreamShapeMismatch`
//! - HTTP 404 or a `null` listing container: `ResourceNotFound`

mod dto;
mod fetcher;
mod types;

pub use fetcher::CatalogFetcher;
pub use types::{PageFetcher, PageRequest, PageResponse};
