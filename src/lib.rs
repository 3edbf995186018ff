// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Catalog Gateway
//!
//! A typed HTTP gateway in front of a third-party music catalog API.
//! Re-exposes artist songs and artist albums, walking every upstream page
//! and returning one merged listing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_gateway::{Gateway, GatewayConfig, ListQuery, ResourceKind, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GatewayConfig::load(None)?;
//!     let gateway = Gateway::from_config(&config)?;
//!
//!     let songs = gateway
//!         .list(ResourceKind::Songs, "1274170", ListQuery::default())
//!         .await?;
//!     println!("{} songs", songs.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │          HTTP boundary (axum)  /  CLI (clap)                 │
//! │   GET /artists/{id}/songs     GET /artists/{id}/albums       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Gateway::list
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                  Aggregator (pagination)                     │
//! │     Fetching(1) → Continue(n) → … → Done, verified layout    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ PageFetcher::fetch_page
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │      CatalogFetcher (upstream)  →  HttpClient (reqwest)      │
//! │      timeout · rate limit · error classification             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the gateway
pub mod error;

/// Sort criteria, resource kinds and catalog items
pub mod types;

/// Configuration loading
pub mod config;

/// HTTP client with timeout and rate limiting
pub mod http;

/// Upstream catalog page fetcher
pub mod upstream;

/// Pagination aggregation
pub mod pagination;

/// Artist listing service
pub mod gateway;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use gateway::{Gateway, ListQuery, Listing};
pub use pagination::{AggregatedResult, Aggregator};
pub use types::*;
pub use upstream::{CatalogFetcher, PageFetcher, PageRequest, PageResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
