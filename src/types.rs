//! Common types used throughout the catalog gateway
//!
//! Sort criteria, resource kinds and the catalog item shape shared by the
//! upstream fetcher, the aggregator and the HTTP boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Sorting
// ============================================================================

/// Criterion the upstream catalog sorts a listing by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most popular first (in descending order)
    #[default]
    Popularity,
    /// Release date
    Latest,
    /// Name
    Alphabetical,
}

impl SortBy {
    /// Wire value sent as the upstream `category` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Latest => "latest",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the upstream sort
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value sent as the upstream `sort_order` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Kind of artist listing exposed by the upstream catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Artist songs (`topSongs.songs`)
    Songs,
    /// Artist albums (`topAlbums.albums`)
    Albums,
}

impl ResourceKind {
    /// Lowercase name used in logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Albums => "albums",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry reduced to the fields the gateway keeps
///
/// Upstream payloads are much richer; everything except `id` and `name` is
/// dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Upstream identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl Item {
    /// Create a new item
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
