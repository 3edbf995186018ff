//! Upstream catalog wire format

use crate::types::Item;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Body of the artist songs endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct SongsEnvelope {
    #[serde(rename = "topSongs", deserialize_with = "required_nullable")]
    pub top_songs: Option<SongListing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongListing {
    pub songs: Vec<Item>,
    #[serde(deserialize_with = "count")]
    pub total: u64,
}

/// Body of the artist albums endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct AlbumsEnvelope {
    #[serde(rename = "topAlbums", deserialize_with = "required_nullable")]
    pub top_albums: Option<AlbumListing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumListing {
    pub albums: Vec<Item>,
    #[serde(deserialize_with = "count")]
    pub total: u64,
}

/// The field must be present; `null` means the artist is unknown
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Totals arrive either as JSON numbers or as numeric strings
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid total count '{s}'"))),
    }
}
