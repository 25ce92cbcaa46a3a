use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::{File, Metadata, Torrent};

/// One entry of a cache check in `format=list` mode.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CachedItem {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

/// Swarm information for a hash, as reported by `api/torrents/torrentinfo`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TorrentInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub trackers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub seeds: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub peers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

/// A hit from `api/torrents/search`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub magnet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_known_seeders: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_known_peers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub age: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tracker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cached: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub owned: bool,
}

impl SearchResult {
    /// The best available display title.
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            &self.raw_title
        } else {
            &self.name
        }
    }
}

/// Body of `POST api/torrents/storesearch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSearchRequest {
    pub query: String,
}

/// Search API answer for a torrent lookup by media id.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TorrentLookup {
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "null_as_default")]
    pub torrents: Vec<Torrent>,
}
