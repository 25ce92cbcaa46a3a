//! Data records mirroring TorBox API payloads.
//!
//! Most records derive their decoding directly and tolerate `null` or missing
//! fields. [`Torrent`] and [`Metadata`] normalize irregular wire shapes after decoding.

mod downloads;
mod envelope;
mod file;
mod metadata;
mod queued;
mod search;
mod torrent;
mod user;

pub use downloads::{
    ControlUsenetRequest, ControlWebDownloadRequest, CreateUsenetRequest,
    CreateWebDownloadRequest, UsenetDownload, WebDownload,
};
pub use envelope::Envelope;
pub use file::File;
pub use metadata::{Metadata, Title, Trailer};
pub use queued::{ControlQueuedTorrentRequest, QueuedDownload};
pub use search::{CachedItem, SearchResult, StoreSearchRequest, TorrentInfo, TorrentLookup};
pub use torrent::{
    ControlActiveTorrentRequest, CreateTorrentRequest, ProgressDetails, Torrent, TrackerDetails,
};
pub use user::{
    AddReferralRequest, AddRssRequest, ControlRssRequest, IntegrationAuthRequest, IntegrationJob,
    ModifyRssRequest, Notification, RefreshedToken, RssFeed, Stats, User,
};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a field the API sends as either a string or a number into a string.
/// `null` and other shapes become empty.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
