use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::constants::QueuedOperation;

/// A torrent, usenet or web download waiting for a free slot.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct QueuedDownload {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub magnet: String,
    pub torrent_file: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlQueuedTorrentRequest {
    pub queued_id: i64,
    pub operation: QueuedOperation,
}
