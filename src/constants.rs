//! Service roots, endpoint paths and the fixed vocabularies the API uses.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const API_GENERAL_BASE_URL: &str = "https://api.torbox.app/v1";
pub const API_SEARCH_BASE_URL: &str = "https://search-api.torbox.app";

// General API
pub const PATH_TORRENTS_GET_ACTIVE: &str = "api/torrents/mylist";
pub const PATH_TORRENTS_GET_DOWNLOAD_URL: &str = "api/torrents/requestdl";
pub const PATH_TORRENTS_CREATE: &str = "api/torrents/createtorrent";
pub const PATH_TORRENTS_CONTROL_ACTIVE: &str = "api/torrents/controltorrent";
pub const PATH_TORRENTS_CHECK_CACHED: &str = "api/torrents/checkcached";
pub const PATH_TORRENTS_INFO: &str = "api/torrents/torrentinfo";
pub const PATH_TORRENTS_EXPORT_DATA: &str = "api/torrents/exportdata";
pub const PATH_TORRENTS_SEARCH: &str = "api/torrents/search";
pub const PATH_TORRENTS_STORE_SEARCH: &str = "api/torrents/storesearch";

pub const PATH_TORRENTS_GET_QUEUED: &str = "api/queued/getqueued";
pub const PATH_TORRENTS_CONTROL_QUEUED: &str = "api/queued/controlqueued";

pub const PATH_USENET_CREATE: &str = "api/usenet/createusenetdownload";
pub const PATH_USENET_CONTROL: &str = "api/usenet/controlusenetdownload";
pub const PATH_USENET_GET_DOWNLOAD: &str = "api/usenet/requestdl";
pub const PATH_USENET_GET_LIST: &str = "api/usenet/mylist";
pub const PATH_USENET_CHECK_CACHED: &str = "api/usenet/checkcached";

pub const PATH_WEBDL_CREATE: &str = "api/webdl/createwebdownload";
pub const PATH_WEBDL_CONTROL: &str = "api/webdl/controlwebdownload";

pub const PATH_USER_ME: &str = "api/user/me";
pub const PATH_USER_REFRESH_TOKEN: &str = "api/user/refreshtoken";
pub const PATH_USER_ADD_REFERRAL: &str = "api/user/addreferral";

pub const PATH_NOTIFICATIONS_RSS: &str = "api/notifications/rss";
pub const PATH_NOTIFICATIONS_LIST: &str = "api/notifications/mynotifications";
pub const PATH_NOTIFICATIONS_CLEAR: &str = "api/notifications/clear";

pub const PATH_RSS_ADD: &str = "api/rss/addrss";
pub const PATH_RSS_CONTROL: &str = "api/rss/controlrss";
pub const PATH_RSS_MODIFY: &str = "api/rss/modifyrss";

pub const PATH_INTEGRATION_GOOGLEDRIVE: &str = "api/integration/googledrive";
pub const PATH_INTEGRATION_DROPBOX: &str = "api/integration/dropbox";
pub const PATH_INTEGRATION_ONEDRIVE: &str = "api/integration/onedrive";
pub const PATH_INTEGRATION_GOFILE: &str = "api/integration/gofile";
pub const PATH_INTEGRATION_1FICHIER: &str = "api/integration/1fichier";
pub const PATH_INTEGRATION_JOBS: &str = "api/integration/jobs";

pub const PATH_STATS: &str = "api/stats";

// Search API
pub const PATH_SEARCH_TORRENTS: &str = "torrents";
pub const PATH_SEARCH_META: &str = "meta";

/// Seeding preference for a new torrent. Sent as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSetting {
    Auto = 1,
    Seed = 2,
    NoSeed = 3,
}

impl SeedSetting {
    pub fn as_form_value(self) -> String {
        (self as u8).to_string()
    }
}

/// Control operations accepted for active torrents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveOperation {
    Reannounce,
    Delete,
    Resume,
    Pause,
}

/// Control operations accepted for queued torrents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueuedOperation {
    Delete,
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsenetOperation {
    Delete,
    Resume,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebDownloadOperation {
    Delete,
    Resume,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RssOperation {
    Update,
    Delete,
    Pause,
    Resume,
}

/// An operation on a torrent whose category (active or queued) is not known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOperation {
    Reannounce,
    Delete,
    Resume,
    Pause,
    Start,
}

impl ControlOperation {
    pub fn for_active(self) -> Option<ActiveOperation> {
        match self {
            ControlOperation::Reannounce => Some(ActiveOperation::Reannounce),
            ControlOperation::Delete => Some(ActiveOperation::Delete),
            ControlOperation::Resume => Some(ActiveOperation::Resume),
            ControlOperation::Pause => Some(ActiveOperation::Pause),
            ControlOperation::Start => None,
        }
    }

    pub fn for_queued(self) -> Option<QueuedOperation> {
        match self {
            ControlOperation::Delete => Some(QueuedOperation::Delete),
            ControlOperation::Start => Some(QueuedOperation::Start),
            _ => None,
        }
    }
}

impl fmt::Display for ControlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlOperation::Reannounce => "reannounce",
            ControlOperation::Delete => "delete",
            ControlOperation::Resume => "resume",
            ControlOperation::Pause => "pause",
            ControlOperation::Start => "start",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ControlOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reannounce" => Ok(ControlOperation::Reannounce),
            "delete" => Ok(ControlOperation::Delete),
            "resume" => Ok(ControlOperation::Resume),
            "pause" => Ok(ControlOperation::Pause),
            "start" => Ok(ControlOperation::Start),
            other => Err(format!(
                "Unknown operation: {}. Expected reannounce, delete, resume, pause, or start.",
                other
            )),
        }
    }
}

/// Download state reported for a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TorrentState {
    CheckingResumeData,
    Checking,
    MetaDl,
    Paused,
    Downloading,
    StalledNoSeeds,
    StalledDl,
    Uploading,
    UploadingNoPeers,
    Completed,
    Cached,
    #[default]
    Unknown,
    /// A state string this client does not recognise.
    Other(String),
}

impl TorrentState {
    /// Whether the data is fully available (not the same as `download_finished`).
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            TorrentState::Completed
                | TorrentState::Cached
                | TorrentState::Uploading
                | TorrentState::UploadingNoPeers
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            TorrentState::CheckingResumeData => "checkingResumeData",
            TorrentState::Checking => "checking",
            TorrentState::MetaDl => "metaDL",
            TorrentState::Paused => "paused",
            TorrentState::Downloading => "downloading",
            TorrentState::StalledNoSeeds => "stalled (no seeds)",
            TorrentState::StalledDl => "stalledDL",
            TorrentState::Uploading => "uploading",
            TorrentState::UploadingNoPeers => "uploading (no peers)",
            TorrentState::Completed => "completed",
            TorrentState::Cached => "cached",
            TorrentState::Unknown => "unknown",
            TorrentState::Other(state) => state,
        }
    }
}

impl From<String> for TorrentState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "checkingResumeData" => TorrentState::CheckingResumeData,
            "checking" => TorrentState::Checking,
            "metaDL" => TorrentState::MetaDl,
            "paused" => TorrentState::Paused,
            "downloading" => TorrentState::Downloading,
            "stalled (no seeds)" => TorrentState::StalledNoSeeds,
            "stalledDL" => TorrentState::StalledDl,
            "uploading" => TorrentState::Uploading,
            "uploading (no peers)" => TorrentState::UploadingNoPeers,
            "completed" => TorrentState::Completed,
            "cached" => TorrentState::Cached,
            "unknown" | "" => TorrentState::Unknown,
            _ => TorrentState::Other(s),
        }
    }
}

impl From<TorrentState> for String {
    fn from(state: TorrentState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for TorrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
