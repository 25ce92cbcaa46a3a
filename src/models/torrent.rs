use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::File;
use super::null_as_default;
use crate::constants::{ActiveOperation, SeedSetting, TorrentState};
use crate::http::FormEncode;
use crate::magnet::Magnet;

/// Seeding and tracker statistics reported alongside a torrent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TrackerDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub inactive_check: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub long_term_seeding: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tracker_message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub seed_torrent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub availability: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ratio: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tracker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub seeds: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub peers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_known_seeders: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_known_leechers: i64,
}

/// Transfer progress of a torrent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProgressDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub download_present: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub download_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_finished: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub total_uploaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_downloaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_state: TorrentState,
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_speed: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_speed: i64,
}

/// An active (or queued) torrent.
///
/// The wire record is irregular: its identifier may arrive as `torrent_id`,
/// `queued_id` or `id`, and timestamps are strings that may be empty. Decoding
/// goes through a raw mirror and normalizes both.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawTorrent")]
pub struct Torrent {
    pub tracker: TrackerDetails,
    pub progress: ProgressDetails,

    pub id: i64,
    pub hash: String,
    pub server: i64,
    pub auth_id: String,
    pub name: String,
    pub magnet: String,
    pub size: i64,
    pub eta: i64,
    pub torrent_file: bool,
    pub cached: bool,
    pub owner: String,
    pub allow_zipped: bool,
    pub short_name: String,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,

    pub files: Vec<File>,
}

impl Torrent {
    pub fn is_downloaded(&self) -> bool {
        self.progress.download_finished
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawTorrent {
    #[serde(flatten)]
    tracker: TrackerDetails,
    #[serde(flatten)]
    progress: ProgressDetails,

    id: Option<i64>,
    torrent_id: Option<i64>,
    queued_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    hash: String,
    #[serde(deserialize_with = "null_as_default")]
    server: i64,
    #[serde(deserialize_with = "null_as_default")]
    auth_id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    magnet: String,
    #[serde(deserialize_with = "null_as_default")]
    size: i64,
    #[serde(deserialize_with = "null_as_default")]
    eta: i64,
    #[serde(deserialize_with = "null_as_default")]
    torrent_file: bool,
    #[serde(deserialize_with = "null_as_default")]
    cached: bool,
    #[serde(deserialize_with = "null_as_default")]
    owner: String,
    #[serde(deserialize_with = "null_as_default")]
    allow_zipped: bool,
    #[serde(deserialize_with = "null_as_default")]
    short_name: String,
    #[serde(deserialize_with = "null_as_default")]
    created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    expires_at: String,
    #[serde(deserialize_with = "null_as_default")]
    files: Vec<File>,
}

impl TryFrom<RawTorrent> for Torrent {
    type Error = String;

    fn try_from(raw: RawTorrent) -> Result<Self, Self::Error> {
        let id = canonical_id(raw.torrent_id, raw.queued_id, raw.id)?;

        Ok(Torrent {
            tracker: raw.tracker,
            progress: raw.progress,
            id,
            hash: raw.hash,
            server: raw.server,
            auth_id: raw.auth_id,
            name: raw.name,
            magnet: raw.magnet,
            size: raw.size,
            eta: raw.eta,
            torrent_file: raw.torrent_file,
            cached: raw.cached,
            owner: raw.owner,
            allow_zipped: raw.allow_zipped,
            short_name: raw.short_name,
            created_at: parse_timestamp("created_at", &raw.created_at)?,
            updated_at: parse_timestamp("updated_at", &raw.updated_at)?,
            expires_at: parse_timestamp("expires_at", &raw.expires_at)?,
            files: raw.files,
        })
    }
}

/// `torrent_id` wins over `queued_id`, which wins over `id`.
fn canonical_id(
    torrent_id: Option<i64>,
    queued_id: Option<i64>,
    id: Option<i64>,
) -> Result<i64, String> {
    match (torrent_id, queued_id) {
        (Some(t), Some(q)) if t != q => Err(format!(
            "ambiguous torrent identifier: torrent_id {} and queued_id {} disagree",
            t, q
        )),
        (Some(t), _) => Ok(t),
        (None, Some(q)) => Ok(q),
        (None, None) => Ok(id.unwrap_or_default()),
    }
}

/// Parses an RFC 3339 timestamp. Timestamps without an offset are taken as UTC.
fn parse_timestamp(field: &str, value: &str) -> Result<Option<DateTime<Utc>>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| format!("invalid {} timestamp '{}': {}", field, value, e))
}

/// Body of `POST api/torrents/createtorrent`.
///
/// Sent as multipart when `file` is set, as a URL-encoded form otherwise.
#[derive(Debug, Clone, Default)]
pub struct CreateTorrentRequest {
    pub magnet: Option<Magnet>,
    pub file: Option<Vec<u8>>,
    pub seed: Option<SeedSetting>,
    pub allow_zip: Option<bool>,
    pub name: Option<String>,
    pub as_queued: Option<bool>,
}

impl CreateTorrentRequest {
    pub fn from_magnet(magnet: Magnet) -> Self {
        Self {
            magnet: Some(magnet),
            ..Self::default()
        }
    }

    pub fn from_file(content: Vec<u8>) -> Self {
        Self {
            file: Some(content),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn seed(mut self, seed: SeedSetting) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn allow_zip(mut self, allow_zip: bool) -> Self {
        self.allow_zip = Some(allow_zip);
        self
    }

    pub fn as_queued(mut self, as_queued: bool) -> Self {
        self.as_queued = Some(as_queued);
        self
    }
}

impl FormEncode for CreateTorrentRequest {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(magnet) = &self.magnet {
            fields.push(("magnet", magnet.as_str().to_string()));
        }
        if let Some(seed) = self.seed {
            fields.push(("seed", seed.as_form_value()));
        }
        if let Some(allow_zip) = self.allow_zip {
            fields.push(("allow_zip", allow_zip.to_string()));
        }
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(as_queued) = self.as_queued {
            fields.push(("as_queued", as_queued.to_string()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlActiveTorrentRequest {
    pub torrent_id: i64,
    pub operation: ActiveOperation,
}
