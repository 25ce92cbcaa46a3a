//! Usenet and web (hoster) downloads.

use serde::{Deserialize, Serialize};

use super::File;
use super::null_as_default;
use crate::constants::{UsenetOperation, WebDownloadOperation};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UsenetDownload {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_speed: f64,
    #[serde(rename = "downloaded", deserialize_with = "null_as_default")]
    pub downloaded_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ratio: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WebDownload {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download_speed: f64,
    #[serde(rename = "downloaded", deserialize_with = "null_as_default")]
    pub downloaded_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

/// Body of `POST api/usenet/createusenetdownload`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateUsenetRequest {
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_queued: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlUsenetRequest {
    pub usenet_id: i64,
    pub operation: UsenetOperation,
}

/// Body of `POST api/webdl/createwebdownload`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateWebDownloadRequest {
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_queued: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlWebDownloadRequest {
    pub web_id: i64,
    pub operation: WebDownloadOperation,
}
