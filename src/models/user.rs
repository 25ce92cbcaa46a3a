//! Account, notification, RSS, integration and statistics records.

use serde::{Deserialize, Serialize};

use super::{null_as_default, string_or_number};
use crate::constants::RssOperation;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub plan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub premium_expiry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cooldown_until: String,
    #[serde(deserialize_with = "null_as_default")]
    pub auth0_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_downloaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_uploaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub server: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_subscribed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub user_referral: String,
    pub base_email: Option<String>,
}

/// Payload of `api/user/refreshtoken`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RefreshedToken {
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddReferralRequest {
    pub referral_code: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RssFeed {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddRssRequest {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRssRequest {
    pub rss_id: i64,
    pub operation: RssOperation,
}

/// Partial update of an RSS feed. Only the fields that are set are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModifyRssRequest {
    pub rss_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Credentials handed to a cloud-storage integration: an OAuth `code` or a provider API key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IntegrationAuthRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl IntegrationAuthRequest {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            api_key: None,
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            code: None,
            api_key: Some(api_key.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IntegrationJob {
    pub id: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// Account-wide usage statistics.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(deserialize_with = "null_as_default")]
    pub total_downloaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_uploaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_torrents: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_torrents: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub queued_torrents: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_usenet: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_webdl: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub available_space: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub used_space: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub plan: String,
    pub premium_expiry: Option<String>,
}
