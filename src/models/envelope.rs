use serde::Deserialize;
use serde_json::{Map, Value};

use super::null_as_default;
use crate::error::{Error, Result};

/// The `{success, error, detail, data}` wrapper every TorBox response uses.
///
/// Fields not listed here end up in `unknown` instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: String,
    pub data: Option<T>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl<T> Envelope<T> {
    /// A successful envelope with no payload, used for empty response bodies.
    pub fn empty() -> Self {
        Self {
            success: true,
            error: String::new(),
            detail: String::new(),
            data: None,
            unknown: Map::new(),
        }
    }

    /// Names of top-level fields this client does not know about.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.unknown.keys().map(String::as_str).collect()
    }

    /// Returns the payload, or an API error when the envelope reports failure.
    pub fn into_data(self, operation: &'static str) -> Result<Option<T>> {
        if !self.success {
            return Err(Error::api(None, &self.error, &self.detail).during(operation));
        }
        Ok(self.data)
    }

    /// Like [`into_data`](Self::into_data) but a missing payload is an error.
    pub fn require(self, operation: &'static str) -> Result<T> {
        self.into_data(operation)?
            .ok_or_else(|| Error::MissingData(operation).during(operation))
    }

    /// Succeeds when the envelope does; the payload is ignored.
    pub fn check(self, operation: &'static str) -> Result<()> {
        self.into_data(operation).map(|_| ())
    }
}

impl<T> Envelope<Vec<T>> {
    /// List payloads: a missing `data` is an empty list.
    pub fn into_list(self, operation: &'static str) -> Result<Vec<T>> {
        Ok(self.into_data(operation)?.unwrap_or_default())
    }
}
