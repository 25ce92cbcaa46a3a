//! Magnet URI parsing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::Url;

const BTIH_PREFIX: &str = "urn:btih:";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MagnetError {
    #[error("invalid magnet link: {0}")]
    InvalidUrl(String),
    #[error("invalid magnet link: not a magnet scheme")]
    NotMagnetScheme,
    #[error("invalid magnet link: missing or malformed xt parameter")]
    MissingExactTopic,
}

/// A parsed `magnet:` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Magnet {
    pub hash: String,
    pub display_name: String,
    pub trackers: Vec<String>,
    #[serde(skip)]
    uri: String,
}

impl Magnet {
    pub fn parse(uri: &str) -> Result<Self, MagnetError> {
        let parsed = Url::parse(uri).map_err(|e| MagnetError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "magnet" {
            return Err(MagnetError::NotMagnetScheme);
        }

        let mut hash = None;
        let mut display_name = None;
        let mut trackers = Vec::new();

        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                // The first exact topic wins; later ones are alternates.
                "xt" if hash.is_none() => {
                    hash = value
                        .strip_prefix(BTIH_PREFIX)
                        .filter(|h| !h.is_empty())
                        .map(str::to_string);
                }
                "dn" => display_name = Some(value.into_owned()),
                "tr" => trackers.push(value.into_owned()),
                _ => {}
            }
        }

        let hash = hash.ok_or(MagnetError::MissingExactTopic)?;
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            hash,
            display_name,
            trackers,
            uri: uri.to_string(),
        })
    }

    /// The link exactly as it was given to [`Magnet::parse`].
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl FromStr for Magnet {
    type Err = MagnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Magnet::parse(s)
    }
}

impl fmt::Display for Magnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
