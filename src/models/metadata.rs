use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{null_as_default, string_or_number};

/// Title of a media item in one language.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Title {
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Trailer {
    #[serde(deserialize_with = "null_as_default")]
    pub youtube_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
}

/// Media metadata returned by the search API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "globalID", deserialize_with = "null_as_default")]
    pub global_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub titles_full: Vec<Title>,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(rename = "mediaType", deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(rename = "contentRating", deserialize_with = "null_as_default")]
    pub content_rating: String,
    #[serde(deserialize_with = "null_as_default")]
    pub actors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub trailer: Trailer,
    #[serde(deserialize_with = "null_as_default")]
    pub characters: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(rename = "isAdult", deserialize_with = "null_as_default")]
    pub is_adult: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(rename = "releasedDate", deserialize_with = "null_as_default")]
    pub released_date: String,
    #[serde(rename = "episodesNumber", deserialize_with = "null_as_default")]
    pub episodes_number: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub runtime: String,
    /// First and (for ranges) last release year, in order.
    #[serde(rename = "releaseYears", deserialize_with = "release_years")]
    pub release_years: Vec<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub backdrop: String,
}

/// `"2001-2004"` is a range, `"1999"` or `1999` a single year. Other shapes decode as empty.
fn release_years<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => parse_release_years(&text).map_err(D::Error::custom),
        Value::Number(number) => Ok(number
            .as_i64()
            .and_then(|year| i32::try_from(year).ok())
            .map(|year| vec![year])
            .unwrap_or_default()),
        _ => Ok(Vec::new()),
    }
}

fn parse_release_years(text: &str) -> Result<Vec<i32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split('-')
        .map(str::trim)
        .map(|year| {
            year.parse::<i32>()
                .map_err(|_| format!("invalid release year '{}' in '{}'", year, text))
        })
        .collect()
}
