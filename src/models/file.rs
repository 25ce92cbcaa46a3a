use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A file inside a torrent, usenet or web download.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub zipped: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub s3_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub infected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub mimetype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub absolute_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tolerates_nulls_and_missing_fields() {
        let file: File = serde_json::from_str(
            r#"{"id": 4, "md5": null, "hash": null, "size": 1024, "name": "movie.mkv"}"#,
        )
        .unwrap();

        assert_eq!(file.id, 4);
        assert_eq!(file.md5, None);
        assert_eq!(file.hash, "");
        assert_eq!(file.size, 1024);
        assert_eq!(file.name, "movie.mkv");
        assert!(!file.zipped);
    }
}
