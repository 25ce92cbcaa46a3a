//! The TorBox search API (`https://search-api.torbox.app`).

use serde::de::DeserializeOwned;

use crate::constants::{PATH_SEARCH_META, PATH_SEARCH_TORRENTS};
use crate::error::Result;
use crate::http::{BodyType, Executor, FormEncode, MultipartForm, RequestBuilder};
use crate::models::{Envelope, Metadata, TorrentLookup};

/// Client for the search API. Lookups are keyed by an id type and id, e.g. `imdb` and `tt0133093`.
#[derive(Clone)]
pub struct SearchService {
    base_url: String,
    api_key: String,
    executor: Executor,
}

impl SearchService {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, executor: Executor) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            executor,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Title metadata for a media id.
    pub async fn meta(&self, id_type: &str, id: &str) -> Result<Metadata> {
        const OP: &str = "get search metadata";
        self.lookup(PATH_SEARCH_META, id_type, id, None, OP)
            .await?
            .require(OP)
    }

    /// Like [`meta`](Self::meta), with extra parameters sent as a multipart form.
    pub async fn meta_with_form(
        &self,
        id_type: &str,
        id: &str,
        form: &dyn FormEncode,
    ) -> Result<Metadata> {
        const OP: &str = "get search metadata";
        self.lookup(PATH_SEARCH_META, id_type, id, Some(form), OP)
            .await?
            .require(OP)
    }

    /// Torrents known for a media id, with cache and ownership flags filled in.
    pub async fn torrents(&self, id_type: &str, id: &str) -> Result<TorrentLookup> {
        const OP: &str = "search torrents by id";
        Ok(self
            .lookup(PATH_SEARCH_TORRENTS, id_type, id, None, OP)
            .await?
            .into_data(OP)?
            .unwrap_or_default())
    }

    pub async fn torrents_with_form(
        &self,
        id_type: &str,
        id: &str,
        form: &dyn FormEncode,
    ) -> Result<TorrentLookup> {
        const OP: &str = "search torrents by id";
        Ok(self
            .lookup(PATH_SEARCH_TORRENTS, id_type, id, Some(form), OP)
            .await?
            .into_data(OP)?
            .unwrap_or_default())
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        resource: &str,
        id_type: &str,
        id: &str,
        form: Option<&dyn FormEncode>,
        operation: &'static str,
    ) -> Result<Envelope<T>> {
        let path = format!("{}/{}:{}", resource, id_type, id);
        let mut builder = RequestBuilder::get(&self.base_url, &path)
            .query("metadata", true)
            .query("check_cache", true)
            .query("check_owned", true);

        if let Some(form) = form {
            let (content_type, body) = MultipartForm::new().fields(&form.form_fields()).finish();
            builder = builder
                .bytes(body)
                .body_type(BodyType::File { content_type });
        }

        let request = builder
            .build(&self.api_key)
            .map_err(|e| e.during(operation))?;
        self.executor
            .execute(&request)
            .await
            .map_err(|e| e.during(operation))
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::{AuthTransport, RetryPolicy, TransportConfig};
    use crate::logging::Logger;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::Duration;

    fn service(base_url: &str) -> SearchService {
        let transport =
            AuthTransport::new("search-key", &TransportConfig::default(), Logger::none()).unwrap();
        let executor = Executor::new(
            transport,
            RetryPolicy {
                max_retries: 3,
                unit: Duration::from_millis(1),
            },
        );
        SearchService::new(base_url, "search-key", executor)
    }

    fn lookup_flags() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("metadata".into(), "true".into()),
            Matcher::UrlEncoded("check_cache".into(), "true".into()),
            Matcher::UrlEncoded("check_owned".into(), "true".into()),
        ])
    }

    struct Engines;

    impl FormEncode for Engines {
        fn form_fields(&self) -> Vec<(&'static str, String)> {
            vec![("search_user_engines", "true".to_string())]
        }
    }

    #[tokio::test]
    async fn test_meta() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/meta/imdb:tt0133093")
            .match_query(lookup_flags())
            .match_header("Authorization", "Bearer search-key")
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "globalID": "imdb_id:tt0133093",
                        "id": "tt0133093",
                        "title": "The Matrix",
                        "mediaType": "movie",
                        "releaseYears": "1999"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let metadata = service(&server.url())
            .meta("imdb", "tt0133093")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(metadata.title, "The Matrix");
        assert_eq!(metadata.release_years, vec![1999]);
    }

    #[tokio::test]
    async fn test_torrents_lookup() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/torrents/imdb:tt0133093")
            .match_query(lookup_flags())
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "metadata": {"title": "The Matrix"},
                        "torrents": [{"hash": "abc", "name": "The.Matrix.1999"}]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let lookup = service(&server.url())
            .torrents("imdb", "tt0133093")
            .await
            .unwrap();

        assert_eq!(lookup.torrents.len(), 1);
        assert_eq!(lookup.torrents[0].hash, "abc");
        assert_eq!(
            lookup.metadata.map(|m| m.title),
            Some("The Matrix".to_string())
        );
    }

    #[tokio::test]
    async fn test_torrents_with_form_sends_multipart() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/torrents/tvdb:81189")
            .match_query(lookup_flags())
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::Regex(
                "name=\"search_user_engines\"\r\n\r\ntrue".to_string(),
            ))
            .with_status(200)
            .with_body(json!({"success": true, "data": null}).to_string())
            .create_async()
            .await;

        let lookup = service(&server.url())
            .torrents_with_form("tvdb", "81189", &Engines)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(lookup.torrents.is_empty());
    }

    #[tokio::test]
    async fn test_meta_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/meta/imdb:tt0000000")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(json!({"success": false, "error": "NOT_FOUND", "detail": "No metadata"}).to_string())
            .create_async()
            .await;

        let err = service(&server.url())
            .meta("imdb", "tt0000000")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Operation { operation: "get search metadata", .. }));
        assert_eq!(
            err.to_string(),
            "Failed to get search metadata: NOT_FOUND - No metadata"
        );
    }
}
