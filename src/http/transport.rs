//! Authenticated connection layer.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use tracing::debug;

use super::request::ApiRequest;
use crate::error::{Error, Result};
use crate::logging::Logger;

/// Connection settings for [`AuthTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Overall per-request timeout. Generous because torrent uploads carry file payloads.
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 5,
            pool_idle_timeout: Duration::from_secs(30),
            user_agent: concat!("torbox-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A pooled HTTP client that adds `Authorization: Bearer <key>` to every request.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct AuthTransport {
    client: Client,
    logger: Logger,
}

impl AuthTransport {
    pub fn new(api_key: &str, config: &TransportConfig, logger: Logger) -> Result<Self> {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| Error::Build("API key contains invalid header characters".to_string()))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        logger.in_scope(|| debug!("Using API key {} for authentication", redact(api_key)));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()
            .map_err(|e| Error::Transport {
                retryable: false,
                source: e,
            })?;

        Ok(Self { client, logger })
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Sends one request. No retries, no status handling.
    pub async fn send(&self, request: &ApiRequest) -> reqwest::Result<Response> {
        request.to_reqwest(&self.client).send().await
    }
}

impl std::fmt::Debug for AuthTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTransport").finish_non_exhaustive()
    }
}

/// Keeps the first and last four characters of a credential.
pub(crate) fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::RequestBuilder;
    use mockito::Server;

    #[tokio::test]
    async fn test_send_adds_bearer_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user/me")
            .match_header("Authorization", "Bearer test-key")
            .with_status(200)
            .create_async()
            .await;

        let transport =
            AuthTransport::new("test-key", &TransportConfig::default(), Logger::none()).unwrap();
        let request = RequestBuilder::get(&server.url(), "api/user/me")
            .build("test-key")
            .unwrap();
        let response = transport.send(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_send_preserves_body_and_content_type() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/rss/addrss")
            .match_header("Authorization", "Bearer k")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(serde_json::json!({"url": "u", "name": "n"})))
            .with_status(200)
            .create_async()
            .await;

        let transport = AuthTransport::new("k", &TransportConfig::default(), Logger::none()).unwrap();
        let request = RequestBuilder::post(&server.url(), "api/rss/addrss")
            .json(&serde_json::json!({"url": "u", "name": "n"}))
            .build("k")
            .unwrap();
        transport.send(&request).await.unwrap();

        mock.assert_async().await;
    }

    #[test]
    fn test_new_rejects_invalid_key() {
        let result = AuthTransport::new("bad\nkey", &TransportConfig::default(), Logger::none());
        assert!(matches!(result, Err(Error::Build(_))));
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("short"), "*********");
        assert_eq!(redact("abcd1234567890wxyz"), "abcd*********wxyz");
    }

    #[test]
    fn test_debug_hides_key() {
        let transport =
            AuthTransport::new("super-secret-key-value", &TransportConfig::default(), Logger::none())
                .unwrap();
        assert!(!format!("{:?}", transport).contains("super-secret"));
    }
}
