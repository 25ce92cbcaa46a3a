//! Request executor with retry logic and envelope decoding.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, error, warn};

use super::request::ApiRequest;
use super::retry::{Decision, RetryPolicy, is_retryable_network_error};
use super::transport::AuthTransport;
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::models::Envelope;

/// Sends built requests through an [`AuthTransport`], retrying transient
/// failures, and decodes the response envelope.
#[derive(Debug, Clone)]
pub struct Executor {
    transport: AuthTransport,
    policy: RetryPolicy,
}

impl Executor {
    pub fn new(transport: AuthTransport, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn logger(&self) -> &Logger {
        self.transport.logger()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes `request`, retrying network errors, 5xx and 429 responses.
    ///
    /// Error statuses that are not retried (or that exhaust the retries)
    /// become [`Error::Api`] with the envelope's `error`/`detail` text.
    /// A `success: false` envelope on a 2xx response is returned as is.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Envelope<T>> {
        let span = self.logger().in_scope(|| {
            tracing::debug_span!("torbox_request", method = %request.method, path = request.url.path())
        });
        self.logger()
            .scope(self.execute_with_retry(request).instrument(span))
            .await
    }

    async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Envelope<T>> {
        let mut attempt: u32 = 0;

        loop {
            debug!(attempt, "sending torbox API request");

            let response = match self.transport.send(request).await {
                Ok(response) => response,
                Err(e) => {
                    let delay = self.on_network_error(attempt, e)?;
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            let headers = response.headers().clone();
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    // The status line arrived but the body did not; treat like a dropped connection.
                    let delay = self.on_transport_failure(attempt, true, e)?;
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
            };

            if status.is_client_error() || status.is_server_error() {
                debug!(
                    status = status.as_u16(),
                    message = %String::from_utf8_lossy(&body),
                    attempt,
                    "torbox API response error"
                );

                match self.policy.on_status(attempt, status, &headers) {
                    Decision::RetryAfter(delay) => {
                        if status == StatusCode::TOO_MANY_REQUESTS {
                            warn!(retry_after = ?delay, attempt, "rate limited by torbox API, waiting before retry");
                        } else {
                            debug!(delay = ?delay, attempt, "retrying torbox API request after delay");
                        }
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    Decision::GiveUp => return Err(error_from_body(status, &body)),
                }
            }

            return decode_envelope(&body);
        }
    }

    fn on_network_error(&self, attempt: u32, source: reqwest::Error) -> Result<Duration> {
        let retryable = is_retryable_network_error(&source);
        self.on_transport_failure(attempt, retryable, source)
    }

    fn on_transport_failure(
        &self,
        attempt: u32,
        retryable: bool,
        source: reqwest::Error,
    ) -> Result<Duration> {
        warn!(error = %source, attempt, retryable, "torbox API request failed");

        match self.policy.on_network_error(attempt, retryable) {
            Decision::RetryAfter(delay) => {
                debug!(delay = ?delay, attempt, "retrying torbox API request after delay");
                Ok(delay)
            }
            Decision::GiveUp => {
                error!(error = %source, "failed to execute torbox request after retries");
                Err(Error::Transport { retryable, source })
            }
        }
    }
}

/// Decodes a success body. An empty body is a successful envelope without data.
fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope::empty());
    }

    let envelope: Envelope<T> = serde_json::from_slice(body)?;

    let unknown = envelope.unknown_fields();
    if !unknown.is_empty() {
        warn!(fields = ?unknown, "torbox API response contained unknown fields");
    }

    Ok(envelope)
}

/// Builds the error for a failed status, reading `error`/`detail` from the body when it is an envelope.
fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => Error::api(Some(status), &envelope.error, &envelope.detail),
        Err(_) => Error::api(Some(status), "", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::RequestBuilder;
    use crate::http::transport::TransportConfig;
    use mockito::Server;
    use serde::Deserialize;
    use std::time::Instant;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn executor() -> Executor {
        let transport =
            AuthTransport::new("test-key", &TransportConfig::default(), Logger::current()).unwrap();
        Executor::new(
            transport,
            RetryPolicy {
                max_retries: 3,
                unit: Duration::from_millis(5),
            },
        )
    }

    fn get(server: &Server, path: &str) -> ApiRequest {
        RequestBuilder::get(&server.url(), path)
            .build("test-key")
            .unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn test_execute_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "error": null, "detail": "ok", "data": {"id": 7}}"#)
            .create_async()
            .await;

        let envelope: Envelope<Item> = executor()
            .execute(&get(&server, "api/user/me"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(Item { id: 7 }));
    }

    #[test_log::test(tokio::test)]
    async fn test_execute_keeps_unknown_fields() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body(r#"{"success": true, "data": {"id": 1}, "foo": 1, "bar": "x"}"#)
            .create_async()
            .await;

        let envelope: Envelope<Item> = executor()
            .execute(&get(&server, "api/stats"))
            .await
            .unwrap();

        let mut unknown = envelope.unknown_fields();
        unknown.sort();
        assert_eq!(unknown, vec!["bar", "foo"]);
        assert_eq!(envelope.data, Some(Item { id: 1 }));
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_retries() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/torrents/mylist")
            .with_status(503)
            .expect(4)
            .create_async()
            .await;

        let err = executor()
            .execute::<Vec<Item>>(&get(&server, "api/torrents/mylist"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(err.to_string(), "server error (status: 503)");
    }

    #[tokio::test]
    async fn test_server_error_then_success() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("GET", "/api/stats")
            .with_status(502)
            .expect(1)
            .create_async()
            .await;
        let ok = server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body(r#"{"success": true, "data": {"id": 2}}"#)
            .expect(1)
            .create_async()
            .await;

        let envelope: Envelope<Item> = executor()
            .execute(&get(&server, "api/stats"))
            .await
            .unwrap();

        failing.assert_async().await;
        ok.assert_async().await;
        assert_eq!(envelope.data, Some(Item { id: 2 }));
    }

    #[tokio::test]
    async fn test_rate_limit_waits_for_retry_after() {
        let mut server = Server::new_async().await;
        let limited = server
            .mock("GET", "/api/user/me")
            .with_status(429)
            .with_header("retry-after", "4")
            .expect(1)
            .create_async()
            .await;
        let ok = server
            .mock("GET", "/api/user/me")
            .with_status(200)
            .with_body(r#"{"success": true, "data": {"id": 1}}"#)
            .expect(1)
            .create_async()
            .await;

        let executor = executor();
        let started = Instant::now();
        let envelope: Envelope<Item> = executor
            .execute(&get(&server, "api/user/me"))
            .await
            .unwrap();

        limited.assert_async().await;
        ok.assert_async().await;
        assert!(started.elapsed() >= executor.policy().unit * 4);
        assert_eq!(envelope.data, Some(Item { id: 1 }));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user/me")
            .with_status(404)
            .with_body(r#"{"success": false, "error": "NOT_FOUND", "detail": "No such user", "data": null}"#)
            .expect(1)
            .create_async()
            .await;

        let err = executor()
            .execute::<Item>(&get(&server, "api/user/me"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "NOT_FOUND - No such user");
    }

    #[tokio::test]
    async fn test_error_with_detail_only() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/user/me")
            .with_status(401)
            .with_body(r#"{"success": false, "detail": "Invalid API key"}"#)
            .create_async()
            .await;

        let err = executor()
            .execute::<Item>(&get(&server, "api/user/me"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[tokio::test]
    async fn test_empty_body_is_success() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/notifications/clear")
            .with_status(200)
            .create_async()
            .await;

        let request = RequestBuilder::post(&server.url(), "api/notifications/clear")
            .build("test-key")
            .unwrap();
        let envelope: Envelope<serde_json::Value> = executor().execute(&request).await.unwrap();

        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error_without_retry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body("{not json")
            .expect(1)
            .create_async()
            .await;

        let err = executor()
            .execute::<Item>(&get(&server, "api/stats"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_failed_envelope_on_success_status_is_returned() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_body(r#"{"success": false, "error": "BAD", "detail": "nope"}"#)
            .create_async()
            .await;

        let envelope: Envelope<Item> = executor()
            .execute(&get(&server, "api/stats"))
            .await
            .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.error, "BAD");
    }

    #[tokio::test]
    async fn test_connection_refused_retries_then_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = RequestBuilder::get(&format!("http://{}", addr), "api/stats")
            .build("test-key")
            .unwrap();
        let executor = executor();
        let started = Instant::now();
        let err = executor.execute::<Item>(&request).await.unwrap_err();

        assert!(matches!(err, Error::Transport { retryable: true, .. }));
        // 1 + 2 + 4 units of backoff before giving up.
        assert!(started.elapsed() >= executor.policy().unit * 7);
    }

    /// Accepts connections and answers each with a plain HTTP response,
    /// so a TLS client fails its handshake. Returns the address and a connection counter.
    fn spawn_plaintext_server() -> (
        std::net::SocketAddr,
        std::sync::Arc<std::sync::atomic::AtomicUsize>,
    ) {
        use std::io::{Read, Write};
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut hello = [0u8; 1024];
                let _ = stream.read(&mut hello);
                let _ = stream.write_all(b"HTTP/1.1 400 Bad Request\r\ncontent-length: 0\r\n\r\n");
                let _ = stream.shutdown(std::net::Shutdown::Write);
                let mut rest = Vec::new();
                let _ = stream.read_to_end(&mut rest);
            }
        });

        (addr, connections)
    }

    #[tokio::test]
    async fn test_fatal_network_error_is_not_retried() {
        let (addr, connections) = spawn_plaintext_server();
        let request = RequestBuilder::get(&format!("https://{}", addr), "api/stats")
            .build("test-key")
            .unwrap();

        let err = executor().execute::<Item>(&request).await.unwrap_err();

        assert!(matches!(err, Error::Transport { retryable: false, .. }));
        assert!(!err.is_retryable());
        assert_eq!(connections.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
