//! HTTP plumbing: request building, authenticated transport, retrying executor.

mod client;
mod form;
mod request;
mod retry;
mod transport;

pub use client::Executor;
pub use form::{FormEncode, MultipartForm, url_encoded};
pub use request::{ApiRequest, BodyType, RequestBuilder};
pub use retry::{Decision, MAX_RETRIES, RetryPolicy, is_retryable_network_error};
pub use transport::{AuthTransport, TransportConfig};
