//! Outbound request construction.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Query parameter that is replaced by the held credential at build time.
const TOKEN_PARAM: &str = "token";

/// How a request body is put on the wire. Never transmitted itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodyType {
    #[default]
    Json,
    /// Pre-encoded `application/x-www-form-urlencoded` bytes.
    Form,
    /// Pre-encoded bytes (usually multipart) with a caller-supplied content type.
    File { content_type: String },
}

#[derive(Debug, Clone)]
enum Body {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// A fully built request, ready to be sent any number of times.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub(crate) fn to_reqwest(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }
}

/// Collects method, path, query and body for a single call.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    base_url: String,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Body>,
    body_type: BodyType,
    serialize_error: Option<String>,
}

impl RequestBuilder {
    pub fn new(method: Method, base_url: &str, path: &str) -> Self {
        Self {
            method,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: path.trim_start_matches('/').to_string(),
            query: Vec::new(),
            body: None,
            body_type: BodyType::default(),
            serialize_error: None,
        }
    }

    pub fn get(base_url: &str, path: &str) -> Self {
        Self::new(Method::GET, base_url, path)
    }

    pub fn post(base_url: &str, path: &str) -> Self {
        Self::new(Method::POST, base_url, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the `token` query parameter; it is filled with the credential in [`build`](Self::build).
    pub fn token_query(self) -> Self {
        self.query(TOKEN_PARAM, "")
    }

    /// Sets a body that is serialized to JSON unless a pre-encoded body type is chosen.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(Body::Json(value)),
            Err(e) => self.serialize_error = Some(e.to_string()),
        }
        self
    }

    /// Sets a pre-encoded body, used with [`BodyType::Form`] or [`BodyType::File`].
    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Some(Body::Bytes(body));
        self
    }

    pub fn body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Resolves the URL, encodes the body and fills the token placeholder.
    pub fn build(self, credential: &str) -> Result<ApiRequest> {
        if let Some(e) = self.serialize_error {
            return Err(Error::Build(format!("failed to serialize JSON body: {}", e)));
        }

        let mut url = Url::parse(&format!("{}/{}", self.base_url, self.path))
            .map_err(|e| Error::Build(format!("invalid URL for '{}': {}", self.path, e)))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                let value = if key == TOKEN_PARAM {
                    credential
                } else {
                    value.as_str()
                };
                pairs.append_pair(key, value);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let body = match self.body {
            None => None,
            Some(body) => {
                let (content_type, bytes) = encode_body(&self.body_type, body)?;
                let value = HeaderValue::from_str(&content_type).map_err(|_| {
                    Error::Build(format!("invalid content type '{}'", content_type))
                })?;
                headers.insert(CONTENT_TYPE, value);
                Some(bytes)
            }
        };

        Ok(ApiRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

fn encode_body(body_type: &BodyType, body: Body) -> Result<(String, Vec<u8>)> {
    match (body_type, body) {
        (BodyType::Json, Body::Json(value)) => {
            let bytes = serde_json::to_vec(&value)
                .map_err(|e| Error::Build(format!("failed to serialize JSON body: {}", e)))?;
            Ok(("application/json".to_string(), bytes))
        }
        (BodyType::Form, Body::Bytes(bytes)) => {
            Ok(("application/x-www-form-urlencoded".to_string(), bytes))
        }
        (BodyType::File { content_type }, Body::Bytes(bytes)) => {
            if content_type.is_empty() {
                return Err(Error::Build(
                    "file body requires an explicit content type".to_string(),
                ));
            }
            Ok((content_type.clone(), bytes))
        }
        (BodyType::Json, Body::Bytes(_)) => Err(Error::Build(
            "expected a serializable value for json body type, got pre-encoded bytes".to_string(),
        )),
        (BodyType::Form, Body::Json(_)) => Err(Error::Build(
            "expected a pre-encoded buffer for form body type".to_string(),
        )),
        (BodyType::File { .. }, Body::Json(_)) => Err(Error::Build(
            "expected a pre-encoded buffer for file body type".to_string(),
        )),
    }
}
