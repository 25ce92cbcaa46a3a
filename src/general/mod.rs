//! The general TorBox API (`https://api.torbox.app/v1`).
//!
//! Every endpoint follows the same template: build the request, execute it,
//! unwrap the envelope. Endpoints are grouped by resource in the submodules.

mod dispatch;
mod integration;
mod notifications;
mod queued;
mod rss;
mod stats;
mod torrents;
mod usenet;
mod user;
mod webdl;

pub use dispatch::{DownloadLookup, control_any};

#[cfg(test)]
pub use dispatch::MockDownloadLookup;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::{Executor, RequestBuilder};
use crate::models::Envelope;

/// Client for the general TorBox API.
#[derive(Clone)]
pub struct GeneralService {
    base_url: String,
    api_key: String,
    executor: Executor,
}

impl GeneralService {
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

    fn get(&self, path: &str) -> RequestBuilder {
        RequestBuilder::get(&self.base_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        RequestBuilder::post(&self.base_url, path)
    }

    /// Builds and executes a request. Failures are tagged with `operation`.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &'static str,
    ) -> Result<Envelope<T>> {
        let request = builder
            .build(&self.api_key)
            .map_err(|e| e.during(operation))?;
        self.executor
            .execute(&request)
            .await
            .map_err(|e| e.during(operation))
    }
}

impl std::fmt::Debug for GeneralService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
