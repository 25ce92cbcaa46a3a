//! Client construction.

use std::time::Duration;

use tracing::info;

use crate::constants::{API_GENERAL_BASE_URL, API_SEARCH_BASE_URL};
use crate::error::{Error, Result};
use crate::general::GeneralService;
use crate::http::{AuthTransport, Executor, RetryPolicy, TransportConfig};
use crate::logging::Logger;
use crate::search::SearchService;

/// Entry point: one service per TorBox API root, sharing a connection pool.
#[derive(Debug, Clone)]
pub struct TorboxClient {
    pub general: GeneralService,
    pub search: SearchService,
}

impl TorboxClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// A client with default settings for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }
}

#[derive(Debug, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    general_base_url: Option<String>,
    search_base_url: Option<String>,
    transport: TransportConfig,
    retry_policy: RetryPolicy,
    logger: Logger,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn general_base_url(mut self, url: impl Into<String>) -> Self {
        self.general_base_url = Some(url.into());
        self
    }

    pub fn search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.transport.pool_max_idle_per_host = max;
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.transport.pool_idle_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = user_agent.into();
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Where library events go. Defaults to [`Logger::none`].
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> Result<TorboxClient> {
        let api_key = match self.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(Error::Build("an API key is required".to_string())),
        };

        let general_base_url = self
            .general_base_url
            .unwrap_or_else(|| API_GENERAL_BASE_URL.to_string());
        let search_base_url = self
            .search_base_url
            .unwrap_or_else(|| API_SEARCH_BASE_URL.to_string());

        self.logger.in_scope(|| {
            info!(
                general = %general_base_url,
                search = %search_base_url,
                "initializing TorBox client"
            )
        });

        let transport = AuthTransport::new(&api_key, &self.transport, self.logger)?;
        let executor = Executor::new(transport, self.retry_policy);

        Ok(TorboxClient {
            general: GeneralService::new(general_base_url, api_key.clone(), executor.clone()),
            search: SearchService::new(search_base_url, api_key, executor),
        })
    }
}
