use config::{API_TIMEOUT_MS, CHAIN_ID, MAIN_API_URL, NETWORK_NAME};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::NetworkConfigTrait;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    network_name: String,
    chain_id: String,
    fallback_enabled: bool,
    urls: Vec<String>,
    #[serde(default)]
    graphql: Option<String>,
    timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(NETWORK_NAME, CHAIN_ID, vec![MAIN_API_URL.to_string()])
    }
}

impl NetworkConfig {
    pub fn new(
        network_name: impl Into<String>,
        chain_id: impl Into<String>,
        urls: Vec<String>,
    ) -> Self {
        Self {
            fallback_enabled: true,
            network_name: network_name.into(),
            chain_id: chain_id.into(),
            urls,
            graphql: None,
            timeout_ms: API_TIMEOUT_MS,
        }
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    pub fn with_graphql(mut self, url: impl Into<String>) -> Self {
        self.graphql = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn is_fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }
}

impl NetworkConfigTrait for NetworkConfig {
    fn nodes(&self) -> &[String] {
        if self.fallback_enabled || self.urls.is_empty() {
            &self.urls
        } else {
            &self.urls[..1]
        }
    }

    fn default_node(&self) -> &str {
        self.urls.first().map(|s| s.as_str()).unwrap_or_default()
    }

    fn graphql_url(&self) -> Option<&str> {
        self.graphql.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
