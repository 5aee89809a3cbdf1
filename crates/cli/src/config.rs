use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use superglue_protocol::ResponseOrdering;
use superglue_search::LINEAGE_INDEX;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";
pub const DEFAULT_ELASTICSEARCH_HOST: &str = "http://localhost:9200";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const CONFIG_ENV: &str = "SUPERGLUE_CONFIG";
pub const API_URL_ENV: &str = "SUPERGLUE_API_URL";
pub const ELASTICSEARCH_HOST_ENV: &str = "ELASTICSEARCH_HOST";
pub const SEARCH_INDEX_ENV: &str = "SUPERGLUE_SEARCH_INDEX";
pub const ORDERING_ENV: &str = "SUPERGLUE_RESPONSE_ORDERING";

/// Where the lineage service and the search index live, and how to talk to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api_url: String,
    pub elasticsearch_host: String,
    pub search_index: String,
    /// 0 disables the client-side timeout
    pub request_timeout_secs: u64,
    pub response_ordering: ResponseOrdering,
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub elasticsearch_host: Option<String>,
    pub search_index: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub response_ordering: Option<ResponseOrdering>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            elasticsearch_host: DEFAULT_ELASTICSEARCH_HOST.to_string(),
            search_index: LINEAGE_INDEX.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            response_ordering: ResponseOrdering::default(),
        }
    }
}

impl ClientConfig {
    /// defaults → TOML file → environment → command line
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(host) = non_empty(ELASTICSEARCH_HOST_ENV) {
            self.elasticsearch_host = host;
        }
        if let Some(index) = non_empty(SEARCH_INDEX_ENV) {
            self.search_index = index;
        }
        if let Some(ordering) = non_empty(ORDERING_ENV) {
            self.response_ordering = ordering
                .parse()
                .with_context(|| format!("Invalid {ORDERING_ENV}"))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(host) = &overrides.elasticsearch_host {
            self.elasticsearch_host = host.clone();
        }
        if let Some(index) = &overrides.search_index {
            self.search_index = index.clone();
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(ordering) = overrides.response_ordering {
            self.response_ordering = ordering;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
