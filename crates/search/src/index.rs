use crate::error::{Result, SearchError};
use crate::query::IndexQuery;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Full-text index client: one query in, the raw response document out.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, index: &str, query: &IndexQuery) -> Result<Value>;
}

/// Elasticsearch `_search` endpoint over HTTP
#[derive(Clone)]
pub struct ElasticsearchIndex {
    client: Client,
    host: Url,
}

impl ElasticsearchIndex {
    pub fn new(host: &str, timeout: Option<Duration>) -> Result<Self> {
        let host = Url::parse(host).map_err(|err| SearchError::InvalidHost(format!("{host}: {err}")))?;
        if host.cannot_be_a_base() {
            return Err(SearchError::InvalidHost(host.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            host,
        })
    }

    pub fn search_url(&self, index: &str) -> Result<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidHost(self.host.to_string()))?
            .pop_if_empty()
            .extend([index, "_search"]);
        Ok(url)
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn search(&self, index: &str, query: &IndexQuery) -> Result<Value> {
        let url = self.search_url(index)?;
        log::debug!("POST {url}");

        let response = self.client.post(url).json(&query.to_body()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                index: index.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
