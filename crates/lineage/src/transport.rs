use crate::error::{LineageError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;
use superglue_protocol::LineageQuery;

/// Relative request path, kept as segments so transports can encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    /// `lineage/{entity_type}/{entity_name}/{depth}`
    pub fn lineage(query: &LineageQuery) -> Self {
        Self {
            segments: vec![
                "lineage".to_string(),
                query.entity_type.clone(),
                query.entity_name.clone(),
                query.depth.to_string(),
            ],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Outbound side of the lineage pipeline: one GET, raw body back.
#[async_trait]
pub trait LineageTransport: Send + Sync {
    /// Non-2xx responses must come back as errors.
    async fn get(&self, path: &RequestPath) -> Result<Vec<u8>>;
}

/// Lineage service over HTTP
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| LineageError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LineageError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn url_for(&self, path: &RequestPath) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LineageError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }
}

#[async_trait]
impl LineageTransport for HttpTransport {
    async fn get(&self, path: &RequestPath) -> Result<Vec<u8>> {
        let url = self.url_for(path)?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LineageError::HttpStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superglue_protocol::Depth;

    #[test]
    fn full_depth_is_passed_verbatim() {
        let query = LineageQuery::new("CFG_IOP_ETL_STATE", "table", Depth::Full).unwrap();
        assert_eq!(
            RequestPath::lineage(&query).to_string(),
            "lineage/table/CFG_IOP_ETL_STATE/Full"
        );
    }

    #[test]
    fn url_keeps_base_path_and_encodes_segments() {
        let transport = HttpTransport::new("http://lineage.local/api/", None).unwrap();
        let query = LineageQuery::new("odd name/x", "table", Depth::levels(2).unwrap()).unwrap();
        let url = transport.url_for(&RequestPath::lineage(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://lineage.local/api/lineage/table/odd%20name%2Fx/2"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(HttpTransport::new("mailto:someone@example.com", None).is_err());
        assert!(HttpTransport::new("not a url", None).is_err());
    }
}
