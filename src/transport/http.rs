//! HTTP transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Result, SolrLinkError};
use crate::query::{QueryParam, param};
use crate::transport::Transport;

/// [`Transport`] that talks to a server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    version: String,
    post_queries: bool,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                SolrLinkError::connection(
                    &config.base_url,
                    format!("cannot build HTTP client: {e}"),
                    None,
                )
            })?;

        Ok(HttpTransport {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version.clone(),
            post_queries: config.post_queries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `params` followed by the protocol parameters every request carries.
    fn request_params(&self, params: &[QueryParam]) -> Vec<QueryParam> {
        let mut all = Vec::with_capacity(params.len() + 2);
        all.extend_from_slice(params);
        all.push(param("version", &self.version));
        all.push(param("wt", "json"));
        all
    }

    async fn execute(&self, url: String, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| SolrLinkError::connection(&url, format!("request failed: {e}"), None))?;
        read_body(url, response).await
    }
}

async fn read_body(url: String, response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SolrLinkError::connection(&url, format!("cannot read response: {e}"), None))?;

    if !status.is_success() {
        return Err(SolrLinkError::connection(
            url,
            format!("server returned {status}"),
            (!text.is_empty()).then_some(text),
        ));
    }

    trace!("{url} -> {} bytes", text.len());
    Ok(text)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, params: &[QueryParam]) -> Result<String> {
        let url = self.url(path);
        let params = self.request_params(params);

        let request = if self.post_queries {
            debug!("POST {url} ({} form parameters)", params.len());
            self.client.post(&url).form(&params)
        } else {
            debug!("GET {url} ({} parameters)", params.len());
            self.client.get(&url).query(&params)
        };
        self.execute(url, request).await
    }

    async fn post(&self, path: &str, params: &[QueryParam], body: &Value) -> Result<String> {
        let url = self.url(path);
        let params = self.request_params(params);
        debug!("POST {url}");

        let request = self
            .client
            .post(&url)
            .query(&params)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body)?);
        self.execute(url, request).await
    }
}
