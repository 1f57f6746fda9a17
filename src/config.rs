//! Client configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::dynamic::KeyIdentity;
use crate::error::{Result, SolrLinkError};
use crate::query::DEFAULT_ROWS;

/// Environment variable that overrides [`ClientConfig::base_url`].
pub const URL_ENV_VAR: &str = "SOLRLINK_URL";

/// Connection and protocol settings of a [`crate::client::SolrClient`].
///
/// Every field has a default, so a configuration file only needs the
/// fields that differ:
///
/// ```json
/// { "base_url": "http://search:8983/solr/products", "post_queries": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Core or collection URL, without a trailing handler.
    pub base_url: String,
    pub select_handler: String,
    pub update_handler: String,
    /// Rows requested when a query does not set `rows`.
    pub default_rows: u64,
    /// Value of the `version` parameter added to every request.
    pub version: String,
    pub timeout_secs: u64,
    /// Send queries as form encoded POST bodies instead of GET query strings.
    pub post_queries: bool,
    pub key_identity: KeyIdentity,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8983/solr".to_string(),
            select_handler: "/select".to_string(),
            update_handler: "/update".to_string(),
            default_rows: DEFAULT_ROWS,
            version: "2.2".to_string(),
            timeout_secs: 30,
            post_queries: false,
            key_identity: KeyIdentity::default(),
        }
    }
}

impl ClientConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load a JSON configuration file, then apply environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.with_env_overrides().validated()
    }

    /// Replace `base_url` with `SOLRLINK_URL` when it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(URL_ENV_VAR)
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        self
    }

    pub fn with_select_handler<S: Into<String>>(mut self, handler: S) -> Self {
        self.select_handler = handler.into();
        self
    }

    pub fn with_update_handler<S: Into<String>>(mut self, handler: S) -> Self {
        self.update_handler = handler.into();
        self
    }

    pub fn with_default_rows(mut self, rows: u64) -> Self {
        self.default_rows = rows;
        self
    }

    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_post_queries(mut self, post_queries: bool) -> Self {
        self.post_queries = post_queries;
        self
    }

    pub fn with_key_identity(mut self, key_identity: KeyIdentity) -> Self {
        self.key_identity = key_identity;
        self
    }

    /// Check that the URL and handlers are usable.
    pub fn validated(self) -> Result<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SolrLinkError::configuration(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        for handler in [&self.select_handler, &self.update_handler] {
            if !handler.starts_with('/') {
                return Err(SolrLinkError::configuration(format!(
                    "handler '{handler}' must start with '/'"
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.select_handler, "/select");
        assert_eq!(config.update_handler, "/update");
        assert_eq!(config.default_rows, 100_000_000);
        assert_eq!(config.version, "2.2");
        assert!(!config.post_queries);
        assert_eq!(config.key_identity, KeyIdentity::RawWireName);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "http://search:8983/solr/products", "post_queries": true, "key_identity": "suffix"}}"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        if std::env::var(URL_ENV_VAR).is_err() {
            assert_eq!(config.base_url, "http://search:8983/solr/products");
        }
        assert!(config.post_queries);
        assert_eq!(config.key_identity, KeyIdentity::Suffix);
        assert_eq!(config.update_handler, "/update");
    }

    #[test]
    fn test_invalid_handler() {
        let err = ClientConfig::new("http://localhost:8983/solr")
            .with_select_handler("select")
            .validated()
            .unwrap_err();
        assert!(matches!(err, SolrLinkError::Configuration(_)));
    }

    #[test]
    fn test_invalid_url() {
        assert!(ClientConfig::new("localhost:8983").validated().is_err());
    }
}
