//! Transport abstraction.
//!
//! The client never talks HTTP directly. It hands paths, parameters and
//! JSON bodies to a [`Transport`], which owns the protocol details: the base
//! URL, the `version` and `wt=json` parameters, timeouts and how queries are
//! sent.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::query::QueryParam;

pub use http::HttpTransport;

/// Sends requests to the server and returns raw response bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run a read request against `path` (for example `/select`).
    async fn get(&self, path: &str, params: &[QueryParam]) -> Result<String>;

    /// Post a JSON body to `path` (for example `/update`).
    async fn post(&self, path: &str, params: &[QueryParam], body: &Value) -> Result<String>;
}
