//! Error types for solrlink.
//!
//! Every fallible operation in the crate returns [`SolrLinkError`]. Errors are
//! local to the document or response being processed: a failed encode, decode
//! or materialization never touches the field catalog cache and never affects
//! other in-flight calls.
//!
//! # Examples
//!
//! ```
//! use solrlink::error::{Result, SolrLinkError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SolrLinkError::configuration("terms.fl is required"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for solrlink operations.
#[derive(Error, Debug)]
pub enum SolrLinkError {
    /// I/O errors (config files, document files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid combination of query or client options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A dynamic field entry that cannot be split into key and value
    #[error("Malformed dynamic field '{field}': {message}")]
    MalformedDynamicField { field: String, message: String },

    /// A dynamic field value that does not parse as the declared element type
    #[error("Cannot parse '{value}' of field '{field}' as {expected}")]
    NumericParse {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// The facet block of a response does not have the expected shape
    #[error("Malformed facet response: {0}")]
    MalformedFacetResponse(String),

    /// The transport could not complete a request
    #[error("Connection error on {url}: {message}")]
    Connection {
        url: String,
        message: String,
        /// Response body returned by the server, when there was one.
        body: Option<String>,
    },

    /// Document schema declarations that contradict each other
    #[error("Schema error: {0}")]
    Schema(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SolrLinkError.
pub type Result<T> = std::result::Result<T, SolrLinkError>;

impl SolrLinkError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SolrLinkError::Configuration(msg.into())
    }

    /// Create a new malformed dynamic field error.
    pub fn malformed_dynamic_field<F: Into<String>, S: Into<String>>(field: F, msg: S) -> Self {
        SolrLinkError::MalformedDynamicField {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a new numeric parse error.
    pub fn numeric_parse<F: Into<String>, V: Into<String>>(
        field: F,
        value: V,
        expected: &'static str,
    ) -> Self {
        SolrLinkError::NumericParse {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Create a new malformed facet response error.
    pub fn malformed_facet<S: Into<String>>(msg: S) -> Self {
        SolrLinkError::MalformedFacetResponse(msg.into())
    }

    /// Create a new connection error.
    pub fn connection<U: Into<String>, S: Into<String>>(
        url: U,
        msg: S,
        body: Option<String>,
    ) -> Self {
        SolrLinkError::Connection {
            url: url.into(),
            message: msg.into(),
            body,
        }
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        SolrLinkError::Schema(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SolrLinkError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SolrLinkError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// The server response body attached to a connection error, if any.
    pub fn server_body(&self) -> Option<&str> {
        match self {
            SolrLinkError::Connection { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
