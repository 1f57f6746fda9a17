//! # solrlink
//!
//! A typed client mapping layer for Solr.
//!
//! ## Features
//!
//! - Typed documents described by [`schema::DocumentSchema`]
//! - Dynamic field families (`phone_*`, `price_*`) flattened on the way in
//!   and folded back into maps on the way out
//! - Ordered, lazily built query parameters with facets, sorting, terms and
//!   term vectors
//! - Facet counts rebuilt from the flat term/count arrays of the response
//! - Add, commit and rollback over a pluggable async transport

pub mod cli;
pub mod client;
pub mod codec;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod response;
pub mod schema;
pub mod transport;

pub mod prelude {
    pub use crate::client::SolrClient;
    pub use crate::command::{AddParameters, CommitOptions};
    pub use crate::config::ClientConfig;
    pub use crate::error::{Result, SolrLinkError};
    pub use crate::query::{FacetParameters, FacetQuery, Query, QueryOptions, SortOrder};
    pub use crate::response::QueryResults;
    pub use crate::schema::{DocumentSchema, DynamicSlot, FieldDescriptor};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
