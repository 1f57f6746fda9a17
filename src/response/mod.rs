//! Query and update responses.

pub mod facet;
pub mod header;
pub mod materializer;

pub use facet::{FacetCounts, FacetRange, pair_counts};
pub use header::ResponseHeader;
pub use materializer::{QueryResults, ResponseMaterializer};
