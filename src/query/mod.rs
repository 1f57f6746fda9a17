//! Query construction.
//!
//! A query is a [`Query`] expression plus [`QueryOptions`]. The
//! [`QueryParameterBuilder`] turns both into the ordered name/value pairs
//! that go on the query string.
//!
//! # Examples
//!
//! ```
//! use solrlink::query::{
//!     FacetParameters, FacetQuery, Query, QueryOptions, QueryParameterBuilder, SortOrder,
//! };
//!
//! let options = QueryOptions::new()
//!     .with_rows(10)
//!     .with_filter("in_stock:true")
//!     .with_facet(FacetParameters::new([FacetQuery::field("color")]))
//!     .with_order(SortOrder::desc("price"));
//!
//! let builder = QueryParameterBuilder::new();
//! let params: Vec<(String, String)> = builder
//!     .build(&Query::raw("title:rust"), &options)
//!     .unwrap()
//!     .collect();
//! assert_eq!(params[0], ("q".to_string(), "title:rust".to_string()));
//! ```

pub mod builder;
pub mod expression;
pub mod facet;
pub mod options;
pub mod sort;
pub mod term_vector;
pub mod terms;

pub use builder::{DEFAULT_ROWS, QueryParameterBuilder, QueryParameters};
pub use expression::{DefaultQuerySerializer, Query, QuerySerializer};
pub use facet::{FacetFieldQuery, FacetParameters, FacetQuery, FacetSort};
pub use options::QueryOptions;
pub use sort::{Order, SortOrder};
pub use term_vector::{TermVectorOptions, TermVectorParameters};
pub use terms::{TermsParameters, TermsSort};

/// One query string parameter.
pub type QueryParam = (String, String);

pub(crate) fn param<V: ToString>(name: &str, value: V) -> QueryParam {
    (name.to_string(), value.to_string())
}
