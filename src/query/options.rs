//! Query options.

use crate::query::expression::Query;
use crate::query::facet::FacetParameters;
use crate::query::sort::SortOrder;
use crate::query::term_vector::TermVectorParameters;
use crate::query::terms::TermsParameters;

/// Everything sent with a query besides the query expression.
///
/// Each group is independent. A group that is unset contributes no
/// parameters at all, so the server applies its own defaults. The one
/// exception is `rows`, which falls back to the builder's default row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Offset of the first returned document.
    pub start: Option<u64>,
    /// Maximum number of returned documents.
    pub rows: Option<u64>,
    /// Stored fields to return (`fl`).
    pub fields: Vec<String>,
    /// Filter queries (`fq`).
    pub filter_queries: Vec<Query>,
    pub facet: Option<FacetParameters>,
    pub order_by: Vec<SortOrder>,
    pub terms: Option<TermsParameters>,
    pub term_vector: Option<TermVectorParameters>,
    /// Additional raw parameters, sent after the facet parameters.
    pub extra_params: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filter<Q: Into<Query>>(mut self, query: Q) -> Self {
        self.filter_queries.push(query.into());
        self
    }

    pub fn with_facet(mut self, facet: FacetParameters) -> Self {
        self.facet = Some(facet);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn with_terms(mut self, terms: TermsParameters) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn with_term_vector(mut self, term_vector: TermVectorParameters) -> Self {
        self.term_vector = Some(term_vector);
        self
    }

    pub fn with_extra_param<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.extra_params.push((name.into(), value.into()));
        self
    }
}
