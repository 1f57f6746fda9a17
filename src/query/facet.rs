//! Facet request parameters.

use std::fmt;

use crate::query::expression::{Query, QuerySerializer};
use crate::query::{QueryParam, param};

/// Ordering of facet values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetSort {
    /// Highest count first.
    Count,
    /// Lexicographic by term.
    Index,
}

impl fmt::Display for FacetSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetSort::Count => f.write_str("count"),
            FacetSort::Index => f.write_str("index"),
        }
    }
}

/// Facet over the terms of one field.
///
/// The optional settings are sent as per-field overrides
/// (`f.<field>.facet.limit`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetFieldQuery {
    pub field: String,
    pub prefix: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<u32>,
    pub min_count: Option<u32>,
    pub missing: Option<bool>,
    pub sort: Option<FacetSort>,
}

impl FacetFieldQuery {
    pub fn new<S: Into<String>>(field: S) -> Self {
        FacetFieldQuery {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = Some(min_count);
        self
    }

    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_sort(mut self, sort: FacetSort) -> Self {
        self.sort = Some(sort);
        self
    }

    fn parameters(&self) -> Vec<QueryParam> {
        let scoped = |name: &str| format!("f.{}.facet.{name}", self.field);
        let mut params = vec![param("facet.field", &self.field)];
        if let Some(prefix) = &self.prefix {
            params.push(param(&scoped("prefix"), prefix));
        }
        if let Some(limit) = self.limit {
            params.push(param(&scoped("limit"), limit));
        }
        if let Some(offset) = self.offset {
            params.push(param(&scoped("offset"), offset));
        }
        if let Some(min_count) = self.min_count {
            params.push(param(&scoped("mincount"), min_count));
        }
        if let Some(missing) = self.missing {
            params.push(param(&scoped("missing"), missing));
        }
        if let Some(sort) = self.sort {
            params.push(param(&scoped("sort"), sort));
        }
        params
    }
}

/// A single facet request.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetQuery {
    /// Term counts of a field (`facet.field`).
    Field(FacetFieldQuery),
    /// Count of documents matching a query (`facet.query`).
    Query(Query),
}

impl FacetQuery {
    pub fn field<S: Into<String>>(field: S) -> Self {
        FacetQuery::Field(FacetFieldQuery::new(field))
    }

    pub fn query<Q: Into<Query>>(query: Q) -> Self {
        FacetQuery::Query(query.into())
    }

    pub(crate) fn parameters(&self, serializer: &dyn QuerySerializer) -> Vec<QueryParam> {
        match self {
            FacetQuery::Field(field) => field.parameters(),
            FacetQuery::Query(query) => vec![param("facet.query", serializer.serialize(query))],
        }
    }
}

impl From<FacetFieldQuery> for FacetQuery {
    fn from(query: FacetFieldQuery) -> Self {
        FacetQuery::Field(query)
    }
}

/// Facet settings of a query.
///
/// Nothing is sent unless at least one facet query is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetParameters {
    pub queries: Vec<FacetQuery>,
    pub prefix: Option<String>,
    pub enum_cache_min_df: Option<u32>,
    pub limit: Option<i32>,
    pub min_count: Option<u32>,
    pub missing: Option<bool>,
    pub offset: Option<u32>,
    pub sort: Option<FacetSort>,
}

impl FacetParameters {
    pub fn new<I, Q>(queries: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<FacetQuery>,
    {
        FacetParameters {
            queries: queries.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = Some(min_count);
        self
    }

    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_sort(mut self, sort: FacetSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_enum_cache_min_df(mut self, min_df: u32) -> Self {
        self.enum_cache_min_df = Some(min_df);
        self
    }

    pub(crate) fn parameters(&self, serializer: &dyn QuerySerializer) -> Vec<QueryParam> {
        if self.queries.is_empty() {
            return Vec::new();
        }

        let mut params = vec![param("facet", true)];
        for query in &self.queries {
            params.extend(query.parameters(serializer));
        }
        if let Some(prefix) = &self.prefix {
            params.push(param("facet.prefix", prefix));
        }
        if let Some(min_df) = self.enum_cache_min_df {
            params.push(param("facet.enum.cache.minDf", min_df));
        }
        if let Some(limit) = self.limit {
            params.push(param("facet.limit", limit));
        }
        if let Some(min_count) = self.min_count {
            params.push(param("facet.mincount", min_count));
        }
        if let Some(missing) = self.missing {
            params.push(param("facet.missing", missing));
        }
        if let Some(offset) = self.offset {
            params.push(param("facet.offset", offset));
        }
        if let Some(sort) = self.sort {
            params.push(param("facet.sort", sort));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::expression::DefaultQuerySerializer;

    fn pairs(params: &[QueryParam]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_no_facet_queries_no_parameters() {
        let fp = FacetParameters::default().with_limit(10).with_min_count(1);
        assert!(fp.parameters(&DefaultQuerySerializer).is_empty());
    }

    #[test]
    fn test_global_settings_follow_queries() {
        let fp = FacetParameters::new([
            FacetQuery::field("color"),
            FacetQuery::query("price:[0 TO 10]"),
        ])
        .with_sort(FacetSort::Index)
        .with_missing(false)
        .with_limit(-1)
        .with_prefix("bl");

        let params = fp.parameters(&DefaultQuerySerializer);
        assert_eq!(
            pairs(&params),
            vec![
                ("facet", "true"),
                ("facet.field", "color"),
                ("facet.query", "price:[0 TO 10]"),
                ("facet.prefix", "bl"),
                ("facet.limit", "-1"),
                ("facet.missing", "false"),
                ("facet.sort", "index"),
            ]
        );
    }

    #[test]
    fn test_field_overrides_are_scoped() {
        let fp = FacetParameters::new([FacetFieldQuery::new("brand")
            .with_limit(5)
            .with_min_count(2)
            .with_sort(FacetSort::Count)]);

        let params = fp.parameters(&DefaultQuerySerializer);
        assert_eq!(
            pairs(&params),
            vec![
                ("facet", "true"),
                ("facet.field", "brand"),
                ("f.brand.facet.limit", "5"),
                ("f.brand.facet.mincount", "2"),
                ("f.brand.facet.sort", "count"),
            ]
        );
    }
}
