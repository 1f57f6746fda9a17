//! Query parameter assembly.

use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::error::{Result, SolrLinkError};
use crate::query::expression::{DefaultQuerySerializer, Query, QuerySerializer};
use crate::query::options::QueryOptions;
use crate::query::{QueryParam, param};

/// Row count used when the caller never restricts rows.
pub const DEFAULT_ROWS: u64 = 100_000_000;

/// Turns a query and its options into wire parameters.
#[derive(Clone)]
pub struct QueryParameterBuilder {
    serializer: Arc<dyn QuerySerializer>,
    default_rows: u64,
}

impl fmt::Debug for QueryParameterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParameterBuilder")
            .field("serializer", &"<QuerySerializer>")
            .field("default_rows", &self.default_rows)
            .finish()
    }
}

impl Default for QueryParameterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParameterBuilder {
    pub fn new() -> Self {
        QueryParameterBuilder {
            serializer: Arc::new(DefaultQuerySerializer),
            default_rows: DEFAULT_ROWS,
        }
    }

    pub fn with_serializer(mut self, serializer: Arc<dyn QuerySerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn with_default_rows(mut self, default_rows: u64) -> Self {
        self.default_rows = default_rows;
        self
    }

    pub fn default_rows(&self) -> u64 {
        self.default_rows
    }

    /// Build the parameter sequence for `query`.
    ///
    /// Order: `q`, common parameters (`start`, `rows`, `fl`, `fq`, facets,
    /// extra parameters), `sort`, terms, term vectors. The sequence is
    /// produced lazily; option validation happens here, before anything is
    /// yielded.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a terms request names no field.
    pub fn build<'a>(
        &'a self,
        query: &'a Query,
        options: &'a QueryOptions,
    ) -> Result<QueryParameters<'a>> {
        if options.terms.as_ref().is_some_and(|t| t.fields.is_empty()) {
            return Err(SolrLinkError::configuration("terms component requires at least one field"));
        }

        let q = iter::once_with(move || param("q", self.serializer.serialize(query)));
        let sort = iter::once_with(move || {
            (!options.order_by.is_empty()).then(|| {
                let orders: Vec<String> = options.order_by.iter().map(|o| o.to_string()).collect();
                param("sort", orders.join(","))
            })
        })
        .flatten();
        let terms = options.terms.iter().flat_map(|t| t.parameters());
        let term_vector = options.term_vector.iter().flat_map(|tv| tv.parameters());

        let params = q
            .chain(self.common_parameters(options))
            .chain(sort)
            .chain(terms)
            .chain(term_vector);

        Ok(QueryParameters {
            inner: Box::new(params),
        })
    }

    fn common_parameters<'a>(
        &'a self,
        options: &'a QueryOptions,
    ) -> impl Iterator<Item = QueryParam> + 'a {
        let start = options.start.map(|start| param("start", start));
        let rows =
            iter::once_with(move || param("rows", options.rows.unwrap_or(self.default_rows)));
        let fields = iter::once_with(move || {
            (!options.fields.is_empty()).then(|| param("fl", options.fields.join(",")))
        })
        .flatten();
        let filters = options
            .filter_queries
            .iter()
            .map(move |fq| param("fq", self.serializer.serialize(fq)));
        let facets = options
            .facet
            .iter()
            .flat_map(move |fp| fp.parameters(self.serializer.as_ref()));
        let extra = options.extra_params.iter().cloned();

        start
            .into_iter()
            .chain(rows)
            .chain(fields)
            .chain(filters)
            .chain(facets)
            .chain(extra)
    }
}

/// Lazily produced query parameters.
pub struct QueryParameters<'a> {
    inner: Box<dyn Iterator<Item = QueryParam> + 'a>,
}

impl Iterator for QueryParameters<'_> {
    type Item = QueryParam;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for QueryParameters<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParameters").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::facet::{FacetParameters, FacetQuery};
    use crate::query::sort::SortOrder;
    use crate::query::term_vector::{TermVectorOptions, TermVectorParameters};
    use crate::query::terms::TermsParameters;

    fn collect(
        builder: &QueryParameterBuilder,
        query: &Query,
        options: &QueryOptions,
    ) -> Vec<(String, String)> {
        builder.build(query, options).unwrap().collect()
    }

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_paging_and_fields_order() {
        let builder = QueryParameterBuilder::new();
        let options = QueryOptions::new()
            .with_rows(10)
            .with_start(5)
            .with_fields(["a", "b"]);

        let params = collect(&builder, &Query::all(), &options);
        assert_eq!(
            pairs(&params),
            vec![("q", "*:*"), ("start", "5"), ("rows", "10"), ("fl", "a,b")]
        );
    }

    #[test]
    fn test_unset_groups_emit_only_q_and_rows() {
        let builder = QueryParameterBuilder::new();
        let params = collect(&builder, &Query::raw("title:rust"), &QueryOptions::default());
        assert_eq!(
            pairs(&params),
            vec![("q", "title:rust"), ("rows", "100000000")]
        );
    }

    #[test]
    fn test_configured_default_rows() {
        let builder = QueryParameterBuilder::new().with_default_rows(25);
        let params = collect(&builder, &Query::all(), &QueryOptions::default());
        assert_eq!(params[1], ("rows".to_string(), "25".to_string()));
    }

    #[test]
    fn test_group_order() {
        let builder = QueryParameterBuilder::new();
        let options = QueryOptions::new()
            .with_term_vector(TermVectorParameters::new(["body"], TermVectorOptions::OFFSETS))
            .with_terms(TermsParameters::new(["name"]))
            .with_order(SortOrder::desc("price"))
            .with_order(SortOrder::asc("id"))
            .with_extra_param("defType", "edismax")
            .with_facet(FacetParameters::new([FacetQuery::field("color")]).with_min_count(1))
            .with_filter("in_stock:true")
            .with_filter(Query::field("brand", "acme"));

        let params = collect(&builder, &Query::all(), &options);
        assert_eq!(
            pairs(&params),
            vec![
                ("q", "*:*"),
                ("rows", "100000000"),
                ("fq", "in_stock:true"),
                ("fq", "brand:acme"),
                ("facet", "true"),
                ("facet.field", "color"),
                ("facet.mincount", "1"),
                ("defType", "edismax"),
                ("sort", "price desc,id asc"),
                ("terms", "true"),
                ("terms.fl", "name"),
                ("tv", "true"),
                ("tv.fl", "body"),
                ("tv.offsets", "true"),
            ]
        );
    }

    #[test]
    fn test_empty_facet_group_is_omitted() {
        let builder = QueryParameterBuilder::new();
        let options = QueryOptions::new().with_facet(FacetParameters::default().with_limit(3));
        let params = collect(&builder, &Query::all(), &options);
        assert!(params.iter().all(|(k, _)| !k.starts_with("facet")));
    }

    #[test]
    fn test_terms_without_fields_is_a_configuration_error() {
        let builder = QueryParameterBuilder::new();
        let options = QueryOptions::new().with_terms(TermsParameters::default());

        let err = builder.build(&Query::all(), &options).unwrap_err();
        assert!(matches!(err, SolrLinkError::Configuration(_)));
    }

    #[test]
    fn test_parameters_are_lazy() {
        let builder = QueryParameterBuilder::new();
        let query = Query::all();
        let options = QueryOptions::new().with_rows(1);
        let mut params = builder.build(&query, &options).unwrap();

        assert_eq!(params.next(), Some(("q".to_string(), "*:*".to_string())));
        assert_eq!(params.next(), Some(("rows".to_string(), "1".to_string())));
        assert_eq!(params.next(), None);
    }
}
