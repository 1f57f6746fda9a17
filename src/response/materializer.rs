//! Typed materialization of query responses.
//!
//! A response is read twice: once into a typed envelope, which deserializes
//! the static properties of every document, and once into a raw JSON tree,
//! which is where the dynamic fields and the flat facet arrays are read from.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Map, Value};

use crate::codec::dynamic::DynamicFieldCodec;
use crate::error::{Result, SolrLinkError};
use crate::response::facet::{FacetCounts, RawFacetRange};
use crate::response::header::ResponseHeader;
use crate::schema::{DocumentSchema, DynamicFieldBinding, FieldCatalog};

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(rename = "responseHeader", default)]
    header: Option<ResponseHeader>,
    response: ResponseBody<T>,
    #[serde(default)]
    facet_counts: Option<FacetBlock>,
}

#[derive(Deserialize)]
struct ResponseBody<T> {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    start: u64,
    #[serde(default = "Vec::new")]
    docs: Vec<T>,
}

#[derive(Deserialize, Default)]
struct FacetBlock {
    #[serde(default)]
    facet_queries: BTreeMap<String, u64>,
    /// Names only; the pairs are read from the raw tree.
    #[serde(default)]
    facet_fields: BTreeMap<String, IgnoredAny>,
    #[serde(default)]
    facet_ranges: BTreeMap<String, RawFacetRange>,
}

/// Result documents of one query, plus counts and facets.
#[derive(Debug, Clone)]
pub struct QueryResults<T> {
    pub documents: Vec<T>,
    /// Total number of matches on the server, not the number returned.
    pub num_found: u64,
    pub start: u64,
    pub header: Option<ResponseHeader>,
    pub facets: FacetCounts,
}

impl<T> QueryResults<T> {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.documents.iter()
    }

    pub fn facet_field(&self, field: &str) -> Option<&[(String, u64)]> {
        self.facets.field(field)
    }
}

impl<T> IntoIterator for QueryResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a QueryResults<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Builds [`QueryResults`] from raw query responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseMaterializer {
    codec: DynamicFieldCodec,
}

impl ResponseMaterializer {
    pub fn new(codec: DynamicFieldCodec) -> Self {
        ResponseMaterializer { codec }
    }

    pub fn codec(&self) -> &DynamicFieldCodec {
        &self.codec
    }

    /// Materialize `raw` using the cached dynamic field bindings of `T`.
    pub fn materialize<T: DocumentSchema>(&self, raw: &str) -> Result<QueryResults<T>> {
        let bindings = FieldCatalog::bindings::<T>();
        self.materialize_with(raw, &bindings)
    }

    /// Materialize `raw` with an explicit set of bindings.
    ///
    /// At most `numFound` documents are produced, even when the server
    /// returned more.
    ///
    /// # Errors
    ///
    /// Fails when the payload is not a query response, when a dynamic value
    /// does not parse as its declared type, or when a facet array is
    /// malformed. No partial results are returned.
    pub fn materialize_with<T: DocumentSchema>(
        &self,
        raw: &str,
        bindings: &[DynamicFieldBinding],
    ) -> Result<QueryResults<T>> {
        let envelope: Envelope<T> = serde_json::from_str(raw)?;
        let tree: Value = serde_json::from_str(raw)?;

        let body = envelope.response;
        let bound = usize::try_from(body.num_found)
            .unwrap_or(usize::MAX)
            .min(body.docs.len());
        if bound < body.docs.len() {
            debug!(
                "response carries {} documents for numFound={}, keeping {bound}",
                body.docs.len(),
                body.num_found
            );
        }

        let raw_docs = tree
            .pointer("/response/docs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut documents = Vec::with_capacity(bound);
        for (index, mut document) in body.docs.into_iter().take(bound).enumerate() {
            if !bindings.is_empty() {
                let fields = raw_document(raw_docs, index)?;
                self.codec.decode(fields, bindings, &mut document)?;
            }
            documents.push(document);
        }

        let facets = match envelope.facet_counts {
            Some(block) => build_facets(block, &tree)?,
            None => FacetCounts::default(),
        };

        Ok(QueryResults {
            documents,
            num_found: body.num_found,
            start: body.start,
            header: envelope.header,
            facets,
        })
    }
}

fn raw_document(docs: &[Value], index: usize) -> Result<&Map<String, Value>> {
    docs.get(index)
        .and_then(Value::as_object)
        .ok_or_else(|| SolrLinkError::other(format!("response document {index} is not an object")))
}

fn build_facets(block: FacetBlock, tree: &Value) -> Result<FacetCounts> {
    let mut facets = FacetCounts {
        facet_queries: block.facet_queries,
        ..FacetCounts::default()
    };

    let raw_fields = tree.pointer("/facet_counts/facet_fields");
    for name in block.facet_fields.keys() {
        let flat = raw_fields.and_then(|f| f.get(name)).ok_or_else(|| {
            SolrLinkError::malformed_facet(format!("facet field '{name}' has no counts"))
        })?;
        facets.rebuild_field(name, flat)?;
    }

    for (name, range) in block.facet_ranges {
        let range = range.into_range(&name)?;
        facets.facet_ranges.insert(name, range);
    }

    Ok(facets)
}
