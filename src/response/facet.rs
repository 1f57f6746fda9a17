//! Facet counts of a query response.
//!
//! The server encodes term counts as one flat array alternating term and
//! count: `["red", 3, "blue", 7]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SolrLinkError};

/// Counts of one range facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetRange {
    pub counts: Vec<(String, u64)>,
    pub gap: Option<Value>,
    pub start: Option<Value>,
    pub end: Option<Value>,
    pub before: Option<u64>,
    pub after: Option<u64>,
    pub between: Option<u64>,
}

/// Facet results of one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCounts {
    /// Count per `facet.query` expression.
    pub facet_queries: BTreeMap<String, u64>,
    /// Ordered `(term, count)` pairs per field.
    pub facet_fields: BTreeMap<String, Vec<(String, u64)>>,
    /// Documents without a value, per field (requested with `facet.missing`).
    pub facet_missing: BTreeMap<String, u64>,
    pub facet_ranges: BTreeMap<String, FacetRange>,
}

impl FacetCounts {
    pub fn is_empty(&self) -> bool {
        self.facet_queries.is_empty()
            && self.facet_fields.is_empty()
            && self.facet_missing.is_empty()
            && self.facet_ranges.is_empty()
    }

    /// Term counts of `field`, in server order.
    pub fn field(&self, field: &str) -> Option<&[(String, u64)]> {
        self.facet_fields.get(field).map(Vec::as_slice)
    }

    /// Replace the counts of `field` with the pairs of a flat array.
    ///
    /// A `null` term carries the missing-value count.
    pub fn rebuild_field(&mut self, field: &str, flat: &Value) -> Result<()> {
        let items = flat.as_array().ok_or_else(|| {
            SolrLinkError::malformed_facet(format!("facet field '{field}' is not an array"))
        })?;

        let values = self.facet_fields.entry(field.to_string()).or_default();
        values.clear();
        self.facet_missing.remove(field);

        for (term, count) in pair_counts(field, items)? {
            match term {
                Some(term) => values.push((term, count)),
                None => {
                    self.facet_missing.insert(field.to_string(), count);
                }
            }
        }
        Ok(())
    }
}

/// Pair a flat alternating term/count array.
///
/// # Errors
///
/// Fails with a malformed facet error when the array has odd length or a
/// count is not a non-negative integer. Nothing is truncated.
pub fn pair_counts(field: &str, items: &[Value]) -> Result<Vec<(Option<String>, u64)>> {
    if items.len() % 2 != 0 {
        return Err(SolrLinkError::malformed_facet(format!(
            "facet '{field}' has {} elements, expected term/count pairs",
            items.len()
        )));
    }

    items
        .chunks_exact(2)
        .map(|pair| {
            let term = match &pair[0] {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            let count = pair[1].as_u64().ok_or_else(|| {
                SolrLinkError::malformed_facet(format!(
                    "facet '{field}' has non-integer count {}",
                    pair[1]
                ))
            })?;
            Ok((term, count))
        })
        .collect()
}

/// Range facet as sent by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFacetRange {
    #[serde(default)]
    counts: Vec<Value>,
    #[serde(default)]
    gap: Option<Value>,
    #[serde(default)]
    start: Option<Value>,
    #[serde(default)]
    end: Option<Value>,
    #[serde(default)]
    before: Option<u64>,
    #[serde(default)]
    after: Option<u64>,
    #[serde(default)]
    between: Option<u64>,
}

impl RawFacetRange {
    pub(crate) fn into_range(self, field: &str) -> Result<FacetRange> {
        let counts = pair_counts(field, &self.counts)?
            .into_iter()
            .map(|(term, count)| (term.unwrap_or_default(), count))
            .collect();
        Ok(FacetRange {
            counts,
            gap: self.gap,
            start: self.start,
            end: self.end,
            before: self.before,
            after: self.after,
            between: self.between,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_pairing_keeps_order() {
        let mut facets = FacetCounts::default();
        facets
            .rebuild_field("color", &json!(["red", 3, "blue", 7]))
            .unwrap();
        assert_eq!(
            facets.field("color").unwrap(),
            &[("red".to_string(), 3), ("blue".to_string(), 7)]
        );
    }

    #[test]
    fn test_odd_length_fails() {
        let mut facets = FacetCounts::default();
        let err = facets
            .rebuild_field("color", &json!(["red", 3, "blue"]))
            .unwrap_err();
        assert!(matches!(err, SolrLinkError::MalformedFacetResponse(_)));
    }

    #[test]
    fn test_rebuild_clears_previous_values() {
        let mut facets = FacetCounts::default();
        facets.rebuild_field("color", &json!(["red", 3])).unwrap();
        facets.rebuild_field("color", &json!(["green", 1])).unwrap();
        assert_eq!(facets.field("color").unwrap(), &[("green".to_string(), 1)]);
    }

    #[test]
    fn test_null_term_is_missing_count() {
        let mut facets = FacetCounts::default();
        facets
            .rebuild_field("color", &json!(["red", 3, null, 2]))
            .unwrap();
        assert_eq!(facets.field("color").unwrap().len(), 1);
        assert_eq!(facets.facet_missing.get("color"), Some(&2));
    }

    #[test]
    fn test_non_integer_count_fails() {
        let err = pair_counts("size", &[json!("xl"), json!("many")]).unwrap_err();
        assert!(matches!(err, SolrLinkError::MalformedFacetResponse(_)));
    }

    #[test]
    fn test_numeric_terms_become_text() {
        let pairs = pair_counts("year", &[json!(2024), json!(5)]).unwrap();
        assert_eq!(pairs, vec![(Some("2024".to_string()), 5)]);
    }
}
