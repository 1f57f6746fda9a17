//! Schema-less documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SolrLinkError};
use crate::schema::{DocumentSchema, FieldDescriptor};

/// A document kept as a plain JSON object.
///
/// It declares no fields, so it has no dynamic bindings: prefixed fields
/// such as `phone_home` travel as ordinary members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericDocument(Map<String, Value>);

impl GenericDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert<S: Into<String>, V: Into<Value>>(&mut self, field: S, value: V) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Parse documents from a JSON array, a single object or JSON lines.
    pub fn parse_many(content: &str) -> Result<Vec<GenericDocument>> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }
        if let Ok(single) = serde_json::from_str::<GenericDocument>(trimmed) {
            return Ok(vec![single]);
        }

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str(line).map_err(|e| {
                    SolrLinkError::invalid_argument(format!("line {}: {e}", number + 1))
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for GenericDocument {
    fn from(fields: Map<String, Value>) -> Self {
        GenericDocument(fields)
    }
}

impl DocumentSchema for GenericDocument {
    fn fields() -> Vec<FieldDescriptor> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_map_accessors() {
        let mut doc = GenericDocument::new();
        doc.insert("id", "1");
        doc.insert("phone_home", "5551234");
        assert_eq!(doc.as_map().len(), 2);
        assert_eq!(doc.into_map().get("phone_home"), Some(&json!("5551234")));
    }

    #[test]
    fn test_parse_array() {
        let docs = GenericDocument::parse_many(r#"[{"id": "1"}, {"id": "2"}]"#).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].get("id"), Some(&json!("2")));
    }

    #[test]
    fn test_parse_single_object() {
        let docs = GenericDocument::parse_many("{\n  \"id\": \"1\"\n}\n").unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_parse_json_lines() {
        let docs = GenericDocument::parse_many("{\"id\": \"1\"}\n\n{\"id\": \"2\"}\n").unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let err = GenericDocument::parse_many("{\"id\": \"1\"}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_no_dynamic_fields() {
        assert!(<GenericDocument as DocumentSchema>::fields().is_empty());
        assert!(GenericDocument::unique_key().is_none());
    }
}
