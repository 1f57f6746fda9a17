//! Add command.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::codec::dynamic::DynamicFieldCodec;
use crate::command::UpdateCommand;
use crate::error::{Result, SolrLinkError};
use crate::query::{QueryParam, param};
use crate::schema::{DocumentSchema, DynamicFieldBinding, FieldCatalog};

/// Optional parameters of an add request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParameters {
    /// Milliseconds within which the documents must be committed.
    pub commit_within: Option<u64>,
    /// Whether a document replaces an existing one with the same unique key.
    pub overwrite: Option<bool>,
}

impl AddParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit_within(mut self, millis: u64) -> Self {
        self.commit_within = Some(millis);
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn parameters(&self) -> Vec<QueryParam> {
        let mut params = Vec::new();
        if let Some(millis) = self.commit_within {
            params.push(param("commitWithin", millis));
        }
        if let Some(overwrite) = self.overwrite {
            params.push(param("overwrite", overwrite));
        }
        params
    }
}

/// Adds or replaces documents.
///
/// One document is sent as `{"add": {"doc": {...}}}`. Several documents are
/// sent as a JSON array of documents, in input order. Every document goes
/// through [`DynamicFieldCodec::encode`] first.
pub struct AddCommand<'a, T> {
    documents: &'a [T],
    parameters: AddParameters,
    codec: DynamicFieldCodec,
    bindings: Arc<[DynamicFieldBinding]>,
}

impl<'a, T: DocumentSchema> AddCommand<'a, T> {
    pub fn new(documents: &'a [T]) -> Self {
        AddCommand {
            documents,
            parameters: AddParameters::default(),
            codec: DynamicFieldCodec::default(),
            bindings: FieldCatalog::bindings::<T>(),
        }
    }

    pub fn with_parameters(mut self, parameters: AddParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_codec(mut self, codec: DynamicFieldCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Serialize and encode one document.
    pub fn encode_document(&self, document: &T) -> Result<Map<String, Value>> {
        let fragment = match serde_json::to_value(document)? {
            Value::Object(fragment) => fragment,
            other => {
                return Err(SolrLinkError::schema(format!(
                    "{} does not serialize to a JSON object: {other}",
                    std::any::type_name::<T>()
                )));
            }
        };
        self.codec.encode(&fragment, &self.bindings)
    }
}

impl<T: DocumentSchema> UpdateCommand for AddCommand<'_, T> {
    fn name(&self) -> &'static str {
        "add"
    }

    fn payload(&self) -> Result<Value> {
        match self.documents {
            [] => Err(SolrLinkError::invalid_argument("add requires at least one document")),
            [document] => Ok(json!({ "add": { "doc": self.encode_document(document)? } })),
            documents => {
                let docs = documents
                    .iter()
                    .map(|d| self.encode_document(d).map(Value::Object))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(docs))
            }
        }
    }

    fn parameters(&self) -> Vec<QueryParam> {
        self.parameters.parameters()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::schema::{DynamicSlot, FieldDescriptor};

    #[derive(Debug, Serialize, Deserialize)]
    struct Contact {
        id: String,
        #[serde(rename = "phone_", default, skip_deserializing)]
        phones: Option<BTreeMap<String, String>>,
    }

    impl DocumentSchema for Contact {
        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::scalar("id").as_unique_key(),
                FieldDescriptor::map::<Option<BTreeMap<String, String>>, _>("phones")
                    .with_wire_name("phone_"),
            ]
        }

        fn dynamic_slot(&mut self, property: &str) -> Option<&mut dyn DynamicSlot> {
            match property {
                "phones" => Some(&mut self.phones),
                _ => None,
            }
        }
    }

    fn contact(id: &str, phones: &[(&str, &str)]) -> Contact {
        Contact {
            id: id.to_string(),
            phones: Some(
                phones
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_single_document_payload() {
        let docs = [contact("1", &[("home", "555-1234")])];
        let payload = AddCommand::new(&docs).payload().unwrap();
        assert_eq!(
            payload,
            json!({"add": {"doc": {"id": "1", "phone_home": "5551234"}}})
        );
    }

    #[test]
    fn test_batch_payload_keeps_every_document() {
        let docs = [contact("1", &[("home", "1")]), contact("2", &[("work", "2")])];
        let payload = AddCommand::new(&docs).payload().unwrap();
        assert_eq!(
            payload,
            json!([
                {"id": "1", "phone_home": "1"},
                {"id": "2", "phone_work": "2"}
            ])
        );
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let docs: [Contact; 0] = [];
        assert!(AddCommand::new(&docs).payload().is_err());
    }

    #[test]
    fn test_add_parameters() {
        let docs = [contact("1", &[])];
        let command = AddCommand::new(&docs).with_parameters(
            AddParameters::new()
                .with_commit_within(1000)
                .with_overwrite(false),
        );
        assert_eq!(
            command.parameters(),
            vec![
                ("commitWithin".to_string(), "1000".to_string()),
                ("overwrite".to_string(), "false".to_string()),
            ]
        );
        assert!(AddCommand::new(&docs).parameters().is_empty());
    }
}
