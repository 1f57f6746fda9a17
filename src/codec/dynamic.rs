//! Expansion and collapse of dynamic mapping properties.
//!
//! On the way out, a mapping property stored under its family wire name
//! (`phone_`) becomes one scalar field per entry (`phone_home`,
//! `phone_work`). On the way back, every response field whose name contains
//! a family wire name is folded into the mapping again.
//!
//! Keys and values are reduced to ASCII letters and digits before they are
//! written. Two keys that differ only in punctuation (`a-1`, `a1`) therefore
//! land on the same wire field and the later entry wins. Servers and existing
//! consumers rely on these names, so the normalization is part of the wire
//! contract.
//!
//! Numeric values go through the same reduction: `-4` is written as `4` and
//! `2.5` as `25`. Signed and fractional map values do not round trip.

use std::any::type_name;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SolrLinkError};
use crate::schema::{DocumentSchema, DynamicFieldBinding};

/// Separator between entries of a delimited mapping value.
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between key and value inside one entry.
pub const KEY_VALUE_SEPARATOR: char = ':';

/// Which key a decoded entry is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyIdentity {
    /// The full wire field name, e.g. `phone_home`.
    #[default]
    RawWireName,
    /// The part of the wire name after the family prefix, e.g. `home`.
    Suffix,
}

/// Encoder/decoder for dynamic field families.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicFieldCodec {
    key_identity: KeyIdentity,
}

impl DynamicFieldCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_identity(key_identity: KeyIdentity) -> Self {
        DynamicFieldCodec { key_identity }
    }

    pub fn key_identity(&self) -> KeyIdentity {
        self.key_identity
    }

    /// Flatten every bound mapping property of `fragment`.
    ///
    /// Returns a new fragment; `fragment` itself is left untouched. A bound
    /// property may hold a delimited `key:value,key:value` string or a JSON
    /// object. An entry without `:` rejects the whole document. Fragments
    /// that are already flat come back unchanged.
    ///
    /// Values are sanitized like keys, so numbers lose their sign and decimal
    /// point: `-4` is written as `4` and `2.5` as `25`. Only text maps and
    /// non-negative integer maps survive the wire unchanged.
    pub fn encode(
        &self,
        fragment: &Map<String, Value>,
        bindings: &[DynamicFieldBinding],
    ) -> Result<Map<String, Value>> {
        let mut encoded = fragment.clone();

        for binding in bindings {
            let Some(value) = encoded.remove(&binding.prefix) else {
                continue;
            };

            for (key, value) in mapping_entries(&binding.prefix, &value)? {
                let name = format!("{}{}", binding.prefix, key);
                if encoded.contains_key(&name) {
                    trace!("dynamic field '{name}' written more than once, keeping last value");
                }
                encoded.insert(name, Value::String(value));
            }
        }

        Ok(encoded)
    }

    /// Fold the dynamic fields of a response document into `target`.
    ///
    /// A field belongs to the first binding whose prefix occurs anywhere in
    /// its name. Returns the number of entries written.
    pub fn decode<T: DocumentSchema>(
        &self,
        document: &Map<String, Value>,
        bindings: &[DynamicFieldBinding],
        target: &mut T,
    ) -> Result<usize> {
        let mut decoded = 0;

        for (name, value) in document {
            let Some(binding) = bindings.iter().find(|b| name.contains(b.prefix.as_str())) else {
                continue;
            };

            let slot = target.dynamic_slot(&binding.property).ok_or_else(|| {
                SolrLinkError::schema(format!(
                    "{} binds '{}' to property '{}' but exposes no slot for it",
                    type_name::<T>(),
                    binding.prefix,
                    binding.property
                ))
            })?;

            let key = self.entry_key(name, &binding.prefix);
            trace!(
                "decoding '{name}' into {}.{} as {}",
                type_name::<T>(),
                binding.property,
                slot.value_kind().type_name()
            );
            slot.insert_wire(name, key, &wire_text(value))?;
            decoded += 1;
        }

        Ok(decoded)
    }

    fn entry_key(&self, name: &str, prefix: &str) -> String {
        match self.key_identity {
            KeyIdentity::RawWireName => name.to_string(),
            KeyIdentity::Suffix => match name.find(prefix) {
                Some(start) => name[start + prefix.len()..].to_string(),
                None => name.to_string(),
            },
        }
    }
}

/// Remove every character that is not an ASCII letter or digit.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Sanitized `(key, value)` entries of one mapping property.
fn mapping_entries(field: &str, value: &Value) -> Result<Vec<(String, String)>> {
    let raw_entries: Vec<(String, String)> = match value {
        Value::Null => return Ok(Vec::new()),
        Value::String(delimited) => delimited
            .split(ENTRY_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| {
                entry
                    .split_once(KEY_VALUE_SEPARATOR)
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .ok_or_else(|| {
                        SolrLinkError::malformed_dynamic_field(
                            field,
                            format!("entry '{entry}' has no '{KEY_VALUE_SEPARATOR}' separator"),
                        )
                    })
            })
            .collect::<Result<_>>()?,
        Value::Object(members) => members
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), wire_text(v)))
            .collect(),
        other => {
            return Err(SolrLinkError::malformed_dynamic_field(
                field,
                format!("expected a delimited string or an object, found {other}"),
            ));
        }
    };

    raw_entries
        .into_iter()
        .map(|(key, value)| {
            let clean_key = sanitize(&key);
            if clean_key.is_empty() {
                return Err(SolrLinkError::malformed_dynamic_field(
                    field,
                    format!("key '{key}' has no letters or digits"),
                ));
            }
            Ok((clean_key, sanitize(&value)))
        })
        .collect()
}

/// Textual form of a wire value.
///
/// Single element arrays (multi-valued fields holding one value) are
/// unwrapped.
fn wire_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.len() == 1 && !items[0].is_array() => wire_text(&items[0]),
        other => other.to_string(),
    }
}
