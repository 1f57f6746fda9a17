//! Field declarations for document types.
//!
//! Rust has no runtime reflection, so a document type describes its own
//! properties through [`DocumentSchema::fields`]. The descriptors carry the
//! wire name of each property and, for key/value mappings, the element type
//! of the mapping taken from the property's generic argument.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, SolrLinkError};

/// Character that marks a wire name as a dynamic field family (`phone_`).
pub const DYNAMIC_FIELD_MARKER: char = '_';

/// Element type of a dynamic mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `String` values.
    Text,
    /// 32-bit signed integer values.
    Int32,
    /// Single precision floating point values.
    Float32,
}

impl ValueKind {
    /// Rust type name of the element, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "String",
            ValueKind::Int32 => "i32",
            ValueKind::Float32 => "f32",
        }
    }
}

/// Shape of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Ordinary field, handled by serde alone.
    Scalar,
    /// String-keyed mapping with the given element type.
    Map(ValueKind),
}

/// Metadata for one property of a document type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    property: String,
    wire_name: Option<String>,
    shape: FieldShape,
    boost: Option<f32>,
    unique_key: bool,
}

impl FieldDescriptor {
    /// Describe an ordinary property.
    pub fn scalar<S: Into<String>>(property: S) -> Self {
        FieldDescriptor {
            property: property.into(),
            wire_name: None,
            shape: FieldShape::Scalar,
            boost: None,
            unique_key: false,
        }
    }

    /// Describe a mapping-valued property of type `M`.
    ///
    /// The element type is read from `M`, so a property declared as
    /// `Option<HashMap<String, i32>>` is described with
    /// `FieldDescriptor::map::<Option<HashMap<String, i32>>>("ranks")`.
    pub fn map<M: DynamicMapType, S: Into<String>>(property: S) -> Self {
        FieldDescriptor {
            property: property.into(),
            wire_name: None,
            shape: FieldShape::Map(M::VALUE_KIND),
            boost: None,
            unique_key: false,
        }
    }

    /// Set the explicit wire name of the property.
    pub fn with_wire_name<S: Into<String>>(mut self, wire_name: S) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Set an index-time boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Mark the property as the unique key of the document type.
    pub fn as_unique_key(mut self) -> Self {
        self.unique_key = true;
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn wire_name(&self) -> Option<&str> {
        self.wire_name.as_deref()
    }

    /// The wire name if declared, otherwise the property name.
    pub fn effective_wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.property)
    }

    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn boost(&self) -> Option<f32> {
        self.boost
    }

    pub fn is_unique_key(&self) -> bool {
        self.unique_key
    }

    /// Check whether this property is a dynamic field family.
    ///
    /// True when the property declares a wire name containing
    /// [`DYNAMIC_FIELD_MARKER`] and its type is a string-keyed mapping.
    pub fn is_dynamic(&self) -> bool {
        let marked = self
            .wire_name
            .as_deref()
            .is_some_and(|name| name.contains(DYNAMIC_FIELD_MARKER));
        marked && matches!(self.shape, FieldShape::Map(_))
    }
}

/// Capability a document type provides in place of reflection.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use serde::{Deserialize, Serialize};
/// use solrlink::schema::{DocumentSchema, DynamicSlot, FieldDescriptor};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Contact {
///     id: String,
///     #[serde(rename = "phone_", default, skip_deserializing)]
///     phones: Option<HashMap<String, String>>,
/// }
///
/// impl DocumentSchema for Contact {
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::scalar("id").as_unique_key(),
///             FieldDescriptor::map::<Option<HashMap<String, String>>, _>("phones")
///                 .with_wire_name("phone_"),
///         ]
///     }
///
///     fn dynamic_slot(&mut self, property: &str) -> Option<&mut dyn DynamicSlot> {
///         match property {
///             "phones" => Some(&mut self.phones),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait DocumentSchema: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Describe every property of the type.
    fn fields() -> Vec<FieldDescriptor>;

    /// Mutable access to the mapping behind a dynamic property.
    fn dynamic_slot(&mut self, _property: &str) -> Option<&mut dyn DynamicSlot> {
        None
    }

    /// The descriptor marked as unique key, if any.
    fn unique_key() -> Option<FieldDescriptor> {
        Self::fields().into_iter().find(|f| f.is_unique_key())
    }
}

/// Element types allowed in a dynamic mapping.
pub trait DynamicScalar: Sized {
    const KIND: ValueKind;

    /// Parse the textual wire value of `field`.
    fn parse_wire(field: &str, raw: &str) -> Result<Self>;
}

impl DynamicScalar for String {
    const KIND: ValueKind = ValueKind::Text;

    fn parse_wire(_field: &str, raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

impl DynamicScalar for i32 {
    const KIND: ValueKind = ValueKind::Int32;

    fn parse_wire(field: &str, raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| SolrLinkError::numeric_parse(field, raw, Self::KIND.type_name()))
    }
}

impl DynamicScalar for f32 {
    const KIND: ValueKind = ValueKind::Float32;

    fn parse_wire(field: &str, raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<f32>()
            .map_err(|_| SolrLinkError::numeric_parse(field, raw, Self::KIND.type_name()))
    }
}

/// Static element type of a mapping property.
pub trait DynamicMapType {
    const VALUE_KIND: ValueKind;
}

impl<V: DynamicScalar> DynamicMapType for HashMap<String, V> {
    const VALUE_KIND: ValueKind = V::KIND;
}

impl<V: DynamicScalar> DynamicMapType for BTreeMap<String, V> {
    const VALUE_KIND: ValueKind = V::KIND;
}

impl<M: DynamicMapType> DynamicMapType for Option<M> {
    const VALUE_KIND: ValueKind = M::VALUE_KIND;
}

/// Object-safe handle to a mapping property, used while decoding.
pub trait DynamicSlot {
    /// Element type of the mapping.
    fn value_kind(&self) -> ValueKind;

    /// Parse `raw` and insert it under `key`. `field` names the wire field
    /// the value came from.
    fn insert_wire(&mut self, field: &str, key: String, raw: &str) -> Result<()>;
}

impl<V: DynamicScalar> DynamicSlot for HashMap<String, V> {
    fn value_kind(&self) -> ValueKind {
        V::KIND
    }

    fn insert_wire(&mut self, field: &str, key: String, raw: &str) -> Result<()> {
        let value = V::parse_wire(field, raw)?;
        self.insert(key, value);
        Ok(())
    }
}

impl<V: DynamicScalar> DynamicSlot for BTreeMap<String, V> {
    fn value_kind(&self) -> ValueKind {
        V::KIND
    }

    fn insert_wire(&mut self, field: &str, key: String, raw: &str) -> Result<()> {
        let value = V::parse_wire(field, raw)?;
        self.insert(key, value);
        Ok(())
    }
}

impl<M> DynamicSlot for Option<M>
where
    M: DynamicSlot + DynamicMapType + Default,
{
    fn value_kind(&self) -> ValueKind {
        M::VALUE_KIND
    }

    fn insert_wire(&mut self, field: &str, key: String, raw: &str) -> Result<()> {
        match self {
            Some(map) => map.insert_wire(field, key, raw),
            None => {
                let mut map = M::default();
                map.insert_wire(field, key, raw)?;
                *self = Some(map);
                Ok(())
            }
        }
    }
}
