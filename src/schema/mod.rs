//! Document type metadata.
//!
//! This module provides the [`DocumentSchema`] capability that document types
//! implement, and the [`FieldCatalog`] that turns their declarations into
//! dynamic field bindings.

pub mod catalog;
pub mod field;

pub use catalog::{DynamicFieldBinding, FieldCatalog};
pub use field::{
    DYNAMIC_FIELD_MARKER, DocumentSchema, DynamicMapType, DynamicScalar, DynamicSlot,
    FieldDescriptor, FieldShape, ValueKind,
};
