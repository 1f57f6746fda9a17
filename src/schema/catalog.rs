//! Dynamic field bindings per document type.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use log::debug;
use parking_lot::RwLock;

use crate::schema::field::{DocumentSchema, FieldDescriptor};

/// A mapping property and the wire name prefix of its generated fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DynamicFieldBinding {
    /// Declared wire name, e.g. `phone_`.
    pub prefix: String,
    /// Property passed to [`DocumentSchema::dynamic_slot`].
    pub property: String,
}

impl DynamicFieldBinding {
    pub fn new<P: Into<String>, Q: Into<String>>(prefix: P, property: Q) -> Self {
        DynamicFieldBinding {
            prefix: prefix.into(),
            property: property.into(),
        }
    }
}

static BINDINGS: LazyLock<RwLock<HashMap<TypeId, Arc<[DynamicFieldBinding]>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Derives and memoizes dynamic field bindings.
pub struct FieldCatalog;

impl FieldCatalog {
    /// Bindings of `T`, computed on first use and cached for the process.
    pub fn bindings<T: DocumentSchema>() -> Arc<[DynamicFieldBinding]> {
        let key = TypeId::of::<T>();
        if let Some(bindings) = BINDINGS.read().get(&key) {
            return Arc::clone(bindings);
        }

        let derived: Arc<[DynamicFieldBinding]> = Self::derive(&T::fields()).into();
        debug!(
            "derived {} dynamic field binding(s) for {}",
            derived.len(),
            type_name::<T>()
        );

        // A concurrent caller may have won the race; both computed the same value.
        let mut guard = BINDINGS.write();
        Arc::clone(guard.entry(key).or_insert(derived))
    }

    /// Uncached derivation from a list of descriptors.
    ///
    /// Descriptors that are not dynamic are skipped. The first declaration
    /// wins when two properties claim the same wire name.
    pub fn derive(fields: &[FieldDescriptor]) -> Vec<DynamicFieldBinding> {
        let mut bindings: Vec<DynamicFieldBinding> = Vec::new();
        for field in fields.iter().filter(|f| f.is_dynamic()) {
            let prefix = field.effective_wire_name();
            if bindings.iter().any(|b| b.prefix == prefix) {
                debug!(
                    "ignoring duplicate dynamic field '{prefix}' on property '{}'",
                    field.property()
                );
                continue;
            }
            bindings.push(DynamicFieldBinding::new(prefix, field.property()));
        }
        bindings
    }
}
