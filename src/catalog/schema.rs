use std::fmt;
use std::sync::Arc;

use super::field_type::FieldType;
use crate::errors::SchemaError;

/// Schemas are shared by every tuple bound to them and never mutated once built.
pub type SchemaRef = Arc<Schema>;

#[derive(Debug, Clone)]
pub struct SchemaItem {
    pub field_type: FieldType,
    /// Anonymous fields (e.g. computed by an operator) have no name
    pub field_name: Option<String>,
}

/// Ordered description of the fields of a tuple: their count, types and names.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    items: Vec<SchemaItem>,
}

impl Schema {
    pub fn new(types: Vec<FieldType>, names: Vec<Option<String>>) -> Result<Self, SchemaError> {
        if types.len() != names.len() {
            return Err(SchemaError::LengthMismatch {
                types: types.len(),
                names: names.len(),
            });
        }

        let items = types
            .into_iter()
            .zip(names)
            .map(|(field_type, field_name)| SchemaItem {
                field_type,
                field_name,
            })
            .collect();

        Ok(Schema { items })
    }

    /// A schema whose fields are all anonymous
    pub fn from_types(types: Vec<FieldType>) -> Self {
        let items = types
            .into_iter()
            .map(|field_type| SchemaItem {
                field_type,
                field_name: None,
            })
            .collect();

        Schema { items }
    }

    /// A schema with no fields. It is a valid descriptor, but tuples cannot be bound to it.
    pub fn empty() -> Self {
        Schema::default()
    }

    /// Concatenates the fields of `first` and `second`, in that order.
    pub fn merge(first: &Schema, second: &Schema) -> Self {
        let items = first.items.iter().chain(&second.items).cloned().collect();
        Schema { items }
    }

    pub fn field_count(&self) -> usize {
        self.items.len()
    }

    pub fn field_type(&self, index: usize) -> Result<FieldType, SchemaError> {
        self.item(index).map(|item| item.field_type)
    }

    pub fn field_name(&self, index: usize) -> Result<Option<&str>, SchemaError> {
        self.item(index).map(|item| item.field_name.as_deref())
    }

    /// Index of the first field named `name`
    pub fn index_of(&self, name: &str) -> Result<usize, SchemaError> {
        self.items
            .iter()
            .position(|item| item.field_name.as_deref() == Some(name))
            .ok_or_else(|| SchemaError::NoSuchField(name.to_string()))
    }

    /// Size (in bytes) of a tuple of this schema once serialized
    pub fn byte_size(&self) -> usize {
        self.items.iter().map(|item| item.field_type.byte_len()).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &SchemaItem> {
        self.items.iter()
    }

    fn item(&self, index: usize) -> Result<&SchemaItem, SchemaError> {
        self.items.get(index).ok_or(SchemaError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }
}

/// Two schemas are equal when they declare the same types in the same order.
/// Names do not take part in the comparison.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.field_type == b.field_type)
    }
}

impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &item.field_name {
                Some(name) => write!(f, "{}({})", item.field_type, name)?,
                None => write!(f, "{}(null)", item.field_type)?,
            }
        }
        Ok(())
    }
}
