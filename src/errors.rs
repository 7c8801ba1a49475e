use std::error::Error;

use crate::catalog::FieldType;

#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// The types and names given to build a schema have different lengths.
    LengthMismatch { types: usize, names: usize },
    /// A field index outside `[0, field_count)`.
    IndexOutOfRange { index: usize, len: usize },
    /// No field carries the requested name.
    NoSuchField(String),
}

#[derive(Debug)]
pub enum FieldError {
    IOError(std::io::Error),
    /// A serialized string does not hold valid UTF-8
    InvalidUtf8,
    /// A serialized string declares a length over `STRING_LEN`
    StringTooLong(usize),
}

#[derive(Debug)]
pub enum TupleError {
    /// The schema is absent or has no fields. Tuples can only be bound to a schema
    /// with at least one field.
    InvalidSchema,
    /// A slot index outside `[0, field_count)`.
    IndexOutOfRange { index: usize, len: usize },
    /// The slot at `index` holds no value and the operation needs one.
    ValueMissing { index: usize },
    /// The text of the field at `index` contains a dump delimiter, so it has no
    /// unambiguous line form.
    UnrenderableValue { index: usize },
    /// A checked write whose field disagrees with the schema type at `index`.
    TypeMismatch {
        index: usize,
        expected: FieldType,
        found: FieldType,
    },
    /// Derived error from a field codec
    FieldError(FieldError),
    IOError(std::io::Error),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::LengthMismatch { types, names } => {
                write!(f, "Schema has {types} types but {names} names")
            }
            SchemaError::IndexOutOfRange { index, len } => {
                write!(f, "Field index {index} out of range for schema of {len} fields")
            }
            SchemaError::NoSuchField(name) => write!(f, "No field named {name:?}"),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::IOError(err) => write!(f, "IO error: {}", err),
            FieldError::InvalidUtf8 => write!(f, "String field is not valid UTF-8"),
            FieldError::StringTooLong(len) => {
                write!(f, "String field of {len} bytes exceeds the maximum length")
            }
        }
    }
}

impl std::fmt::Display for TupleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TupleError::InvalidSchema => {
                write!(f, "Tuple requires a schema with at least one field")
            }
            TupleError::IndexOutOfRange { index, len } => {
                write!(f, "Slot index {index} out of range for tuple of {len} fields")
            }
            TupleError::ValueMissing { index } => write!(f, "Slot {index} holds no value"),
            TupleError::UnrenderableValue { index } => {
                write!(f, "Slot {index} holds a tab or newline and cannot be dumped")
            }
            TupleError::TypeMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "Slot {index} expects a {expected} field but got a {found} field"
            ),
            TupleError::FieldError(field_error) => write!(f, "Field error: {}", field_error),
            TupleError::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::convert::From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::IOError(err)
    }
}

impl std::convert::From<FieldError> for TupleError {
    fn from(err: FieldError) -> Self {
        TupleError::FieldError(err)
    }
}

impl std::convert::From<std::io::Error> for TupleError {
    fn from(err: std::io::Error) -> Self {
        TupleError::IOError(err)
    }
}

impl Error for SchemaError {}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FieldError::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl Error for TupleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TupleError::FieldError(err) => Some(err),
            TupleError::IOError(err) => Some(err),
            _ => None,
        }
    }
}
