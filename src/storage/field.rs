use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

use crate::catalog::FieldType;
use crate::config::STRING_LEN;
use crate::errors::FieldError;

/// Comparison predicates a field can be evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEq,
    LessThan,
    LessThanOrEq,
    Like,
}

/// A single typed value stored in one slot of a tuple.
///
/// Fields of different kinds never compare as equal, even when their text is the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Int(i32),
    /// Meant to hold at most `STRING_LEN` bytes. [`Field::string`], the `From` impls and
    /// [`FieldType::parse`] enforce the bound. A value built directly with this variant is
    /// unchecked until [`Field::serialize`] rejects it.
    String(String),
}

impl Field {
    /// Builds a string field, truncating `value` to `STRING_LEN` bytes on a char boundary.
    pub fn string(value: impl Into<String>) -> Self {
        let mut value = value.into();
        if value.len() > STRING_LEN {
            let mut end = STRING_LEN;
            while !value.is_char_boundary(end) {
                end -= 1;
            }
            value.truncate(end);
        }
        Field::String(value)
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Int(_) => FieldType::Int,
            Field::String(_) => FieldType::String,
        }
    }

    /// Evaluates `self op other`. Fields of different kinds satisfy no predicate.
    pub fn compare(&self, op: Op, other: &Field) -> bool {
        match (self, other) {
            (Field::Int(a), Field::Int(b)) => match op {
                // LIKE has no meaning for integers, degrade it to equality
                Op::Like => a == b,
                _ => op.holds(a.cmp(b)),
            },
            (Field::String(a), Field::String(b)) => match op {
                Op::Like => a.contains(b.as_str()),
                _ => op.holds(a.cmp(b)),
            },
            _ => false,
        }
    }

    /// Writes the binary form of this field. Its width is always `field_type().byte_len()`.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), FieldError> {
        match self {
            Field::Int(value) => writer.write_all(&value.to_be_bytes())?,
            Field::String(value) => {
                let bytes = value.as_bytes();
                if bytes.len() > STRING_LEN {
                    return Err(FieldError::StringTooLong(bytes.len()));
                }

                let mut padded = [0u8; STRING_LEN];
                padded[..bytes.len()].copy_from_slice(bytes);
                writer.write_all(&(bytes.len() as u32).to_be_bytes())?;
                writer.write_all(&padded)?;
            }
        }
        Ok(())
    }
}

impl Op {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Equals | Op::Like => ordering == Ordering::Equal,
            Op::NotEquals => ordering != Ordering::Equal,
            Op::GreaterThan => ordering == Ordering::Greater,
            Op::GreaterThanOrEq => ordering != Ordering::Less,
            Op::LessThan => ordering == Ordering::Less,
            Op::LessThanOrEq => ordering != Ordering::Greater,
        }
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Int(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::string(value)
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::string(value)
    }
}

/// The canonical text of a field, as it appears in tuple dumps
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(value) => write!(f, "{value}"),
            Field::String(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Op::Equals => "=",
            Op::NotEquals => "<>",
            Op::GreaterThan => ">",
            Op::GreaterThanOrEq => ">=",
            Op::LessThan => "<",
            Op::LessThanOrEq => "<=",
            Op::Like => "LIKE",
        };
        write!(f, "{symbol}")
    }
}
