use std::fmt;
use std::io::Read;

use crate::config::{INT_LEN, STRING_LEN};
use crate::errors::FieldError;
use crate::storage::Field;

/// The scalar kinds a schema position can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    String,
}

impl FieldType {
    /// Number of bytes a field of this type takes once serialized.
    /// Strings carry a 4 byte length prefix ahead of the padded contents.
    pub const fn byte_len(self) -> usize {
        match self {
            FieldType::Int => INT_LEN,
            FieldType::String => STRING_LEN + 4,
        }
    }

    /// Reads one field of this type, as written by [`Field::serialize`].
    pub fn parse<R: Read>(self, reader: &mut R) -> Result<Field, FieldError> {
        match self {
            FieldType::Int => {
                let mut buf = [0u8; INT_LEN];
                reader.read_exact(&mut buf)?;
                Ok(Field::Int(i32::from_be_bytes(buf)))
            }
            FieldType::String => {
                let mut len_buf = [0u8; 4];
                reader.read_exact(&mut len_buf)?;
                let len = u32::from_be_bytes(len_buf) as usize;
                if len > STRING_LEN {
                    return Err(FieldError::StringTooLong(len));
                }

                // The slot is always STRING_LEN wide, only the first `len` bytes matter
                let mut buf = [0u8; STRING_LEN];
                reader.read_exact(&mut buf)?;
                let value =
                    std::str::from_utf8(&buf[..len]).map_err(|_| FieldError::InvalidUtf8)?;
                Ok(Field::String(value.to_owned()))
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => write!(f, "INT_TYPE"),
            FieldType::String => write!(f, "STRING_TYPE"),
        }
    }
}
