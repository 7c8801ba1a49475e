use crate::macros::static_assert;

pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Maximum size (in bytes) of the contents of a string field.
/// Longer strings are truncated when the field is built.
pub const STRING_LEN: usize = 128;

/// Size (in bytes) of a serialized integer field
pub const INT_LEN: usize = 4;

/// Separates two fields in the textual dump of a tuple
pub const FIELD_DELIMITER: char = '\t';
/// Ends every tuple line in the textual dump
pub const TUPLE_TERMINATOR: char = '\n';

/// Used when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

static_assert!(INT_LEN == std::mem::size_of::<i32>());
static_assert!(STRING_LEN > 0 && STRING_LEN <= u32::MAX as usize);
static_assert!(FIELD_DELIMITER != TUPLE_TERMINATOR, "dump delimiters must differ");
