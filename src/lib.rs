mod config;
mod errors;
mod macros;

// For submodules I only expose the public API to the parent module

pub mod catalog {
    mod field_type;
    mod schema;

    pub use field_type::FieldType;
    pub use schema::{Schema, SchemaItem, SchemaRef};
}

pub mod storage {
    mod field;
    mod record_id;
    mod tuple;

    pub use field::{Field, Op};
    pub use record_id::{PageId, RecordId, SlotId};
    pub use tuple::{write_dump, Fields, Tuple};
}

pub mod shared {
    pub mod logger;
}

pub use config::STRING_LEN;
pub use errors::{FieldError, SchemaError, TupleError};
