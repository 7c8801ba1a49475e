use std::io::Write;
use std::iter::FusedIterator;

use crate::catalog::SchemaRef;
use crate::config::{FIELD_DELIMITER, TUPLE_TERMINATOR};
use crate::errors::TupleError;
use crate::storage::{Field, RecordId};

/// One row of a table: a fixed number of field slots laid out by a schema, plus the
/// location of the row on disk once it is known.
///
/// # Contract
///
/// - There is always one slot per schema field, and the schema has at least one field.
/// - Slots start unset. Reading an unset slot yields `None`, never a zero value.
/// - Writes are not checked against the schema types, that agreement is up to the
///   caller. [`Tuple::set_field_checked`] is the strict alternative.
/// - A tuple has a single writer at a time. Once nobody mutates it anymore it can be
///   shared between readers.
#[derive(Debug, Clone)]
pub struct Tuple {
    schema: SchemaRef,
    values: Vec<Option<Field>>,
    record_id: Option<RecordId>,
}

impl Tuple {
    /// Creates a tuple with every slot unset and no record id.
    /// Fails with [`TupleError::InvalidSchema`] if the schema has no fields.
    pub fn new(schema: SchemaRef) -> Result<Self, TupleError> {
        let values = Self::unset_slots(&schema)?;
        Ok(Tuple {
            schema,
            values,
            record_id: None,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    pub fn set_record_id(&mut self, record_id: RecordId) {
        self.record_id = Some(record_id);
    }

    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    /// Overwrites slot `index`. Passing `None` clears it.
    pub fn set_field(
        &mut self,
        index: usize,
        value: impl Into<Option<Field>>,
    ) -> Result<(), TupleError> {
        *self.slot_mut(index)? = value.into();
        Ok(())
    }

    /// Like [`Tuple::set_field`], but rejects a field whose type differs from the one the
    /// schema declares for that slot.
    pub fn set_field_checked(&mut self, index: usize, value: Field) -> Result<(), TupleError> {
        let expected = self
            .schema
            .field_type(index)
            .map_err(|_| TupleError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })?;

        let found = value.field_type();
        if expected != found {
            return Err(TupleError::TypeMismatch {
                index,
                expected,
                found,
            });
        }

        self.set_field(index, value)
    }

    pub fn clear_field(&mut self, index: usize) -> Result<(), TupleError> {
        *self.slot_mut(index)? = None;
        Ok(())
    }

    /// Returns the field at slot `index`, or `None` if it was never set.
    pub fn get_field(&self, index: usize) -> Result<Option<&Field>, TupleError> {
        self.values
            .get(index)
            .map(Option::as_ref)
            .ok_or(TupleError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Whether every slot holds a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Iterates over the slots in index order, unset slots included.
    ///
    /// Every call starts a new traversal from slot 0. The iterator borrows the tuple, so
    /// slots cannot change while a traversal is alive.
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            inner: self.values.iter(),
        }
    }

    /// Binds the tuple to another schema. All slots are reset to unset, sized for the new
    /// schema. The record id is kept.
    ///
    /// On failure the tuple is left untouched.
    pub fn reset_schema(&mut self, schema: SchemaRef) -> Result<(), TupleError> {
        let values = Self::unset_slots(&schema)?;
        log::trace!(
            "Rebinding tuple from {} to {} fields",
            self.values.len(),
            values.len()
        );
        self.schema = schema;
        self.values = values;
        Ok(())
    }

    /// Renders the tuple in the dump format: the fields separated by a tab, followed by a
    /// newline. Fails with [`TupleError::ValueMissing`] on the first unset slot, and with
    /// [`TupleError::UnrenderableValue`] on the first field whose text holds a tab or a
    /// newline.
    pub fn render(&self) -> Result<String, TupleError> {
        let mut line = String::new();
        for (index, value) in self.fields().enumerate() {
            let field = value.ok_or_else(|| {
                log::debug!("Cannot render tuple, slot {index} is unset");
                TupleError::ValueMissing { index }
            })?;

            let text = field.to_string();
            if text.contains([FIELD_DELIMITER, TUPLE_TERMINATOR]) {
                log::debug!("Cannot render tuple, slot {index} holds a dump delimiter");
                return Err(TupleError::UnrenderableValue { index });
            }

            if index > 0 {
                line.push(FIELD_DELIMITER);
            }
            line.push_str(&text);
        }
        line.push(TUPLE_TERMINATOR);
        Ok(line)
    }

    /// Writes the rendered line of this tuple.
    /// Nothing is written when the tuple cannot be rendered.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), TupleError> {
        let line = self.render()?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<Field>, TupleError> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(TupleError::IndexOutOfRange { index, len })
    }

    fn unset_slots(schema: &SchemaRef) -> Result<Vec<Option<Field>>, TupleError> {
        match schema.field_count() {
            0 => Err(TupleError::InvalidSchema),
            n => Ok(vec![None; n]),
        }
    }
}

/// An absent schema is rejected the same way as an empty one
impl TryFrom<Option<SchemaRef>> for Tuple {
    type Error = TupleError;

    fn try_from(schema: Option<SchemaRef>) -> Result<Self, Self::Error> {
        Tuple::new(schema.ok_or(TupleError::InvalidSchema)?)
    }
}

/// Writes `tuples` one line each, stopping at the first tuple that cannot be rendered.
pub fn write_dump<'a, W, I>(tuples: I, writer: &mut W) -> Result<usize, TupleError>
where
    W: Write,
    I: IntoIterator<Item = &'a Tuple>,
{
    let mut written = 0;
    for tuple in tuples {
        tuple.write_to(writer)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Iterator over the slots of a tuple, see [`Tuple::fields`]
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    inner: std::slice::Iter<'a, Option<Field>>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = Option<&'a Field>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Fields<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Option::as_ref)
    }
}

impl ExactSizeIterator for Fields<'_> {}

impl FusedIterator for Fields<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldType, Schema};
    use crate::shared::logger::setup_logger;
    use std::sync::Arc;

    fn schema(types: Vec<FieldType>) -> SchemaRef {
        Arc::new(Schema::from_types(types))
    }

    fn int_schema(n: usize) -> SchemaRef {
        schema(vec![FieldType::Int; n])
    }

    #[test]
    fn test_new_tuple_shape() {
        for n in 1..=5 {
            let tuple = Tuple::new(int_schema(n)).unwrap();
            assert_eq!(tuple.field_count(), n);
            assert!(tuple.fields().all(|field| field.is_none()));
            assert_eq!(tuple.record_id(), None);
            assert!(!tuple.is_complete());
        }
    }

    #[test]
    fn test_new_rejects_invalid_schema() {
        let result = Tuple::new(Arc::new(Schema::empty()));
        assert!(matches!(result, Err(TupleError::InvalidSchema)));

        let result = Tuple::try_from(None::<SchemaRef>);
        assert!(matches!(result, Err(TupleError::InvalidSchema)));

        let tuple = Tuple::try_from(Some(int_schema(2))).unwrap();
        assert_eq!(tuple.field_count(), 2);
    }

    #[test]
    fn test_set_then_get() {
        let mut tuple = Tuple::new(schema(vec![FieldType::Int, FieldType::String])).unwrap();

        tuple.set_field(0, Field::Int(7)).unwrap();
        tuple.set_field(1, Field::string("seven")).unwrap();

        assert_eq!(tuple.get_field(0).unwrap(), Some(&Field::Int(7)));
        assert_eq!(tuple.get_field(1).unwrap(), Some(&Field::string("seven")));
        assert!(tuple.is_complete());

        tuple.clear_field(0).unwrap();
        assert_eq!(tuple.get_field(0).unwrap(), None);

        tuple.set_field(1, None::<Field>).unwrap();
        assert_eq!(tuple.get_field(1).unwrap(), None);
    }

    #[test]
    fn test_writes_are_not_type_checked() {
        let mut tuple = Tuple::new(int_schema(1)).unwrap();
        tuple.set_field(0, Field::string("not an int")).unwrap();
        assert_eq!(tuple.get_field(0).unwrap(), Some(&Field::string("not an int")));
    }

    #[test]
    fn test_checked_write() {
        let mut tuple = Tuple::new(schema(vec![FieldType::Int, FieldType::String])).unwrap();

        tuple.set_field_checked(0, Field::Int(1)).unwrap();
        let result = tuple.set_field_checked(1, Field::Int(2));
        assert!(matches!(
            result,
            Err(TupleError::TypeMismatch {
                index: 1,
                expected: FieldType::String,
                found: FieldType::Int,
            })
        ));
        assert_eq!(tuple.get_field(1).unwrap(), None);

        let result = tuple.set_field_checked(2, Field::Int(2));
        assert!(matches!(
            result,
            Err(TupleError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut tuple = Tuple::new(int_schema(3)).unwrap();

        for index in [3, 4, usize::MAX] {
            assert!(matches!(
                tuple.get_field(index),
                Err(TupleError::IndexOutOfRange { len: 3, .. })
            ));
            assert!(matches!(
                tuple.set_field(index, Field::Int(1)),
                Err(TupleError::IndexOutOfRange { len: 3, .. })
            ));
        }
        assert!(tuple.fields().all(|field| field.is_none()));
    }

    #[test]
    fn test_record_id() {
        let mut tuple = Tuple::new(int_schema(1)).unwrap();

        tuple.set_record_id(RecordId::new(3, 9));
        assert_eq!(tuple.record_id(), Some(RecordId::new(3, 9)));

        tuple.set_record_id(RecordId::new(4, 0));
        assert_eq!(tuple.record_id(), Some(RecordId::new(4, 0)));
        assert_eq!(RecordId::new(4, 0).to_string(), "(4, 0)");
    }

    #[test]
    fn test_reset_schema() {
        setup_logger();

        let mut tuple = Tuple::new(int_schema(2)).unwrap();
        tuple.set_field(0, Field::Int(1)).unwrap();
        tuple.set_field(1, Field::Int(2)).unwrap();
        tuple.set_record_id(RecordId::new(1, 2));

        let projected = schema(vec![FieldType::String, FieldType::Int, FieldType::Int]);
        tuple.reset_schema(projected.clone()).unwrap();

        assert!(Arc::ptr_eq(tuple.schema(), &projected));
        assert_eq!(tuple.field_count(), 3);
        assert!(tuple.fields().all(|field| field.is_none()));
        assert_eq!(tuple.record_id(), Some(RecordId::new(1, 2)));

        tuple.reset_schema(int_schema(1)).unwrap();
        assert_eq!(tuple.field_count(), 1);
    }

    #[test]
    fn test_reset_schema_rejects_empty_schema() {
        let mut tuple = Tuple::new(int_schema(1)).unwrap();
        tuple.set_field(0, Field::Int(5)).unwrap();

        let result = tuple.reset_schema(Arc::new(Schema::empty()));
        assert!(matches!(result, Err(TupleError::InvalidSchema)));
        assert_eq!(tuple.field_count(), 1);
        assert_eq!(tuple.get_field(0).unwrap(), Some(&Field::Int(5)));
    }

    #[test]
    fn test_render() {
        let mut tuple = Tuple::new(schema(vec![
            FieldType::Int,
            FieldType::String,
            FieldType::String,
        ]))
        .unwrap();
        tuple.set_field(0, Field::Int(1)).unwrap();
        tuple.set_field(1, Field::string("hello")).unwrap();
        tuple.set_field(2, Field::string("3.14")).unwrap();

        assert_eq!(tuple.render().unwrap(), "1\thello\t3.14\n");
    }

    #[test]
    fn test_render_single_field() {
        let mut tuple = Tuple::new(int_schema(1)).unwrap();
        tuple.set_field(0, Field::Int(-3)).unwrap();
        assert_eq!(tuple.render().unwrap(), "-3\n");
    }

    #[test]
    fn test_render_unset_slot_fails() {
        setup_logger();

        let mut tuple = Tuple::new(int_schema(3)).unwrap();
        tuple.set_field(0, Field::Int(1)).unwrap();
        tuple.set_field(2, Field::Int(3)).unwrap();

        assert!(matches!(
            tuple.render(),
            Err(TupleError::ValueMissing { index: 1 })
        ));

        let mut out = Vec::new();
        assert!(tuple.write_to(&mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_rejects_delimiters_in_values() {
        setup_logger();

        let mut tuple = Tuple::new(schema(vec![FieldType::String, FieldType::String])).unwrap();
        tuple.set_field(0, Field::string("ab")).unwrap();
        tuple.set_field(1, Field::string("c\nd")).unwrap();

        assert!(matches!(
            tuple.render(),
            Err(TupleError::UnrenderableValue { index: 1 })
        ));

        tuple.set_field(0, Field::string("a\tb")).unwrap();
        assert!(matches!(
            tuple.render(),
            Err(TupleError::UnrenderableValue { index: 0 })
        ));

        let mut out = Vec::new();
        assert!(tuple.write_to(&mut out).is_err());
        assert!(out.is_empty());

        tuple.set_field(0, Field::string("a b")).unwrap();
        tuple.set_field(1, Field::string("c d")).unwrap();
        assert_eq!(tuple.render().unwrap(), "a b\tc d\n");
    }

    #[test]
    fn test_fields_traversals_are_independent() {
        let mut tuple = Tuple::new(int_schema(3)).unwrap();
        for (i, value) in [10, 20, 30].into_iter().enumerate() {
            tuple.set_field(i, Field::Int(value)).unwrap();
        }

        let mut first = tuple.fields();
        let mut second = tuple.fields();

        assert_eq!(first.next(), Some(Some(&Field::Int(10))));
        assert_eq!(first.next(), Some(Some(&Field::Int(20))));
        assert_eq!(second.next(), Some(Some(&Field::Int(10))));
        assert_eq!(first.next(), Some(Some(&Field::Int(30))));
        assert_eq!(first.next(), None);

        let rest: Vec<_> = second.collect();
        assert_eq!(rest, vec![Some(&Field::Int(20)), Some(&Field::Int(30))]);

        let third = tuple.fields();
        assert_eq!(third.len(), 3);
        assert_eq!(third.rev().next(), Some(Some(&Field::Int(30))));
    }

    #[test]
    fn test_fields_include_unset_slots() {
        let mut tuple = Tuple::new(int_schema(3)).unwrap();
        tuple.set_field(1, Field::Int(2)).unwrap();

        let fields: Vec<_> = tuple.fields().collect();
        assert_eq!(fields, vec![None, Some(&Field::Int(2)), None]);
    }

    #[test]
    fn test_write_dump() {
        let schema = schema(vec![FieldType::Int, FieldType::String]);

        let mut tuples = Vec::new();
        for (id, name) in [(1, "ada"), (2, "grace")] {
            let mut tuple = Tuple::new(schema.clone()).unwrap();
            tuple.set_field(0, Field::Int(id)).unwrap();
            tuple.set_field(1, Field::string(name)).unwrap();
            tuples.push(tuple);
        }

        let mut out = Vec::new();
        let written = write_dump(&tuples, &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "1\tada\n2\tgrace\n");
    }

    #[test]
    fn test_write_dump_stops_at_incomplete_tuple() {
        let schema = int_schema(1);
        let mut complete = Tuple::new(schema.clone()).unwrap();
        complete.set_field(0, Field::Int(1)).unwrap();
        let incomplete = Tuple::new(schema).unwrap();

        let mut out = Vec::new();
        let result = write_dump([&complete, &incomplete, &complete], &mut out);
        assert!(matches!(result, Err(TupleError::ValueMissing { index: 0 })));
        assert_eq!(out, b"1\n");
    }
}
