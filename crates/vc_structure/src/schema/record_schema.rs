use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::StructureError;
use crate::native::Native;
use crate::schema::{FieldDescriptor, Record, Schema};

/// The ordered fields of a record type and a way to build it.
///
/// Field order is declaration order; it drives both the wire mapping order
/// and the positional (sequence) form.
#[derive(Clone)]
pub struct RecordSchema {
    name: &'static str,
    fields: Box<[FieldDescriptor]>,
    construct: fn(Vec<Native>) -> Result<Box<dyn Record>, StructureError>,
}

impl RecordSchema {
    /// Creates the schema of `T` from its fields.
    pub fn of<T: Schema>(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            name: T::record_name(),
            fields: fields.into_iter().collect(),
            construct: |values| T::from_fields(values).map(|record| Box::new(record) as Box<dyn Record>),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Builds a record from one value per field, in declared order.
    #[inline]
    pub fn construct(&self, values: Vec<Native>) -> Result<Box<dyn Record>, StructureError> {
        (self.construct)(values)
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
