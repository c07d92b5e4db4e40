use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_wire::{StrKey, Value};

use crate::converter::Converter;
use crate::error::{PathSegment, StructureError};
use crate::info::TypeDescriptor;
use crate::native::Native;
use crate::schema::{FieldDescriptor, RecordSchema};

impl Converter {
    fn schema_of(&self, ty: &TypeDescriptor) -> Result<Arc<RecordSchema>, StructureError> {
        match ty.as_record() {
            Some(record) => Ok(self.schemas.get(record)),
            None => Err(StructureError::custom(format!("{ty} is not a record"))),
        }
    }

    /// Falls back to the field default, or fails if there is none.
    fn missing_field(schema: &RecordSchema, field: &FieldDescriptor) -> Result<Native, StructureError> {
        field
            .default()
            .produce()
            .ok_or_else(|| StructureError::MissingRequiredField {
                record: schema.name(),
                field: field.name(),
            })
    }

    /// Structures a record from a wire mapping keyed by field name.
    ///
    /// Keys that are not fields are ignored.
    pub(crate) fn structure_record(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let schema = self.schema_of(ty)?;
        let Value::Map(map) = value else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        let mut values = Vec::with_capacity(schema.field_len());
        for field in schema.fields() {
            let native = match map.get(&StrKey(field.name())) {
                Some(raw) => {
                    self.structure_within(raw, field.ty(), || PathSegment::Field(field.name()))?
                }
                None => Self::missing_field(&schema, field)?,
            };
            values.push(native);
        }

        schema
            .construct(values)
            .map(Native::Record)
            .map_err(|error| self.settle_error(error))
    }

    /// Structures a record from a wire sequence of field values in declared
    /// order.
    ///
    /// Trailing fields may be left out if they have defaults. This is the
    /// built-in handling under [`UnstructureStrategy::AsSeq`]; otherwise it
    /// can be registered as a structure hook for individual records.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_structure::info::TypeDescriptor;
    /// use vc_structure::{Converter, Value, impl_record};
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Span {
    ///     start: i64,
    ///     end: i64,
    /// }
    ///
    /// impl_record!(Span { start: i64, end: i64 = 0 });
    ///
    /// let mut converter = Converter::new();
    /// converter.register_structure_hook(
    ///     TypeDescriptor::record::<Span>(),
    ///     Converter::structure_record_from_seq,
    /// );
    ///
    /// let span: Span = converter.structure_as(&Value::seq([3])).unwrap();
    /// assert_eq!(span, Span { start: 3, end: 0 });
    /// ```
    ///
    /// [`UnstructureStrategy::AsSeq`]: crate::UnstructureStrategy::AsSeq
    pub fn structure_record_from_seq(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let schema = self.schema_of(ty)?;
        let Value::Seq(items) = value else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        if items.len() > schema.field_len() {
            return Err(StructureError::SizeMismatch {
                expected: schema.field_len(),
                actual: items.len(),
            });
        }

        let mut values = Vec::with_capacity(schema.field_len());
        for (index, field) in schema.fields().iter().enumerate() {
            let native = match items.get(index) {
                Some(raw) => self.structure_within(raw, field.ty(), || PathSegment::Index(index))?,
                None => Self::missing_field(&schema, field)?,
            };
            values.push(native);
        }

        schema.construct(values).map(Native::Record).map_err(|error| {
            // Fields are positional here.
            self.settle_error(error).map_outermost(|segment| match segment {
                PathSegment::Field(name) => schema
                    .fields()
                    .iter()
                    .position(|field| field.name() == name)
                    .map_or(PathSegment::Field(name), PathSegment::Index),
                other => other,
            })
        })
    }

    /// Writes a record as a mapping from field name to value, in declared
    /// order. Field values are unstructured as their declared types.
    ///
    /// Anything other than a record is unstructured as usual.
    pub fn unstructure_record_as_map(&self, native: &Native) -> Value {
        let Some(record) = native.as_record() else {
            return self.unstructure_builtin(native);
        };

        let schema = self.schemas.get(record.record_type());
        Value::Map(
            schema
                .fields()
                .iter()
                .zip(record.field_values())
                .map(|(field, value)| (Value::from(field.name()), self.unstructure_as(&value, field.ty())))
                .collect(),
        )
    }

    /// Writes a record as a sequence of field values, in declared order.
    ///
    /// Anything other than a record is unstructured as usual.
    pub fn unstructure_record_as_seq(&self, native: &Native) -> Value {
        let Some(record) = native.as_record() else {
            return self.unstructure_builtin(native);
        };

        let schema = self.schemas.get(record.record_type());
        Value::Seq(
            schema
                .fields()
                .iter()
                .zip(record.field_values())
                .map(|(field, value)| self.unstructure_as(&value, field.ty()))
                .collect(),
        )
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use vc_wire::Value;

    use crate::error::StructureError;
    use crate::info::TypeDescriptor;
    use crate::{Converter, ConverterConfig, UnstructureStrategy, impl_record};

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        key: String,
        weight: f64,
        tags: Vec<String>,
    }

    impl_record!(Entry {
        key: String,
        weight: f64 = 1.0,
        tags: Vec<String> = Vec::new(),
    });

    #[test]
    fn extra_keys_are_ignored() {
        let converter = Converter::new();
        let wire = Value::map([("key", Value::from("a")), ("unknown", Value::from(1))]);

        let entry: Entry = converter.structure_as(&wire).unwrap();
        assert_eq!(
            entry,
            Entry { key: "a".into(), weight: 1.0, tags: Vec::new() }
        );
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let converter = Converter::new();
        let error = converter
            .structure(&Value::map([("weight", 2.0)]), &TypeDescriptor::record::<Entry>())
            .unwrap_err();

        assert!(matches!(
            error,
            StructureError::MissingRequiredField { field: "key", .. }
        ));
    }

    #[test]
    fn non_map_is_a_type_mismatch() {
        let converter = Converter::new();
        let error = converter
            .structure(&Value::seq(["a"]), &TypeDescriptor::record::<Entry>())
            .unwrap_err();
        assert!(matches!(error, StructureError::TypeMismatch { .. }));
    }

    #[test]
    fn from_seq_rejects_extra_elements() {
        let converter = Converter::new();
        let wire = Value::seq([
            Value::from("a"),
            Value::from(1.0),
            Value::seq(["x"]),
            Value::Null,
        ]);
        let error = converter
            .structure_record_from_seq(&wire, &TypeDescriptor::record::<Entry>())
            .unwrap_err();

        assert!(matches!(
            error,
            StructureError::SizeMismatch { expected: 3, actual: 4 }
        ));
    }

    #[test]
    fn as_seq_strategy_round_trips() {
        let config = ConverterConfig::new().with_unstructure_strategy(UnstructureStrategy::AsSeq);
        let converter = Converter::with_config(config);
        let entry = Entry {
            key: "k".into(),
            weight: 0.5,
            tags: Vec::from([String::from("t")]),
        };

        let wire = converter.unstructure_from(&entry);
        assert_eq!(
            wire,
            Value::seq([Value::from("k"), Value::from(0.5), Value::seq(["t"])])
        );
        assert_eq!(converter.structure_as::<Entry>(&wire).unwrap(), entry);
    }

    #[test]
    fn map_keeps_declared_order() {
        let converter = Converter::new();
        let entry = Entry {
            key: "k".into(),
            weight: 2.0,
            tags: Vec::new(),
        };

        let wire = converter.unstructure_from(&entry);
        let keys: Vec<_> = wire.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, [Value::from("key"), Value::from("weight"), Value::from("tags")]);
    }
}
