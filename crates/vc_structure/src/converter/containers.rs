use alloc::string::ToString;
use alloc::vec::Vec;

use vc_wire::Value;

use crate::converter::Converter;
use crate::error::{PathSegment, StructureError};
use crate::info::{PrimitiveKind, TypeDescriptor};
use crate::native::{Native, NativeIndex};

impl Converter {
    pub(crate) fn structure_any(
        &self,
        value: &Value,
        _ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        Ok(Native::from_wire(value))
    }

    /// Scalars are taken as-is; the only coercion is int to float.
    pub(crate) fn structure_primitive(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let TypeDescriptor::Primitive(kind) = ty else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        match (kind, value) {
            (PrimitiveKind::Null, Value::Null) => Ok(Native::Null),
            (PrimitiveKind::Bool, Value::Bool(v)) => Ok(Native::Bool(*v)),
            (PrimitiveKind::Int, Value::Int(v)) => Ok(Native::Int(*v)),
            (PrimitiveKind::Float, Value::Float(v)) => Ok(Native::Float(*v)),
            (PrimitiveKind::Float, Value::Int(v)) => Ok(Native::Float(*v as f64)),
            (PrimitiveKind::Str, Value::Str(v)) => Ok(Native::Str(v.clone())),
            (PrimitiveKind::Bytes, Value::Bytes(v)) => Ok(Native::Bytes(v.clone())),
            _ => Err(StructureError::type_mismatch(ty, value)),
        }
    }

    pub(crate) fn structure_sequence(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let (TypeDescriptor::Sequence(element), Value::Seq(items)) = (ty, value) else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.structure_within(item, element, || PathSegment::Index(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Native::Seq)
    }

    /// Accepts a wire sequence or set; equal elements collapse.
    pub(crate) fn structure_set(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let (element, segment) = match ty {
            TypeDescriptor::Set(element) => (element, PathSegment::SetMember),
            TypeDescriptor::FrozenSet(element) => (element, PathSegment::FrozenSetMember),
            _ => return Err(StructureError::type_mismatch(ty, value)),
        };

        let mut members = Vec::new();
        let mut index = NativeIndex::default();
        let mut push = |item: &Value| -> Result<(), StructureError> {
            let member = self.structure_within(item, element, || segment.clone())?;
            if index.find_or_reserve(&members, |member| member, &member).is_none() {
                members.push(member);
            }
            Ok(())
        };

        match value {
            Value::Seq(items) => items.iter().try_for_each(&mut push)?,
            Value::Set(items) => items.iter().try_for_each(&mut push)?,
            _ => return Err(StructureError::type_mismatch(ty, value)),
        }
        Ok(Native::Set(members))
    }

    /// Requires a wire sequence of exactly the tuple's arity.
    pub(crate) fn structure_tuple(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let (TypeDescriptor::Tuple(elements), Value::Seq(items)) = (ty, value) else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        if items.len() != elements.len() {
            return Err(StructureError::SizeMismatch {
                expected: elements.len(),
                actual: items.len(),
            });
        }

        items
            .iter()
            .zip(elements.iter())
            .enumerate()
            .map(|(index, (item, element))| {
                self.structure_within(item, element, || PathSegment::Index(index))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Native::Tuple)
    }

    /// Structures keys and values separately; a later entry whose key
    /// structures equal to an earlier one replaces it.
    pub(crate) fn structure_mapping(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let (TypeDescriptor::Mapping(key_ty, value_ty), Value::Map(entries)) = (ty, value) else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        let mut structured: Vec<(Native, Native)> = Vec::with_capacity(entries.len());
        let mut index = NativeIndex::default();
        for (raw_key, raw_value) in entries {
            let segment = || PathSegment::Key(raw_key.to_string());
            let key = self.structure_within(raw_key, key_ty, segment)?;
            let item = self.structure_within(raw_value, value_ty, segment)?;

            match index.find_or_reserve(&structured, |(key, _)| key, &key) {
                Some(position) => structured[position].1 = item,
                None => structured.push((key, item)),
            }
        }
        Ok(Native::Map(structured))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_wire::{Value, WireKind};

    use crate::error::StructureError;
    use crate::info::TypeDescriptor;
    use crate::{Converter, Native};

    #[test]
    fn primitives_do_not_cross_kinds() {
        let converter = Converter::new();

        let cases = [
            (Value::Bool(true), TypeDescriptor::INT),
            (Value::Int(1), TypeDescriptor::BOOL),
            (Value::from("1"), TypeDescriptor::INT),
            (Value::Float(1.0), TypeDescriptor::INT),
            (Value::Null, TypeDescriptor::STR),
        ];
        for (value, ty) in cases {
            let error = converter.structure(&value, &ty).unwrap_err();
            assert!(matches!(error, StructureError::TypeMismatch { .. }));
        }

        assert_eq!(
            converter.structure(&Value::Int(3), &TypeDescriptor::FLOAT).unwrap(),
            Native::Float(3.0),
        );
    }

    #[test]
    fn sequence_requires_wire_sequence() {
        let converter = Converter::new();
        let ty = TypeDescriptor::seq(TypeDescriptor::INT);

        let error = converter.structure(&Value::set([1]), &ty).unwrap_err();
        assert!(matches!(
            error,
            StructureError::TypeMismatch { found: WireKind::Set, .. }
        ));
    }

    #[test]
    fn set_accepts_sequence_and_dedups() {
        let converter = Converter::new();
        let ty = TypeDescriptor::frozen_set(TypeDescriptor::INT);

        let native = converter.structure(&Value::seq([1, 2, 1]), &ty).unwrap();
        assert_eq!(native, Native::Set(vec![Native::Int(2), Native::Int(1)]));

        let native = converter.structure(&Value::set([5]), &ty).unwrap();
        assert_eq!(native, Native::Set(vec![Native::Int(5)]));
    }

    #[test]
    fn large_containers_keep_distinct_keys() {
        let converter = Converter::new();

        let ty = TypeDescriptor::set(TypeDescriptor::INT);
        let wire = Value::seq((0..20_000).chain(0..20_000));
        let Native::Set(members) = converter.structure(&wire, &ty).unwrap() else {
            panic!("expected a set");
        };
        assert_eq!(members.len(), 20_000);
        assert_eq!(members[19_999], Native::Int(19_999));

        let ty = TypeDescriptor::map(TypeDescriptor::INT, TypeDescriptor::INT);
        let wire = Value::map((0..20_000).map(|key| (key, key * 2)));
        let Native::Map(entries) = converter.structure(&wire, &ty).unwrap() else {
            panic!("expected a mapping");
        };
        assert_eq!(entries.len(), 20_000);
        assert_eq!(entries[7], (Native::Int(7), Native::Int(14)));
    }

    #[test]
    fn tuple_arity_is_checked() {
        let converter = Converter::new();
        let ty = TypeDescriptor::tuple([TypeDescriptor::INT, TypeDescriptor::STR]);

        let native = converter.structure(&Value::seq([Value::from(1), Value::from("a")]), &ty);
        assert_eq!(
            native.unwrap(),
            Native::Tuple(vec![Native::Int(1), Native::Str("a".into())]),
        );

        let error = converter.structure(&Value::seq([1]), &ty).unwrap_err();
        assert!(matches!(
            error,
            StructureError::SizeMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn mapping_structures_keys_and_values() {
        let converter = Converter::new();
        let ty = TypeDescriptor::map(TypeDescriptor::STR, TypeDescriptor::FLOAT);

        let native = converter.structure(&Value::map([("a", 1), ("b", 2)]), &ty).unwrap();
        assert_eq!(
            native,
            Native::Map(vec![
                (Native::Str("a".into()), Native::Float(1.0)),
                (Native::Str("b".into()), Native::Float(2.0)),
            ]),
        );
    }

    #[test]
    fn any_passes_through() {
        let converter = Converter::new();
        let wire = Value::map([("k", Value::seq([Value::Null, Value::from(true)]))]);

        let native = converter.structure(&wire, &TypeDescriptor::Any).unwrap();
        assert_eq!(converter.unstructure(&native), wire);
    }
}
