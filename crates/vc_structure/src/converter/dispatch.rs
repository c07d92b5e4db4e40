use vc_wire::Value;

use crate::config::UnstructureStrategy;
use crate::converter::Converter;
use crate::error::{PathSegment, StructureError};
use crate::info::TypeDescriptor;
use crate::native::Native;

type BuiltinStructure = fn(&Converter, &Value, &TypeDescriptor) -> Result<Native, StructureError>;

// -----------------------------------------------------------------------------
// Structure

impl Converter {
    /// Structures `value` as the type described by `ty`.
    ///
    /// A hook registered for exactly `ty` is used if present; otherwise the
    /// built-in handler for the shape of `ty`.
    ///
    /// With [`contextualize_errors`](crate::ConverterConfig::contextualize_errors)
    /// enabled, every error is a [`StructureError::Structuring`] whose path
    /// leads from `value` to the failing inner value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_structure::{Converter, Native, Value};
    /// use vc_structure::info::TypeDescriptor;
    ///
    /// let converter = Converter::new();
    /// let ty = TypeDescriptor::seq(TypeDescriptor::FLOAT);
    ///
    /// let native = converter.structure(&Value::seq([1, 2]), &ty).unwrap();
    /// assert_eq!(native, Native::Seq(vec![Native::Float(1.0), Native::Float(2.0)]));
    ///
    /// assert!(converter.structure(&Value::from("1"), &ty).is_err());
    /// ```
    pub fn structure(&self, value: &Value, ty: &TypeDescriptor) -> Result<Native, StructureError> {
        let result = self.dispatch_structure(value, ty);
        if self.config.contextualize_errors {
            result.map_err(StructureError::into_contextual)
        } else {
            result
        }
    }

    /// Applies the context setting to an error from the typed bridge.
    ///
    /// [`FromNative`](crate::typed::FromNative) always tags failures inside
    /// containers and records; the tags are dropped unless context is enabled.
    pub(crate) fn settle_error(&self, error: StructureError) -> StructureError {
        if self.config.contextualize_errors {
            error.into_contextual()
        } else {
            error.without_context()
        }
    }

    pub(crate) fn dispatch_structure(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        if let Some(hook) = self.hooks.structure_hook(ty) {
            return hook(self, value, ty);
        }

        let builtin: BuiltinStructure = match ty {
            TypeDescriptor::Any => Self::structure_any,
            TypeDescriptor::Primitive(_) => Self::structure_primitive,
            TypeDescriptor::Sequence(_) => Self::structure_sequence,
            TypeDescriptor::Set(_) | TypeDescriptor::FrozenSet(_) => Self::structure_set,
            TypeDescriptor::Tuple(_) => Self::structure_tuple,
            TypeDescriptor::Mapping(..) => Self::structure_mapping,
            TypeDescriptor::Record(_) => match self.config.unstructure_strategy {
                UnstructureStrategy::AsMap => Self::structure_record,
                UnstructureStrategy::AsSeq => Self::structure_record_from_seq,
            },
            TypeDescriptor::Union(_) => Self::structure_union,
        };
        builtin(self, value, ty)
    }

    /// Structures an inner value, tagging failures with `segment` when
    /// error context is enabled.
    ///
    /// The segment is only built on failure.
    pub(crate) fn structure_within(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
        segment: impl FnOnce() -> PathSegment,
    ) -> Result<Native, StructureError> {
        let result = self.dispatch_structure(value, ty);
        if self.config.contextualize_errors {
            result.map_err(|error| error.within(segment()))
        } else {
            result
        }
    }
}

// -----------------------------------------------------------------------------
// Unstructure

impl Converter {
    /// Unstructures `native`, dispatching on its runtime shape.
    ///
    /// Records and primitives look up a hook for their own descriptor.
    /// Containers have no element type at runtime and are handled by the
    /// built-in handler, which unstructures each element in turn.
    pub fn unstructure(&self, native: &Native) -> Value {
        if let Some(ty) = native.runtime_descriptor()
            && let Some(hook) = self.hooks.unstructure_hook(&ty)
        {
            return hook(self, native);
        }
        self.unstructure_builtin(native)
    }

    /// Unstructures `native` as the declared type `ty`.
    ///
    /// Unlike [`Converter::unstructure`], hooks registered for parameterized
    /// descriptors such as `sequence[int]` take part. Values that do not fit
    /// the shape of `ty` fall back to runtime dispatch.
    pub fn unstructure_as(&self, native: &Native, ty: &TypeDescriptor) -> Value {
        if let Some(hook) = self.hooks.unstructure_hook(ty) {
            return hook(self, native);
        }

        match (ty, native) {
            (TypeDescriptor::Sequence(element), Native::Seq(items)) => Value::Seq(
                items
                    .iter()
                    .map(|item| self.unstructure_as(item, element))
                    .collect(),
            ),
            (TypeDescriptor::Set(element) | TypeDescriptor::FrozenSet(element), Native::Set(items)) => {
                Value::Set(
                    items
                        .iter()
                        .map(|item| self.unstructure_as(item, element))
                        .collect(),
                )
            }
            (TypeDescriptor::Tuple(elements), Native::Tuple(items))
                if elements.len() == items.len() =>
            {
                Value::Seq(
                    items
                        .iter()
                        .zip(elements.iter())
                        .map(|(item, element)| self.unstructure_as(item, element))
                        .collect(),
                )
            }
            (TypeDescriptor::Mapping(key_ty, value_ty), Native::Map(entries)) => Value::Map(
                entries
                    .iter()
                    .map(|(key, value)| {
                        (
                            self.unstructure_as(key, key_ty),
                            self.unstructure_as(value, value_ty),
                        )
                    })
                    .collect(),
            ),
            (TypeDescriptor::Union(members), native) if !native.is_null() => {
                let mut rest = members.iter().filter(|member| !member.is_null());
                match (rest.next(), rest.next()) {
                    (Some(only), None) => self.unstructure_as(native, only),
                    _ => self.unstructure(native),
                }
            }
            _ => self.unstructure(native),
        }
    }

    pub(crate) fn unstructure_builtin(&self, native: &Native) -> Value {
        match native {
            Native::Null => Value::Null,
            Native::Bool(v) => Value::Bool(*v),
            Native::Int(v) => Value::Int(*v),
            Native::Float(v) => Value::Float(*v),
            Native::Str(v) => Value::Str(v.clone()),
            Native::Bytes(v) => Value::Bytes(v.clone()),
            Native::Seq(items) | Native::Tuple(items) => {
                Value::Seq(items.iter().map(|item| self.unstructure(item)).collect())
            }
            Native::Set(items) => Value::Set(items.iter().map(|item| self.unstructure(item)).collect()),
            Native::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, value)| (self.unstructure(key), self.unstructure(value)))
                    .collect(),
            ),
            Native::Record(_) => match self.config.unstructure_strategy {
                UnstructureStrategy::AsMap => self.unstructure_record_as_map(native),
                UnstructureStrategy::AsSeq => self.unstructure_record_as_seq(native),
            },
        }
    }
}
