use core::fmt;

use crate::info::TypeDescriptor;
use crate::native::Native;
use crate::typed::Typed;

// -----------------------------------------------------------------------------
// FieldDefault

/// What a record field falls back to when the wire mapping lacks it.
#[derive(Clone)]
pub enum FieldDefault {
    /// The field must be present.
    Required,
    /// A fixed value, cloned on each use.
    Value(Native),
    /// A factory, invoked for each structured value.
    Factory(fn() -> Native),
}

impl FieldDefault {
    /// Produces the fallback value, or `None` for a required field.
    #[inline]
    pub fn produce(&self) -> Option<Native> {
        match self {
            Self::Required => None,
            Self::Value(value) => Some(value.clone()),
            Self::Factory(factory) => Some(factory()),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A named, typed field of a [`RecordSchema`](crate::schema::RecordSchema).
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    ty: TypeDescriptor,
    default: FieldDefault,
}

impl FieldDescriptor {
    /// Creates a required field.
    #[inline]
    pub const fn new(name: &'static str, ty: TypeDescriptor) -> Self {
        Self {
            name,
            ty,
            default: FieldDefault::Required,
        }
    }

    /// Creates a required field of type `T`.
    #[inline]
    pub fn of<T: Typed>(name: &'static str) -> Self {
        Self::new(name, T::descriptor())
    }

    /// Falls back to a clone of `value` when absent.
    #[inline]
    pub fn with_default(mut self, value: Native) -> Self {
        self.default = FieldDefault::Value(value);
        self
    }

    /// Falls back to a fresh `factory()` result when absent.
    #[inline]
    pub fn with_factory(mut self, factory: fn() -> Native) -> Self {
        self.default = FieldDefault::Factory(factory);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    #[inline]
    pub const fn default(&self) -> &FieldDefault {
        &self.default
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        !matches!(self.default, FieldDefault::Required)
    }
}
