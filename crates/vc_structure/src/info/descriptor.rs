use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{PrimitiveKind, RecordType};
use crate::schema::Schema;
use crate::typed::Typed;

/// A description of a conversion target.
///
/// Descriptors are immutable trees and act as hook keys: generic parameters
/// are part of the identity, so `sequence[int]`, `sequence[str]` and
/// `sequence[any]` are three different keys.
///
/// Records are referenced by [`RecordType`] and never expanded here, so
/// mutually recursive records have finite descriptors.
///
/// # Examples
///
/// ```
/// use vc_structure::info::{PrimitiveKind, TypeDescriptor};
///
/// let ty = TypeDescriptor::of::<Vec<Option<i64>>>();
/// assert_eq!(ty.to_string(), "sequence[union[null, int]]");
///
/// let same = TypeDescriptor::seq(TypeDescriptor::optional(TypeDescriptor::INT));
/// assert_eq!(ty, same);
/// assert_ne!(ty, TypeDescriptor::seq(TypeDescriptor::INT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDescriptor {
    /// Any wire value, passed through as-is.
    Any,
    Primitive(PrimitiveKind),
    Sequence(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    FrozenSet(Box<TypeDescriptor>),
    /// A fixed-arity tuple, element `i` of type `i`.
    Tuple(Box<[TypeDescriptor]>),
    Mapping(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Record(RecordType),
    /// A sum type. Build it with [`TypeDescriptor::union`] to get a
    /// canonical member list.
    Union(Box<[TypeDescriptor]>),
}

impl TypeDescriptor {
    pub const NULL: Self = Self::Primitive(PrimitiveKind::Null);
    pub const BOOL: Self = Self::Primitive(PrimitiveKind::Bool);
    pub const INT: Self = Self::Primitive(PrimitiveKind::Int);
    pub const FLOAT: Self = Self::Primitive(PrimitiveKind::Float);
    pub const STR: Self = Self::Primitive(PrimitiveKind::Str);
    pub const BYTES: Self = Self::Primitive(PrimitiveKind::Bytes);

    /// Returns the descriptor of `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        T::descriptor()
    }

    /// Returns the descriptor of record `T`.
    #[inline]
    pub fn record<T: Schema>() -> Self {
        Self::Record(RecordType::of::<T>())
    }

    #[inline]
    pub fn seq(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    #[inline]
    pub fn set(element: Self) -> Self {
        Self::Set(Box::new(element))
    }

    #[inline]
    pub fn frozen_set(element: Self) -> Self {
        Self::FrozenSet(Box::new(element))
    }

    #[inline]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }

    pub fn tuple(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(elements.into_iter().collect())
    }

    /// Creates a sum type.
    ///
    /// Nested unions are flattened, duplicates removed and members sorted, so
    /// the same set of members always yields the same (hook key) descriptor.
    /// A single remaining member is returned unwrapped.
    ///
    /// ```
    /// use vc_structure::info::TypeDescriptor;
    ///
    /// let a = TypeDescriptor::union([TypeDescriptor::INT, TypeDescriptor::STR]);
    /// let b = TypeDescriptor::union([TypeDescriptor::STR, TypeDescriptor::INT, TypeDescriptor::STR]);
    /// assert_eq!(a, b);
    ///
    /// assert_eq!(TypeDescriptor::union([TypeDescriptor::INT]), TypeDescriptor::INT);
    /// ```
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner.into_vec()),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();

        if flat.len() == 1 {
            flat.pop().unwrap_or(Self::Any)
        } else {
            Self::Union(flat.into_boxed_slice())
        }
    }

    /// Creates the sum type "`inner` or null".
    #[inline]
    pub fn optional(inner: Self) -> Self {
        Self::union([inner, Self::NULL])
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Null))
    }

    /// Returns the record type if this describes a record.
    #[inline]
    pub const fn as_record(&self) -> Option<RecordType> {
        match self {
            Self::Record(record) => Some(*record),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, items: &[TypeDescriptor]) -> fmt::Result {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::Any => f.write_str("any"),
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Sequence(element) => write!(f, "sequence[{element}]"),
            Self::Set(element) => write!(f, "set[{element}]"),
            Self::FrozenSet(element) => write!(f, "frozenset[{element}]"),
            Self::Tuple(elements) => {
                f.write_str("tuple[")?;
                list(f, elements)?;
                f.write_str("]")
            }
            Self::Mapping(key, value) => write!(f, "mapping[{key}, {value}]"),
            Self::Record(record) => write!(f, "{record}"),
            Self::Union(members) => {
                f.write_str("union[")?;
                list(f, members)?;
                f.write_str("]")
            }
        }
    }
}
