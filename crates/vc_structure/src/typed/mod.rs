//! Bridges between Rust types and [`Native`] values.
//!
//! ## Menu
//!
//! - [`Typed`]: The [`TypeDescriptor`] a Rust type is converted as.
//! - [`FromNative`]: Builds a Rust value from a structured [`Native`].
//! - [`ToNative`]: Turns a Rust value into a [`Native`] for unstructuring.
//! - [`Bytes`]: A byte string, described as the `bytes` primitive.
//!
//! These are implemented for primitives, the std and hashbrown collections,
//! tuples of up to six elements and [`Option`]. Records get them from
//! [`impl_record!`](crate::impl_record).
//!
//! `u64` and `usize` have no implementation: wire integers are `i64` and
//! [`ToNative`] cannot fail.

use crate::error::StructureError;
use crate::info::TypeDescriptor;
use crate::native::Native;

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod primitives;
mod record;
mod tuples;

// -----------------------------------------------------------------------------
// Exports

pub use primitives::Bytes;

// -----------------------------------------------------------------------------
// Traits

/// A type with a static [`TypeDescriptor`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_structure::info::TypeDescriptor;
/// use vc_structure::typed::Typed;
///
/// assert_eq!(
///     <BTreeMap<String, (i32, f64)>>::descriptor().to_string(),
///     "mapping[str, tuple[int, float]]",
/// );
/// assert_eq!(u8::descriptor(), TypeDescriptor::INT);
/// ```
pub trait Typed {
    fn descriptor() -> TypeDescriptor;
}

/// Builds `Self` from a [`Native`] produced by structuring
/// [`Typed::descriptor`].
///
/// Built-in structuring always produces a matching shape; a mismatch means a
/// hook returned something else and is reported as
/// [`StructureError::InvalidNative`]. Narrower numbers than the wire carries
/// fail with [`StructureError::OutOfRange`] or
/// [`StructureError::FloatOutOfRange`].
///
/// Failures inside a container or record element are tagged with the
/// element's [`PathSegment`](crate::PathSegment).
pub trait FromNative: Sized {
    fn from_native(native: Native) -> Result<Self, StructureError>;
}

/// Converts `&self` into a [`Native`].
pub trait ToNative {
    fn to_native(&self) -> Native;
}

// -----------------------------------------------------------------------------
// Native

impl Typed for Native {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Any
    }
}

impl FromNative for Native {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        Ok(native)
    }
}

impl ToNative for Native {
    #[inline]
    fn to_native(&self) -> Native {
        self.clone()
    }
}
