use alloc::string::String;
use alloc::vec::Vec;
use core::any::type_name;

use crate::error::StructureError;
use crate::info::TypeDescriptor;
use crate::native::Native;
use crate::typed::{FromNative, ToNative, Typed};

// -----------------------------------------------------------------------------
// Bytes

/// A byte string, converted as the `bytes` primitive.
///
/// `Vec<u8>` is a sequence of integers; wrap it in `Bytes` to get a
/// [`Value::Bytes`](crate::Value::Bytes) on the wire instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Bytes {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl core::ops::Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($ty:ty, $descriptor:expr, $variant:ident) => {
        impl Typed for $ty {
            #[inline]
            fn descriptor() -> TypeDescriptor {
                $descriptor
            }
        }

        impl FromNative for $ty {
            #[inline]
            fn from_native(native: Native) -> Result<Self, StructureError> {
                match native {
                    Native::$variant(value) => Ok(value),
                    other => Err(StructureError::invalid_native::<Self>(&other)),
                }
            }
        }

        impl ToNative for $ty {
            #[inline]
            fn to_native(&self) -> Native {
                Native::$variant(Clone::clone(self))
            }
        }
    };
}

impl_scalar!(bool, TypeDescriptor::BOOL, Bool);
impl_scalar!(i64, TypeDescriptor::INT, Int);
impl_scalar!(f64, TypeDescriptor::FLOAT, Float);
impl_scalar!(String, TypeDescriptor::STR, Str);

impl Typed for Bytes {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::BYTES
    }
}

impl FromNative for Bytes {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        match native {
            Native::Bytes(value) => Ok(Self(value)),
            other => Err(StructureError::invalid_native::<Self>(&other)),
        }
    }
}

impl ToNative for Bytes {
    #[inline]
    fn to_native(&self) -> Native {
        Native::Bytes(self.0.clone())
    }
}

// -----------------------------------------------------------------------------
// Narrow integers

macro_rules! impl_narrow_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::INT
                }
            }

            impl FromNative for $ty {
                fn from_native(native: Native) -> Result<Self, StructureError> {
                    match native {
                        Native::Int(value) => <$ty>::try_from(value).map_err(|_| {
                            StructureError::OutOfRange {
                                value,
                                target: type_name::<$ty>(),
                            }
                        }),
                        other => Err(StructureError::invalid_native::<Self>(&other)),
                    }
                }
            }

            impl ToNative for $ty {
                #[inline]
                fn to_native(&self) -> Native {
                    Native::Int(i64::from(*self))
                }
            }
        )*
    };
}

impl_narrow_int!(i8, i16, i32, u8, u16, u32);

impl Typed for isize {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::INT
    }
}

impl FromNative for isize {
    fn from_native(native: Native) -> Result<Self, StructureError> {
        match native {
            Native::Int(value) => isize::try_from(value).map_err(|_| StructureError::OutOfRange {
                value,
                target: type_name::<isize>(),
            }),
            other => Err(StructureError::invalid_native::<Self>(&other)),
        }
    }
}

impl ToNative for isize {
    #[inline]
    fn to_native(&self) -> Native {
        // isize is at most 64 bits on supported targets.
        Native::Int(*self as i64)
    }
}

// -----------------------------------------------------------------------------
// f32

impl Typed for f32 {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::FLOAT
    }
}

/// Values round to the nearest `f32`. Finite values beyond the `f32` range
/// are rejected; infinities and NaN are kept.
impl FromNative for f32 {
    fn from_native(native: Native) -> Result<Self, StructureError> {
        match native {
            Native::Float(value) => {
                let narrowed = value as f32;
                if value.is_finite() && !narrowed.is_finite() {
                    return Err(StructureError::FloatOutOfRange {
                        value,
                        target: type_name::<f32>(),
                    });
                }
                Ok(narrowed)
            }
            other => Err(StructureError::invalid_native::<Self>(&other)),
        }
    }
}

impl ToNative for f32 {
    #[inline]
    fn to_native(&self) -> Native {
        Native::Float(f64::from(*self))
    }
}

// -----------------------------------------------------------------------------
// Unit and Option

impl Typed for () {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::NULL
    }
}

impl FromNative for () {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        match native {
            Native::Null => Ok(()),
            other => Err(StructureError::invalid_native::<Self>(&other)),
        }
    }
}

impl ToNative for () {
    #[inline]
    fn to_native(&self) -> Native {
        Native::Null
    }
}

/// `None` is null. `Option<()>` cannot tell `Some(())` from `None`.
impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }
}

impl<T: FromNative> FromNative for Option<T> {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        match native {
            Native::Null => Ok(None),
            other => T::from_native(other).map(Some),
        }
    }
}

impl<T: ToNative> ToNative for Option<T> {
    #[inline]
    fn to_native(&self) -> Native {
        match self {
            Some(value) => value.to_native(),
            None => Native::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::error::StructureError;
    use crate::native::Native;
    use crate::typed::{FromNative, ToNative};

    #[test]
    fn narrowing_checks_range() {
        assert_eq!(u8::from_native(Native::Int(255)).unwrap(), 255);

        let error = u8::from_native(Native::Int(256)).unwrap_err();
        assert!(matches!(error, StructureError::OutOfRange { value: 256, .. }));

        let error = i16::from_native(Native::Int(-40_000)).unwrap_err();
        assert!(matches!(error, StructureError::OutOfRange { .. }));
    }

    #[test]
    fn f32_rejects_overflow() {
        assert_eq!(f32::from_native(Native::Float(0.1)).unwrap(), 0.1_f32);
        assert_eq!(f32::from_native(Native::Float(f64::INFINITY)).unwrap(), f32::INFINITY);
        assert!(f32::from_native(Native::Float(f64::NAN)).unwrap().is_nan());

        let error = f32::from_native(Native::Float(1e300)).unwrap_err();
        assert!(matches!(
            error,
            StructureError::FloatOutOfRange { target: "f32", .. }
        ));
        assert!(f32::from_native(Native::Float(-1e39)).is_err());
    }

    #[test]
    fn wrong_shape_is_invalid_native() {
        let error = bool::from_native(Native::Int(1)).unwrap_err();
        assert!(matches!(
            error,
            StructureError::InvalidNative { target: "bool", found: "int" }
        ));
    }

    #[test]
    fn option_maps_null() {
        assert_eq!(Option::<i64>::from_native(Native::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_native(Native::Int(3)).unwrap(), Some(3));
        assert_eq!(None::<i64>.to_native(), Native::Null);
    }
}
