use alloc::vec::Vec;

use crate::error::{PathSegment, StructureError};
use crate::info::TypeDescriptor;
use crate::native::Native;
use crate::typed::{FromNative, ToNative, Typed};

macro_rules! impl_tuple {
    ($len:literal => $($name:ident : $index:tt),+) => {
        impl<$($name: Typed),+> Typed for ($($name,)+) {
            #[inline]
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::tuple([$($name::descriptor()),+])
            }
        }

        impl<$($name: FromNative),+> FromNative for ($($name,)+) {
            fn from_native(native: Native) -> Result<Self, StructureError> {
                let items = match native {
                    Native::Tuple(items) if items.len() == $len => items,
                    Native::Tuple(items) => {
                        return Err(StructureError::SizeMismatch {
                            expected: $len,
                            actual: items.len(),
                        });
                    }
                    other => return Err(StructureError::invalid_native::<Self>(&other)),
                };

                let mut items = items.into_iter();
                Ok(($(
                    $name::from_native(items.next().unwrap_or_default())
                        .map_err(|error| error.within(PathSegment::Index($index)))?,
                )+))
            }
        }

        impl<$($name: ToNative),+> ToNative for ($($name,)+) {
            fn to_native(&self) -> Native {
                let items: Vec<Native> = Vec::from([$(self.$index.to_native()),+]);
                Native::Tuple(items)
            }
        }
    };
}

impl_tuple!(1 => A: 0);
impl_tuple!(2 => A: 0, B: 1);
impl_tuple!(3 => A: 0, B: 1, C: 2);
impl_tuple!(4 => A: 0, B: 1, C: 2, D: 3);
impl_tuple!(5 => A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(6 => A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use crate::error::StructureError;
    use crate::native::Native;
    use crate::typed::{FromNative, ToNative};

    #[test]
    fn tuple_round_trip() {
        let value = (1_i32, String::from("a"), 2.5_f64);
        let native = value.to_native();
        assert_eq!(
            native,
            Native::Tuple(vec![
                Native::Int(1),
                Native::Str("a".into()),
                Native::Float(2.5),
            ])
        );
        assert_eq!(<(i32, String, f64)>::from_native(native).unwrap(), value);
    }

    #[test]
    fn wrong_arity_is_size_mismatch() {
        let native = Native::Tuple(vec![Native::Int(1)]);
        let error = <(i64, i64)>::from_native(native).unwrap_err();
        assert!(matches!(
            error,
            StructureError::SizeMismatch { expected: 2, actual: 1 }
        ));
    }
}
