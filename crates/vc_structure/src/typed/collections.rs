use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use crate::error::{PathSegment, StructureError};
use crate::info::TypeDescriptor;
use crate::native::Native;
use crate::typed::{FromNative, ToNative, Typed};

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Typed> Typed for $ty<T> {
                #[inline]
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::seq(T::descriptor())
                }
            }

            impl<T: FromNative> FromNative for $ty<T> {
                fn from_native(native: Native) -> Result<Self, StructureError> {
                    match native {
                        Native::Seq(items) => items
                            .into_iter()
                            .enumerate()
                            .map(|(index, item)| {
                                T::from_native(item).map_err(|error| error.within(PathSegment::Index(index)))
                            })
                            .collect(),
                        other => Err(StructureError::invalid_native::<Self>(&other)),
                    }
                }
            }

            impl<T: ToNative> ToNative for $ty<T> {
                fn to_native(&self) -> Native {
                    Native::Seq(self.iter().map(ToNative::to_native).collect())
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque);

// -----------------------------------------------------------------------------
// Sets

fn set_from_native<C, T>(native: Native) -> Result<C, StructureError>
where
    C: FromIterator<T>,
    T: FromNative,
{
    match native {
        Native::Set(items) => items
            .into_iter()
            .map(|item| T::from_native(item).map_err(|error| error.within(PathSegment::SetMember)))
            .collect(),
        other => Err(StructureError::invalid_native::<C>(&other)),
    }
}

fn set_to_native<'a, T: ToNative + 'a>(items: impl Iterator<Item = &'a T>) -> Native {
    Native::Set(items.map(ToNative::to_native).collect())
}

impl<T: Typed> Typed for BTreeSet<T> {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }
}

impl<T: FromNative + Ord> FromNative for BTreeSet<T> {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        set_from_native(native)
    }
}

impl<T: ToNative> ToNative for BTreeSet<T> {
    #[inline]
    fn to_native(&self) -> Native {
        set_to_native(self.iter())
    }
}

macro_rules! impl_hash_set {
    ($($set:ty),* $(,)?) => {
        $(
            impl<T: Typed, S> Typed for $set {
                #[inline]
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::set(T::descriptor())
                }
            }

            impl<T: FromNative + Eq + Hash, S: BuildHasher + Default> FromNative for $set {
                #[inline]
                fn from_native(native: Native) -> Result<Self, StructureError> {
                    set_from_native(native)
                }
            }

            impl<T: ToNative, S> ToNative for $set {
                #[inline]
                fn to_native(&self) -> Native {
                    set_to_native(self.iter())
                }
            }
        )*
    };
}

impl_hash_set!(
    vc_wire::hash::hashbrown::HashSet<T, S>,
    std::collections::HashSet<T, S>,
);

// -----------------------------------------------------------------------------
// Mappings

fn map_from_native<C, K, V>(native: Native) -> Result<C, StructureError>
where
    C: FromIterator<(K, V)>,
    K: FromNative,
    V: FromNative,
{
    match native {
        Native::Map(entries) => entries
            .into_iter()
            .map(|(key, value)| -> Result<(K, V), StructureError> {
                let segment = PathSegment::key(&key);
                let key = K::from_native(key).map_err(|error| error.within(segment.clone()))?;
                let value = V::from_native(value).map_err(|error| error.within(segment))?;
                Ok((key, value))
            })
            .collect(),
        other => Err(StructureError::invalid_native::<C>(&other)),
    }
}

fn map_to_native<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Native
where
    K: ToNative + 'a,
    V: ToNative + 'a,
{
    Native::Map(
        entries
            .map(|(key, value)| (key.to_native(), value.to_native()))
            .collect(),
    )
}

impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    #[inline]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }
}

impl<K: FromNative + Ord, V: FromNative> FromNative for BTreeMap<K, V> {
    #[inline]
    fn from_native(native: Native) -> Result<Self, StructureError> {
        map_from_native(native)
    }
}

impl<K: ToNative, V: ToNative> ToNative for BTreeMap<K, V> {
    #[inline]
    fn to_native(&self) -> Native {
        map_to_native(self.iter())
    }
}

macro_rules! impl_hash_map {
    ($($map:ty),* $(,)?) => {
        $(
            impl<K: Typed, V: Typed, S> Typed for $map {
                #[inline]
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::map(K::descriptor(), V::descriptor())
                }
            }

            impl<K, V, S> FromNative for $map
            where
                K: FromNative + Eq + Hash,
                V: FromNative,
                S: BuildHasher + Default,
            {
                #[inline]
                fn from_native(native: Native) -> Result<Self, StructureError> {
                    map_from_native(native)
                }
            }

            impl<K: ToNative, V: ToNative, S> ToNative for $map {
                #[inline]
                fn to_native(&self) -> Native {
                    map_to_native(self.iter())
                }
            }
        )*
    };
}

impl_hash_map!(
    vc_wire::hash::hashbrown::HashMap<K, V, S>,
    std::collections::HashMap<K, V, S>,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use vc_wire::hash::FixedHashState;
    use vc_wire::hash::hashbrown::HashSet;

    use crate::info::TypeDescriptor;
    use crate::native::Native;
    use crate::typed::{FromNative, ToNative, Typed};

    #[test]
    fn descriptors_keep_parameters() {
        assert_eq!(
            Vec::<i32>::descriptor(),
            TypeDescriptor::seq(TypeDescriptor::INT)
        );
        assert_ne!(Vec::<i32>::descriptor(), Vec::<String>::descriptor());
        assert_eq!(
            HashSet::<String, FixedHashState>::descriptor(),
            TypeDescriptor::set(TypeDescriptor::STR)
        );
    }

    #[test]
    fn map_round_trip() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), vec![1_i64, 2]);
        map.insert(String::from("b"), vec![]);

        let native = map.to_native();
        assert_eq!(BTreeMap::<String, Vec<i64>>::from_native(native).unwrap(), map);
    }

    #[test]
    fn set_from_sequence_is_invalid() {
        let native = Native::Seq(vec![Native::Int(1)]);
        assert!(HashSet::<i64, FixedHashState>::from_native(native).is_err());
    }
}
