//! The in-memory side of a conversion.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash, Hasher};

use vc_wire::Value;
use vc_wire::hash::hashbrown::hash_table::{Entry, HashTable};
use vc_wire::hash::{FixedHashState, unordered_hash};

use crate::info::TypeDescriptor;
use crate::schema::Record;

/// A dynamically typed in-memory value.
///
/// Structuring produces a `Native`, unstructuring consumes one. Unlike a wire
/// [`Value`] it keeps tuples apart from sequences and holds records as
/// concrete Rust values behind [`Record`].
///
/// Set and mapping equality ignore order. Floats compare by bit pattern.
///
/// # Examples
///
/// ```
/// use vc_structure::Native;
///
/// let a = Native::Set(vec![Native::Int(1), Native::Int(2)]);
/// let b = Native::Set(vec![Native::Int(2), Native::Int(1)]);
/// assert_eq!(a, b);
///
/// assert_ne!(Native::Seq(vec![Native::Int(1)]), Native::Tuple(vec![Native::Int(1)]));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Native {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Native>),
    /// Distinct elements.
    Set(Vec<Native>),
    Tuple(Vec<Native>),
    /// Entries with distinct keys, in wire order.
    Map(Vec<(Native, Native)>),
    Record(Box<dyn Record>),
}

impl Native {
    /// Wraps a record value.
    #[inline]
    pub fn record<T: Record>(value: T) -> Self {
        Self::Record(Box::new(value))
    }

    /// Converts a wire value one-to-one, without any target type.
    ///
    /// Wire sequences become [`Native::Seq`] and wire mappings [`Native::Map`];
    /// records are never produced.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(*v),
            Value::Int(v) => Self::Int(*v),
            Value::Float(v) => Self::Float(*v),
            Value::Str(v) => Self::Str(v.clone()),
            Value::Bytes(v) => Self::Bytes(v.clone()),
            Value::Seq(items) => Self::Seq(items.iter().map(Self::from_wire).collect()),
            Value::Set(items) => Self::Set(items.iter().map(Self::from_wire).collect()),
            Value::Map(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, value)| (Self::from_wire(key), Self::from_wire(value)))
                    .collect(),
            ),
        }
    }

    /// Returns a short name of this value's shape, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Seq(_) => "sequence",
            Self::Set(_) => "set",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
            Self::Record(_) => "record",
        }
    }

    /// Returns the descriptor this value is dispatched on when unstructured
    /// without a declared type.
    ///
    /// Containers carry no element type at runtime and return `None`.
    pub fn runtime_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            Self::Null => Some(TypeDescriptor::NULL),
            Self::Bool(_) => Some(TypeDescriptor::BOOL),
            Self::Int(_) => Some(TypeDescriptor::INT),
            Self::Float(_) => Some(TypeDescriptor::FLOAT),
            Self::Str(_) => Some(TypeDescriptor::STR),
            Self::Bytes(_) => Some(TypeDescriptor::BYTES),
            Self::Record(record) => Some(TypeDescriptor::Record(record.record_type())),
            Self::Seq(_) | Self::Set(_) | Self::Tuple(_) | Self::Map(_) => None,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(record) => Some(&**record),
            _ => None,
        }
    }

    /// Returns the record of type `T`, if this holds one.
    #[inline]
    pub fn downcast_record<T: Record>(&self) -> Option<&T> {
        self.as_record()?.downcast_ref::<T>()
    }

}

// -----------------------------------------------------------------------------
// Equality and hashing

impl PartialEq for Native {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => same_elements(a, b),
            (Self::Map(a), Self::Map(b)) => same_entries(a, b),
            (Self::Record(a), Self::Record(b)) => a.record_eq(&**b),
            _ => false,
        }
    }
}

/// Consistent with [`PartialEq`]: floats hash their bits, sets and mappings
/// ignore order, and records hash only their type.
impl Hash for Native {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Str(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Seq(items) | Self::Tuple(items) => items.hash(state),
            Self::Set(items) => unordered_hash(items.iter()).hash(state),
            Self::Map(entries) => unordered_hash(entries.iter()).hash(state),
            Self::Record(record) => record.record_type().hash(state),
        }
    }
}

fn same_elements(a: &[Native], b: &[Native]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let index = NativeIndex::of(b, |item| item);
    a.iter()
        .all(|item| index.position(b, |item| item, item).is_some())
}

fn same_entries(a: &[(Native, Native)], b: &[(Native, Native)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let index = NativeIndex::of(b, |(key, _)| key);
    a.iter().all(|(key, value)| {
        index
            .position(b, |(key, _)| key, key)
            .is_some_and(|position| b[position].1 == *value)
    })
}

// -----------------------------------------------------------------------------
// NativeIndex

/// A hash index over the keys of a slice, for building sets and mappings
/// with distinct keys.
///
/// Only positions are stored; every call takes the indexed slice and a
/// function picking the key out of an element.
#[derive(Default)]
pub(crate) struct NativeIndex {
    table: HashTable<usize>,
}

impl NativeIndex {
    /// Indexes every element of `items`, whose keys must be distinct.
    pub fn of<T>(items: &[T], key_of: impl Fn(&T) -> &Native) -> Self {
        let mut table = HashTable::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            table.insert_unique(FixedHashState.hash_one(key_of(item)), position, |&other| {
                FixedHashState.hash_one(key_of(&items[other]))
            });
        }
        Self { table }
    }

    /// Returns the position in `items` of the element whose key equals `key`.
    pub fn position<T>(
        &self,
        items: &[T],
        key_of: impl Fn(&T) -> &Native,
        key: &Native,
    ) -> Option<usize> {
        self.table
            .find(FixedHashState.hash_one(key), |&position| key_of(&items[position]) == key)
            .copied()
    }

    /// Returns the position of the element whose key equals `key`, or
    /// reserves `items.len()` for it and returns `None`.
    ///
    /// After `None` the caller must push the new element onto `items`.
    pub fn find_or_reserve<T>(
        &mut self,
        items: &[T],
        key_of: impl Fn(&T) -> &Native,
        key: &Native,
    ) -> Option<usize> {
        let entry = self.table.entry(
            FixedHashState.hash_one(key),
            |&position| key_of(&items[position]) == key,
            |&position| FixedHashState.hash_one(key_of(&items[position])),
        );
        match entry {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(items.len());
                None
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use vc_wire::Value;
    use vc_wire::hash::FixedHashState;

    use super::{Native, NativeIndex};

    #[test]
    fn from_wire_keeps_shape() {
        let wire = Value::map([("a", Value::seq([1, 2])), ("b", Value::Null)]);
        let native = Native::from_wire(&wire);

        let expected = Native::Map(vec![
            (
                Native::Str("a".into()),
                Native::Seq(vec![Native::Int(1), Native::Int(2)]),
            ),
            (Native::Str("b".into()), Native::Null),
        ]);
        assert_eq!(native, expected);
    }

    #[test]
    fn index_finds_equal_keys() {
        let mut items: Vec<Native> = vec![];
        let mut index = NativeIndex::default();
        for value in [Native::Int(1), Native::Int(1), Native::Float(1.0), Native::Float(-0.0)] {
            if index.find_or_reserve(&items, |item| item, &value).is_none() {
                items.push(value);
            }
        }
        assert_eq!(items, [Native::Int(1), Native::Float(1.0), Native::Float(-0.0)]);
        assert_eq!(index.position(&items, |item| item, &Native::Float(0.0)), None);
        assert_eq!(index.position(&items, |item| item, &Native::Float(1.0)), Some(1));
    }

    #[test]
    fn equal_sets_hash_equal() {
        let a = Native::Set(vec![Native::Str("x".into()), Native::Int(2)]);
        let b = Native::Set(vec![Native::Int(2), Native::Str("x".into())]);
        assert_eq!(a, b);
        assert_eq!(FixedHashState.hash_one(&a), FixedHashState.hash_one(&b));
        assert_ne!(a, Native::Set(vec![Native::Int(2), Native::Str("y".into())]));
    }

    #[test]
    fn map_equality_ignores_order() {
        let a = Native::Map(vec![
            (Native::Int(1), Native::Bool(true)),
            (Native::Int(2), Native::Bool(false)),
        ]);
        let b = Native::Map(vec![
            (Native::Int(2), Native::Bool(false)),
            (Native::Int(1), Native::Bool(true)),
        ]);
        assert_eq!(a, b);
        assert_ne!(a, Native::Map(vec![(Native::Int(1), Native::Bool(true))]));
    }
}
