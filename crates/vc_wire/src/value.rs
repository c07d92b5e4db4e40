use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::hash::{FixedHashState, unordered_hash};

// -----------------------------------------------------------------------------
// Containers

/// An unordered set of wire values.
pub type ValueSet = hashbrown::HashSet<Value, FixedHashState>;

/// A mapping of wire values, iterated in insertion order.
///
/// Equality ignores order, as for any map.
pub type ValueMap = indexmap::IndexMap<Value, Value, FixedHashState>;

// -----------------------------------------------------------------------------
// WireKind

/// An enumeration of the shapes a [`Value`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Seq,
    Set,
    Map,
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Bool => f.pad("bool"),
            Self::Int => f.pad("int"),
            Self::Float => f.pad("float"),
            Self::Str => f.pad("str"),
            Self::Bytes => f.pad("bytes"),
            Self::Seq => f.pad("sequence"),
            Self::Set => f.pad("set"),
            Self::Map => f.pad("mapping"),
        }
    }
}

// -----------------------------------------------------------------------------
// Value

/// An untyped wire value.
///
/// Floats compare and hash by their bit pattern, which makes `Value` a
/// lawful `Eq + Hash` type usable as a set element or mapping key:
/// `NaN` equals itself and `0.0` differs from `-0.0`.
/// An `Int` never equals a `Float`.
///
/// # Examples
///
/// ```
/// use vc_wire::{Value, WireKind};
///
/// let value = Value::seq([Value::from(3), Value::from(1), Value::from(2)]);
/// assert_eq!(value.kind(), WireKind::Seq);
/// assert_eq!(value.as_seq().map(<[Value]>::len), Some(3));
///
/// assert_eq!(Value::set([1, 2, 2]), Value::set([2, 1]));
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Set(ValueSet),
    Map(ValueMap),
}

impl Value {
    /// Creates a [`Value::Seq`] from the given items, keeping their order.
    pub fn seq<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Creates a [`Value::Set`] from the given items; duplicates collapse.
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Creates a [`Value::Map`] from the given entries, keeping their order.
    ///
    /// A later entry replaces an earlier one with an equal key.
    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the [`WireKind`] of this value.
    pub const fn kind(&self) -> WireKind {
        match self {
            Self::Null => WireKind::Null,
            Self::Bool(_) => WireKind::Bool,
            Self::Int(_) => WireKind::Int,
            Self::Float(_) => WireKind::Float,
            Self::Str(_) => WireKind::Str,
            Self::Bytes(_) => WireKind::Bytes,
            Self::Seq(_) => WireKind::Seq,
            Self::Set(_) => WireKind::Set,
            Self::Map(_) => WireKind::Map,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up `key` in a [`Value::Map`].
    ///
    /// Returns `None` for other kinds or when the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(map) => map.get(&StrKey(key)),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// StrKey

/// A borrowed text key that finds [`Value::Str`] entries of a [`ValueMap`]
/// without allocating.
///
/// # Examples
///
/// ```
/// use vc_wire::{StrKey, Value};
///
/// let value = Value::map([("id", 1)]);
/// let map = value.as_map().unwrap();
/// assert_eq!(map.get(&StrKey("id")), Some(&Value::Int(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrKey<'a>(pub &'a str);

impl Hash for StrKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `Value::hash` for `Value::Str`.
        core::mem::discriminant(&Value::Str(String::new())).hash(state);
        self.0.hash(state);
    }
}

impl indexmap::Equivalent<Value> for StrKey<'_> {
    #[inline]
    fn equivalent(&self, key: &Value) -> bool {
        key.as_str() == Some(self.0)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Str(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Seq(v) => v.hash(state),
            Self::Set(v) => {
                state.write_usize(v.len());
                state.write_u64(unordered_hash(v.iter()));
            }
            Self::Map(v) => {
                state.write_usize(v.len());
                state.write_u64(unordered_hash(v.iter()));
            }
        }
    }
}

/// A compact, JSON-like rendering used in error paths and messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "b{v:?}"),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Set(items) => {
                f.write_str("{")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Seq(value)
    }
}

impl From<ValueSet> for Value {
    #[inline]
    fn from(value: ValueSet) -> Self {
        Self::Set(value)
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Value, WireKind};

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn map_equality_ignores_order() {
        let a = Value::map([("x", 1), ("y", 2)]);
        let b = Value::map([("y", 2), ("x", 1)]);
        assert_eq!(a, b);

        let outer_a = Value::set([a]);
        let outer_b = Value::set([b]);
        assert_eq!(outer_a, outer_b);
    }

    #[test]
    fn map_keeps_insertion_order() {
        let value = Value::map([("b", 1), ("a", 2)]);
        let keys: alloc::vec::Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, [Value::from("b"), Value::from("a")]);
        assert_eq!(value.get("a"), Some(&Value::Int(2)));
        assert_eq!(value.get("c"), None);
    }

    #[test]
    fn display() {
        let value = Value::map([("a", Value::seq([1, 2])), ("b", Value::from("x"))]);
        assert_eq!(value.to_string(), r#"{"a": [1, 2], "b": "x"}"#);
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn kind() {
        assert_eq!(Value::from(true).kind(), WireKind::Bool);
        assert_eq!(Value::from(None::<i32>).kind(), WireKind::Null);
        assert_eq!(WireKind::Map.to_string(), "mapping");
    }
}
