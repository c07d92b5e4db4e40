use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::schema::{RecordSchema, Schema};

/// Identity of a record type.
///
/// Equality, ordering and hashing only look at the [`TypeId`].
///
/// The schema is not stored but produced on demand through a function
/// pointer, so record types that refer to each other can be described
/// without expanding forever. The converter memoizes the result.
///
/// # Examples
///
/// ```
/// use vc_structure::impl_record;
/// use vc_structure::info::RecordType;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl_record!(Point { x: i64, y: i64 });
///
/// let record = RecordType::of::<Point>();
/// assert_eq!(record.name(), "Point");
/// assert_eq!(record.build_schema().field_len(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    schema: fn() -> RecordSchema,
}

impl RecordType {
    /// Creates a [`RecordType`] from its parts.
    ///
    /// Prefer [`RecordType::of`] for types implementing [`Schema`].
    #[inline]
    pub const fn new(id: TypeId, name: &'static str, schema: fn() -> RecordSchema) -> Self {
        Self { id, name, schema }
    }

    /// Returns the [`RecordType`] of `T`.
    #[inline]
    pub fn of<T: Schema>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::record_name(),
            schema: T::schema,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Builds the schema from scratch.
    ///
    /// [`Converter::record_schema`](crate::Converter::record_schema) serves a cached copy.
    #[inline]
    pub fn build_schema(&self) -> RecordSchema {
        (self.schema)()
    }
}

impl PartialEq for RecordType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl PartialOrd for RecordType {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordType {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for RecordType {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

impl fmt::Display for RecordType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
