use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt::Debug;

use crate::error::StructureError;
use crate::info::RecordType;
use crate::native::Native;
use crate::schema::RecordSchema;

// -----------------------------------------------------------------------------
// Record

/// A record value, seen through a trait object.
///
/// This is what a [`Native::Record`] holds. Use [`impl_record!`] rather than
/// implementing it by hand.
///
/// [`impl_record!`]: crate::impl_record
pub trait Record: Any + Debug + Send + Sync {
    /// Returns the identity of the concrete record type.
    fn record_type(&self) -> RecordType;

    /// Returns the field values, in declared order.
    fn field_values(&self) -> Vec<Native>;

    fn clone_record(&self) -> Box<dyn Record>;

    /// Returns `true` if `other` is the same record type with equal fields.
    fn record_eq(&self, other: &dyn Record) -> bool;
}

impl dyn Record {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Record>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Attempts to downcast the box to a concrete record type.
    ///
    /// Returns the original box on failure.
    pub fn downcast<T: Record>(self: Box<Self>) -> Result<Box<T>, Box<dyn Record>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        Ok(any.downcast::<T>().unwrap_or_else(|_| unreachable!()))
    }
}

impl Clone for Box<dyn Record> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_record()
    }
}

impl PartialEq for dyn Record {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.record_eq(other)
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The static schema of a record type.
///
/// # Examples
///
/// ```
/// use vc_structure::impl_record;
/// use vc_structure::schema::Schema;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct User {
///     id: i64,
///     name: String,
///     admin: bool,
/// }
///
/// impl_record!(User { id: i64, name: String, admin: bool = false });
///
/// let schema = User::schema();
/// let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["id", "name", "admin"]);
/// assert!(!schema.fields()[0].has_default());
/// assert!(schema.fields()[2].has_default());
/// ```
pub trait Schema: Record + Sized {
    /// The name used in descriptors and error messages.
    fn record_name() -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the fields of this record in declared order.
    fn schema() -> RecordSchema;

    /// Builds a value from field values given in declared order.
    fn from_fields(fields: Vec<Native>) -> Result<Self, StructureError>;
}
