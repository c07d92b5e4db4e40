//! Record schemas.
//!
//! ## Menu
//!
//! - [`Record`]: Object-safe access to a record value held in a [`Native`](crate::Native).
//! - [`Schema`]: Static schema of a record type; implemented by [`impl_record!`](crate::impl_record).
//! - [`RecordSchema`]: The ordered field list plus a constructor.
//! - [`FieldDescriptor`], [`FieldDefault`]: One field and its fallback value.
//!
//! A [`Converter`](crate::Converter) builds each schema at most once and
//! serves it from its own cache afterwards.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod field;
mod record;
mod record_schema;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use cache::SchemaCache;

pub use field::{FieldDefault, FieldDescriptor};
pub use record::{Record, Schema};
pub use record_schema::RecordSchema;
