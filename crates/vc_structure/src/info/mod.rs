//! Descriptions of conversion targets.
//!
//! ## Menu
//!
//! - [`TypeDescriptor`]: A closed tree describing what a wire value is structured into.
//! - [`PrimitiveKind`]: The scalar leaves of that tree.
//! - [`RecordType`]: Identity of a record type, with its schema resolved lazily.
//!
//! Every dispatch decision of the converter switches on the shape of a
//! [`TypeDescriptor`]; nothing else about a Rust type is inspected.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod primitive;
mod record_type;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::TypeDescriptor;
pub use primitive::PrimitiveKind;
pub use record_type::RecordType;
