//! Structuring of sum types.
//!
//! A union of records is resolved by *exclusive fields*: names that belong
//! to exactly one member. The member whose exclusive field appears in the
//! wire mapping is chosen. At most one member may have no exclusive field;
//! it is chosen when no other member matches. The analysis runs once per
//! union descriptor and is cached, failures included.

use vc_wire::Value;

use crate::converter::Converter;
use crate::error::StructureError;
use crate::info::TypeDescriptor;
use crate::native::Native;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod disambiguator;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use cache::UnionCache;
pub(crate) use disambiguator::Disambiguator;

// -----------------------------------------------------------------------------
// Structure

impl Converter {
    pub(crate) fn structure_union(
        &self,
        value: &Value,
        ty: &TypeDescriptor,
    ) -> Result<Native, StructureError> {
        let TypeDescriptor::Union(members) = ty else {
            return Err(StructureError::type_mismatch(ty, value));
        };

        if value.is_null() && members.iter().any(TypeDescriptor::is_null) {
            return Ok(Native::Null);
        }

        let mut rest = members.iter().filter(|member| !member.is_null());
        match (rest.next(), rest.next()) {
            (Some(only), None) => return self.dispatch_structure(value, only),
            (None, _) => return Err(StructureError::type_mismatch(ty, value)),
            _ => {}
        }

        let ambiguous = |reason| StructureError::AmbiguousUnion {
            union: ty.clone(),
            reason,
        };

        let disambiguator = self
            .unions
            .get(ty, || Disambiguator::build(members, |record| self.schemas.get(record)))
            .map_err(ambiguous)?;

        let Value::Map(map) = value else {
            return Err(StructureError::type_mismatch(ty, value));
        };
        let record = disambiguator.select(map).map_err(ambiguous)?;
        self.dispatch_structure(value, &TypeDescriptor::Record(record))
    }
}
