use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use vc_wire::hash::FixedHashState;
use vc_wire::hash::hashbrown::HashMap;

use crate::info::RecordType;
use crate::schema::RecordSchema;

/// Memoized record schemas of one converter.
///
/// Schemas are built outside the lock; the first one published wins, so
/// readers never see a partial schema.
#[derive(Default)]
pub(crate) struct SchemaCache {
    schemas: RwLock<HashMap<TypeId, Arc<RecordSchema>, FixedHashState>>,
}

impl SchemaCache {
    pub fn get(&self, record: RecordType) -> Arc<RecordSchema> {
        if let Some(schema) = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&record.id())
        {
            return Arc::clone(schema);
        }

        let built = Arc::new(record.build_schema());
        log::trace!(
            "built schema of `{}` with {} fields",
            record.name(),
            built.field_len()
        );

        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(schemas.entry(record.id()).or_insert(built))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
