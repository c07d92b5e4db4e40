use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use vc_wire::hash::FixedHashState;
use vc_wire::hash::hashbrown::HashMap;

use crate::error::AmbiguityReason;
use crate::info::TypeDescriptor;
use crate::union::Disambiguator;

type Analysis = Result<Arc<Disambiguator>, AmbiguityReason>;

/// Union analyses of one converter, keyed by union descriptor.
#[derive(Default)]
pub(crate) struct UnionCache {
    unions: RwLock<HashMap<TypeDescriptor, Analysis, FixedHashState>>,
}

impl UnionCache {
    pub fn get(
        &self,
        ty: &TypeDescriptor,
        build: impl FnOnce() -> Result<Disambiguator, AmbiguityReason>,
    ) -> Analysis {
        if let Some(analysis) = self
            .unions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ty)
        {
            return analysis.clone();
        }

        let analysis = build().map(Arc::new);
        match &analysis {
            Ok(_) => log::debug!("union {ty} is disambiguated by exclusive fields"),
            Err(reason) => log::debug!("union {ty} cannot be disambiguated: {reason}"),
        }

        let mut unions = self.unions.write().unwrap_or_else(PoisonError::into_inner);
        unions.entry(ty.clone()).or_insert(analysis).clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.unions.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
