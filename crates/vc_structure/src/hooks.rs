//! Per-converter hook registry.
//!
//! A hook replaces the built-in handling for exactly one [`TypeDescriptor`].
//! Matching never looks inside a descriptor: a hook for `sequence[any]` is
//! not used for `sequence[int]`.

use alloc::sync::Arc;

use vc_wire::Value;
use vc_wire::hash::FixedHashState;
use vc_wire::hash::hashbrown::HashMap;

use crate::converter::Converter;
use crate::error::StructureError;
use crate::info::TypeDescriptor;
use crate::native::Native;

// -----------------------------------------------------------------------------
// Hook types

/// Builds a [`Native`] of the given descriptor from a wire value.
///
/// The converter is passed in so that hooks can recurse into it.
pub type StructureHook =
    Arc<dyn Fn(&Converter, &Value, &TypeDescriptor) -> Result<Native, StructureError> + Send + Sync>;

/// Writes a [`Native`] to the wire.
pub type UnstructureHook = Arc<dyn Fn(&Converter, &Native) -> Value + Send + Sync>;

// -----------------------------------------------------------------------------
// HookStore

/// Structure and unstructure hooks keyed by their exact descriptor.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_structure::hooks::{HookStore, UnstructureHook};
/// use vc_structure::info::TypeDescriptor;
/// use vc_structure::Value;
///
/// let mut store = HookStore::default();
/// let hook: UnstructureHook = Arc::new(|_, _| Value::Null);
///
/// assert!(store.insert_unstructure(TypeDescriptor::INT, hook.clone()).is_none());
/// assert!(store.insert_unstructure(TypeDescriptor::INT, hook).is_some());
/// assert!(store.unstructure_hook(&TypeDescriptor::INT).is_some());
/// assert!(store.unstructure_hook(&TypeDescriptor::FLOAT).is_none());
/// ```
#[derive(Default, Clone)]
pub struct HookStore {
    structure: HashMap<TypeDescriptor, StructureHook, FixedHashState>,
    unstructure: HashMap<TypeDescriptor, UnstructureHook, FixedHashState>,
}

impl HookStore {
    /// Registers a structure hook, returning the one it replaced.
    #[inline]
    pub fn insert_structure(
        &mut self,
        ty: TypeDescriptor,
        hook: StructureHook,
    ) -> Option<StructureHook> {
        self.structure.insert(ty, hook)
    }

    /// Registers an unstructure hook, returning the one it replaced.
    #[inline]
    pub fn insert_unstructure(
        &mut self,
        ty: TypeDescriptor,
        hook: UnstructureHook,
    ) -> Option<UnstructureHook> {
        self.unstructure.insert(ty, hook)
    }

    #[inline]
    pub fn remove_structure(&mut self, ty: &TypeDescriptor) -> Option<StructureHook> {
        self.structure.remove(ty)
    }

    #[inline]
    pub fn remove_unstructure(&mut self, ty: &TypeDescriptor) -> Option<UnstructureHook> {
        self.unstructure.remove(ty)
    }

    #[inline]
    pub fn structure_hook(&self, ty: &TypeDescriptor) -> Option<&StructureHook> {
        self.structure.get(ty)
    }

    #[inline]
    pub fn unstructure_hook(&self, ty: &TypeDescriptor) -> Option<&UnstructureHook> {
        self.unstructure.get(ty)
    }

    /// Returns `true` if no hook of either direction is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.structure.is_empty() && self.unstructure.is_empty()
    }
}
