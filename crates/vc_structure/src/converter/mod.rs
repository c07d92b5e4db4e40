//! The converter: hook registration, dispatch and built-in handlers.

use alloc::sync::Arc;

use vc_wire::Value;

use crate::config::ConverterConfig;
use crate::error::StructureError;
use crate::hooks::HookStore;
use crate::info::{RecordType, TypeDescriptor};
use crate::native::Native;
use crate::schema::{RecordSchema, SchemaCache};
use crate::typed::{FromNative, ToNative, Typed};
use crate::union::UnionCache;

// -----------------------------------------------------------------------------
// Modules

mod containers;
mod dispatch;
mod record;

// -----------------------------------------------------------------------------
// Converter

/// Converts wire values into typed in-memory values and back.
///
/// A converter owns its hooks and caches; nothing is shared between
/// converters. Hooks are registered through `&mut self`, after which the
/// converter can be shared across threads and used through `&self`.
///
/// # Examples
///
/// ```
/// use vc_structure::{Converter, Value, impl_record};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl_record!(Point { x: i64, y: i64 });
///
/// let converter = Converter::new();
/// let wire = converter.unstructure_from(&Point { x: 1, y: 2 });
/// assert_eq!(wire, Value::map([("x", 1), ("y", 2)]));
///
/// let point: Point = converter.structure_as(&wire).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
#[derive(Default)]
pub struct Converter {
    pub(crate) config: ConverterConfig,
    pub(crate) hooks: HookStore,
    pub(crate) schemas: SchemaCache,
    pub(crate) unions: UnionCache,
}

impl Converter {
    /// Creates a converter with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with the given configuration.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration fixed at construction.
    #[inline]
    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Returns the registered hooks.
    #[inline]
    pub const fn hooks(&self) -> &HookStore {
        &self.hooks
    }

    /// Returns the schema of `record`, building it on first use.
    #[inline]
    pub fn record_schema(&self, record: RecordType) -> Arc<RecordSchema> {
        self.schemas.get(record)
    }

    // -------------------------------------------------------------------------
    // Hook registration

    /// Registers a structure hook for exactly `ty`.
    ///
    /// Returns `true` if a previously registered hook was replaced.
    pub fn register_structure_hook<F>(&mut self, ty: TypeDescriptor, hook: F) -> bool
    where
        F: Fn(&Converter, &Value, &TypeDescriptor) -> Result<Native, StructureError>
            + Send
            + Sync
            + 'static,
    {
        let replaced = self.hooks.structure_hook(&ty).is_some();
        if replaced {
            log::debug!("replacing structure hook for {ty}");
        }
        self.hooks.insert_structure(ty, Arc::new(hook));
        replaced
    }

    /// Registers an unstructure hook for exactly `ty`.
    ///
    /// Returns `true` if a previously registered hook was replaced.
    pub fn register_unstructure_hook<F>(&mut self, ty: TypeDescriptor, hook: F) -> bool
    where
        F: Fn(&Converter, &Native) -> Value + Send + Sync + 'static,
    {
        let replaced = self.hooks.unstructure_hook(&ty).is_some();
        if replaced {
            log::debug!("replacing unstructure hook for {ty}");
        }
        self.hooks.insert_unstructure(ty, Arc::new(hook));
        replaced
    }

    /// Removes the structure hook of `ty`, restoring built-in handling.
    ///
    /// Returns `true` if a hook was registered.
    pub fn remove_structure_hook(&mut self, ty: &TypeDescriptor) -> bool {
        let removed = self.hooks.remove_structure(ty).is_some();
        if removed {
            log::debug!("removed structure hook for {ty}");
        }
        removed
    }

    /// Removes the unstructure hook of `ty`, restoring built-in handling.
    ///
    /// Returns `true` if a hook was registered.
    pub fn remove_unstructure_hook(&mut self, ty: &TypeDescriptor) -> bool {
        let removed = self.hooks.remove_unstructure(ty).is_some();
        if removed {
            log::debug!("removed unstructure hook for {ty}");
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Typed entry points

    /// Structures `value` into a `T`.
    pub fn structure_as<T: Typed + FromNative>(&self, value: &Value) -> Result<T, StructureError> {
        let native = self.structure(value, &T::descriptor())?;
        T::from_native(native).map_err(|error| self.settle_error(error))
    }

    /// Unstructures `value` using its declared descriptor.
    #[inline]
    pub fn unstructure_from<T: Typed + ToNative>(&self, value: &T) -> Value {
        self.unstructure_as(&value.to_native(), &T::descriptor())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Converter;
    use crate::info::TypeDescriptor;
    use crate::{Native, Value};

    #[test]
    fn converter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn register_reports_replacement() {
        let mut converter = Converter::new();
        assert!(!converter.register_unstructure_hook(TypeDescriptor::INT, |_, _| Value::Null));
        assert!(converter.register_unstructure_hook(TypeDescriptor::INT, |_, _| Value::from("x")));
        assert_eq!(converter.unstructure(&Native::Int(1)), Value::from("x"));

        assert!(converter.remove_unstructure_hook(&TypeDescriptor::INT));
        assert!(!converter.remove_unstructure_hook(&TypeDescriptor::INT));
        assert_eq!(converter.unstructure(&Native::Int(1)), Value::Int(1));
    }
}
