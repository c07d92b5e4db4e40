/// How records are written to the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnstructureStrategy {
    /// A mapping from field name to field value, in declared order.
    #[default]
    AsMap,
    /// A sequence of field values, in declared order.
    ///
    /// Records are then also structured from sequences.
    AsSeq,
}

/// Construction-time settings of a [`Converter`](crate::Converter).
///
/// # Examples
///
/// ```
/// use vc_structure::{Converter, ConverterConfig, UnstructureStrategy};
///
/// let config = ConverterConfig::new()
///     .with_contextualize_errors(true)
///     .with_unstructure_strategy(UnstructureStrategy::AsSeq);
///
/// let converter = Converter::with_config(config);
/// assert!(converter.config().contextualize_errors);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Tag structuring failures with the path to the failing value.
    pub contextualize_errors: bool,
    pub unstructure_strategy: UnstructureStrategy,
}

impl ConverterConfig {
    /// Returns the default configuration: no error context, records as maps.
    #[inline]
    pub const fn new() -> Self {
        Self {
            contextualize_errors: false,
            unstructure_strategy: UnstructureStrategy::AsMap,
        }
    }

    #[inline]
    pub const fn with_contextualize_errors(mut self, enabled: bool) -> Self {
        self.contextualize_errors = enabled;
        self
    }

    #[inline]
    pub const fn with_unstructure_strategy(mut self, strategy: UnstructureStrategy) -> Self {
        self.unstructure_strategy = strategy;
        self
    }
}
