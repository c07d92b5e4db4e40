use core::fmt;

use vc_wire::WireKind;

/// The scalar kinds a wire value can be structured into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
}

impl PrimitiveKind {
    /// Returns the [`WireKind`] a value of this kind is written as.
    pub const fn wire_kind(self) -> WireKind {
        match self {
            Self::Null => WireKind::Null,
            Self::Bool => WireKind::Bool,
            Self::Int => WireKind::Int,
            Self::Float => WireKind::Float,
            Self::Str => WireKind::Str,
            Self::Bytes => WireKind::Bytes,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.wire_kind(), f)
    }
}
