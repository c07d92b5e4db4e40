use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;
use vc_wire::{Value, WireKind};

use crate::info::TypeDescriptor;
use crate::native::Native;

// -----------------------------------------------------------------------------
// PathSegment

/// One step from an outer wire value into an inner one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A record field.
    Field(&'static str),
    /// A sequence or tuple element.
    Index(usize),
    SetMember,
    FrozenSetMember,
    /// A mapping entry, holding the rendered wire key.
    Key(String),
}

impl PathSegment {
    /// Creates the segment of the mapping entry whose key structured to `key`.
    ///
    /// Scalar keys render as on the wire; other keys as their shape.
    pub fn key(key: &Native) -> Self {
        let wire = match key {
            Native::Null => Value::Null,
            Native::Bool(v) => Value::Bool(*v),
            Native::Int(v) => Value::Int(*v),
            Native::Float(v) => Value::Float(*v),
            Native::Str(v) => Value::Str(v.clone()),
            Native::Bytes(v) => Value::Bytes(v.clone()),
            other => return Self::Key(format!("<{}>", other.kind_name())),
        };
        Self::Key(wire.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::SetMember => f.write_str("{set member}"),
            Self::FrozenSetMember => f.write_str("{frozenset member}"),
            Self::Key(key) => write!(f, "[{key}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// AmbiguityReason

/// Why a union could not pick a single member.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AmbiguityReason {
    #[error("record `{candidate}` is not the only member without an exclusive field")]
    NoExclusiveField { candidate: &'static str },

    #[error("member {member} is not a record")]
    NonRecordMember { member: TypeDescriptor },

    #[error("no member's exclusive fields are present")]
    NoCandidateMatched,

    #[error("exclusive fields of several members are present: {candidates:?}")]
    MultipleCandidatesMatched { candidates: Vec<&'static str> },
}

// -----------------------------------------------------------------------------
// StructureError

/// A failure to structure a wire value.
///
/// With [`ConverterConfig::contextualize_errors`](crate::ConverterConfig)
/// enabled, every error returned by
/// [`Converter::structure`](crate::Converter::structure) is a
/// [`StructureError::Structuring`] carrying the path to the failing value.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum StructureError {
    #[error("record `{record}` is missing required field `{field}`")]
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },

    #[error("expected {expected} elements, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: TypeDescriptor,
        found: WireKind,
    },

    #[error("cannot build {target} from a native {found}")]
    InvalidNative {
        target: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("{value} overflows {target}")]
    FloatOutOfRange { value: f64, target: &'static str },

    #[error("cannot structure {union}: {reason}")]
    AmbiguousUnion {
        union: TypeDescriptor,
        reason: AmbiguityReason,
    },

    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    Structuring(#[from] StructuringError),
}

impl StructureError {
    /// Creates a [`StructureError::Custom`], for use in hooks.
    #[inline]
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    /// Creates a [`StructureError::InvalidNative`] for a `T` that cannot be
    /// built from `found`.
    #[inline]
    pub fn invalid_native<T>(found: &Native) -> Self {
        Self::InvalidNative {
            target: core::any::type_name::<T>(),
            found: found.kind_name(),
        }
    }

    #[inline]
    pub(crate) fn type_mismatch(expected: &TypeDescriptor, found: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.clone(),
            found: found.kind(),
        }
    }

    /// Tags this error with the segment of the frame it passes through.
    ///
    /// Frames are added outermost-last, so the new segment goes to the front.
    pub fn within(self, segment: PathSegment) -> Self {
        match self {
            Self::Structuring(mut error) => {
                error.path.push_front(segment);
                Self::Structuring(error)
            }
            cause => Self::Structuring(StructuringError {
                path: VecDeque::from([segment]),
                cause: Box::new(cause),
            }),
        }
    }

    /// Wraps an error that has no context yet with an empty path.
    pub(crate) fn into_contextual(self) -> Self {
        match self {
            Self::Structuring(_) => self,
            cause => Self::Structuring(StructuringError {
                path: VecDeque::new(),
                cause: Box::new(cause),
            }),
        }
    }

    /// Drops the path context, keeping only the cause.
    pub(crate) fn without_context(self) -> Self {
        match self {
            Self::Structuring(error) => error.into_cause(),
            cause => cause,
        }
    }

    /// Replaces the outermost path segment, if there is one.
    pub(crate) fn map_outermost(self, f: impl FnOnce(PathSegment) -> PathSegment) -> Self {
        match self {
            Self::Structuring(mut error) => {
                if let Some(segment) = error.path.pop_front() {
                    error.path.push_front(f(segment));
                }
                Self::Structuring(error)
            }
            cause => cause,
        }
    }

    /// Returns the error with all context removed.
    pub fn root_cause(&self) -> &StructureError {
        match self {
            Self::Structuring(error) => error.cause.root_cause(),
            other => other,
        }
    }

    /// Returns the path context, if any.
    #[inline]
    pub fn context(&self) -> Option<&StructuringError> {
        match self {
            Self::Structuring(error) => Some(error),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// StructuringError

/// A [`StructureError`] together with where it happened.
#[derive(Debug, Clone)]
pub struct StructuringError {
    path: VecDeque<PathSegment>,
    cause: Box<StructureError>,
}

impl StructuringError {
    /// Returns the path from the root value to the failing one, outermost first.
    #[inline]
    pub fn path(&self) -> impl ExactSizeIterator<Item = &PathSegment> + DoubleEndedIterator {
        self.path.iter()
    }

    #[inline]
    pub fn cause(&self) -> &StructureError {
        &self.cause
    }

    #[inline]
    pub fn into_cause(self) -> StructureError {
        *self.cause
    }
}

impl fmt::Display for StructuringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("structuring failed at $")?;
        for segment in &self.path {
            write!(f, "{segment}")?;
        }
        write!(f, ": {}", self.cause)
    }
}

impl core::error::Error for StructuringError {
    #[inline]
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::error::Error;

    use vc_wire::WireKind;

    use super::{PathSegment, StructureError};
    use crate::info::TypeDescriptor;

    fn mismatch() -> StructureError {
        StructureError::TypeMismatch {
            expected: TypeDescriptor::INT,
            found: WireKind::Str,
        }
    }

    #[test]
    fn within_builds_path_outermost_first() {
        let error = mismatch()
            .within(PathSegment::Index(2))
            .within(PathSegment::Field("items"))
            .within(PathSegment::Field("order"));

        let context = error.context().unwrap();
        let path: Vec<_> = context.path().cloned().collect();
        assert_eq!(
            path,
            [
                PathSegment::Field("order"),
                PathSegment::Field("items"),
                PathSegment::Index(2),
            ]
        );
        assert!(matches!(context.cause(), StructureError::TypeMismatch { .. }));
        assert_eq!(
            error.to_string(),
            "structuring failed at $.order.items[2]: expected int, found str"
        );
    }

    #[test]
    fn source_is_the_cause() {
        let error = mismatch().within(PathSegment::Field("value"));
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "expected int, found str");
    }

    #[test]
    fn root_error_gets_empty_path() {
        let error = mismatch().into_contextual();
        assert_eq!(error.context().unwrap().path().len(), 0);
        assert!(matches!(error.root_cause(), StructureError::TypeMismatch { .. }));

        let again = error.into_contextual();
        assert_eq!(again.context().unwrap().path().len(), 0);
        assert!(matches!(
            again.context().unwrap().cause(),
            StructureError::TypeMismatch { .. }
        ));
    }
}
