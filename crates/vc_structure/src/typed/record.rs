/// Implements [`Record`], [`Schema`], [`Typed`], [`FromNative`] and
/// [`ToNative`] for a plain struct.
///
/// List every field in declaration order with its type. A field may be
/// followed by `= expr`; the expression is evaluated again each time the
/// field is missing from a wire value.
///
/// The struct must implement `Clone`, `PartialEq` and `Debug`.
///
/// # Examples
///
/// ```
/// use vc_structure::{Converter, Value, impl_record};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Job {
///     name: String,
///     retries: u8,
///     labels: Vec<String>,
/// }
///
/// impl_record!(Job {
///     name: String,
///     retries: u8 = 3,
///     labels: Vec<String> = Vec::new(),
/// });
///
/// let converter = Converter::new();
/// let job: Job = converter.structure_as(&Value::map([("name", "build")])).unwrap();
/// assert_eq!(job.retries, 3);
/// assert!(job.labels.is_empty());
/// ```
///
/// [`Record`]: crate::schema::Record
/// [`Schema`]: crate::schema::Schema
/// [`Typed`]: crate::typed::Typed
/// [`FromNative`]: crate::typed::FromNative
/// [`ToNative`]: crate::typed::ToNative
#[macro_export]
macro_rules! impl_record {
    ($name:ident { $($field:ident : $ty:ty $(= $default:expr)?),* $(,)? }) => {
        impl $crate::schema::Record for $name {
            fn record_type(&self) -> $crate::info::RecordType {
                $crate::info::RecordType::of::<Self>()
            }

            fn field_values(&self) -> $crate::__macro_exports::Vec<$crate::Native> {
                $crate::__macro_exports::Vec::from([
                    $($crate::typed::ToNative::to_native(&self.$field)),*
                ])
            }

            fn clone_record(&self) -> $crate::__macro_exports::Box<dyn $crate::schema::Record> {
                $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self))
            }

            fn record_eq(&self, other: &dyn $crate::schema::Record) -> bool {
                other
                    .downcast_ref::<Self>()
                    .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
            }
        }

        impl $crate::schema::Schema for $name {
            fn record_name() -> &'static str {
                ::core::stringify!($name)
            }

            fn schema() -> $crate::schema::RecordSchema {
                $crate::schema::RecordSchema::of::<Self>([
                    $(
                        $crate::schema::FieldDescriptor::of::<$ty>(::core::stringify!($field))
                        $(.with_factory(|| {
                            let value: $ty = $default;
                            $crate::typed::ToNative::to_native(&value)
                        }))?
                    ),*
                ])
            }

            fn from_fields(
                fields: $crate::__macro_exports::Vec<$crate::Native>,
            ) -> ::core::result::Result<Self, $crate::StructureError> {
                const LEN: usize = <[&str]>::len(&[$(::core::stringify!($field)),*]);
                if fields.len() != LEN {
                    return ::core::result::Result::Err($crate::StructureError::SizeMismatch {
                        expected: LEN,
                        actual: fields.len(),
                    });
                }

                #[allow(unused_mut, unused_variables)]
                let mut fields = fields.into_iter();
                ::core::result::Result::Ok(Self {
                    $($field: <$ty as $crate::typed::FromNative>::from_native(
                        ::core::iter::Iterator::next(&mut fields).unwrap_or_default(),
                    )
                    .map_err(|error| {
                        error.within($crate::PathSegment::Field(::core::stringify!($field)))
                    })?,)*
                })
            }
        }

        impl $crate::typed::Typed for $name {
            #[inline]
            fn descriptor() -> $crate::info::TypeDescriptor {
                $crate::info::TypeDescriptor::record::<Self>()
            }
        }

        impl $crate::typed::FromNative for $name {
            fn from_native(
                native: $crate::Native,
            ) -> ::core::result::Result<Self, $crate::StructureError> {
                match native {
                    $crate::Native::Record(record) => record
                        .downcast::<Self>()
                        .map(|record| *record)
                        .map_err(|record| {
                            $crate::StructureError::invalid_native::<Self>(&$crate::Native::Record(record))
                        }),
                    other => ::core::result::Result::Err(
                        $crate::StructureError::invalid_native::<Self>(&other),
                    ),
                }
            }
        }

        impl $crate::typed::ToNative for $name {
            #[inline]
            fn to_native(&self) -> $crate::Native {
                $crate::Native::record(::core::clone::Clone::clone(self))
            }
        }
    };
}
