//! `serde` support for [`Value`](crate::Value).
//!
//! Serialization maps every variant onto serde's data model:
//! sets are written as sequences and bytes through `serialize_bytes`.
//!
//! Deserialization goes through `deserialize_any`, so it needs a
//! self-describing format. Unsigned integers above `i64::MAX` are rejected
//! rather than silently turned into floats.

mod de;
mod ser;
