#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod serde;
mod value;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use value::{StrKey, Value, ValueMap, ValueSet, WireKind};
