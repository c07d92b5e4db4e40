#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Alloc paths
//
// Unlike `vc_wire`, this crate always links `std`: the schema and union
// caches are guarded by `std::sync::RwLock`.

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod converter;
mod error;
mod union;

pub mod hooks;
pub mod info;
pub mod native;
pub mod schema;
pub mod typed;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use config::{ConverterConfig, UnstructureStrategy};
pub use converter::Converter;
pub use error::{AmbiguityReason, PathSegment, StructureError, StructuringError};
pub use native::Native;

pub use vc_wire::{Value, ValueMap, ValueSet, WireKind};
