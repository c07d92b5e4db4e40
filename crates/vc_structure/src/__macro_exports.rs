//! Paths used by [`impl_record!`](crate::impl_record).

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;
