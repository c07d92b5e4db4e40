//! Hashing used by wire containers, based on *foldhash*.
//!
//! Wire sets and maps use a fixed seed so that hashing (and therefore the
//! iteration order of a [`ValueSet`]) only depends on the contents.
//!
//! [`ValueSet`]: crate::ValueSet

use core::hash::{BuildHasher, Hash};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x2D35_8DCC_AA6C_78A5);

/// A hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed-seed hash state for wire containers.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_wire::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one(3_i64), FixedHashState.hash_one(3_i64));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Combines the hashes of `items` so that the result does not depend on
/// iteration order.
///
/// Used for sets and maps, whose equality ignores order.
pub fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items.fold(0_u64, |acc, item| {
        acc.wrapping_add(FixedHashState.hash_one(item))
    })
}

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
pub use indexmap;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::unordered_hash;

    #[test]
    fn unordered_hash_ignores_order() {
        assert_eq!(
            unordered_hash([1_i64, 2, 3].iter()),
            unordered_hash([3_i64, 1, 2].iter()),
        );
        assert_ne!(
            unordered_hash([1_i64, 2].iter()),
            unordered_hash([1_i64, 3].iter()),
        );
    }
}
