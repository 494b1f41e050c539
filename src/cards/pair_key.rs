//! Pair keys and their allocator.
//!
//! Every pair in a deal shares one `PairKey`. Keys are issued by a
//! `PairKeyAllocator` that lives for exactly one deck build, so two games
//! built in the same process never influence each other.
//!
//! ```
//! use concentration::cards::{PairKey, PairKeyAllocator};
//!
//! let mut alloc = PairKeyAllocator::new();
//! let keys: Vec<_> = (0..6).map(|_| alloc.next_key()).collect();
//!
//! assert_eq!(keys, [1, 1, 2, 2, 3, 3].map(PairKey::new));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier shared by the two cards of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(pub u32);

impl PairKey {
    /// Create a new pair key.
    #[must_use]
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Sequential pair key allocator.
///
/// Issues each key exactly twice: the first call of a pair advances the
/// counter, the partner call reuses it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairKeyAllocator {
    last: u32,
    needs_partner: bool,
}

impl PairKeyAllocator {
    /// Create an allocator whose first key is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next key.
    pub fn next_key(&mut self) -> PairKey {
        if self.needs_partner {
            self.needs_partner = false;
        } else {
            self.last += 1;
            self.needs_partner = true;
        }
        PairKey(self.last)
    }

    /// True if the last issued key is still waiting for its partner.
    #[must_use]
    pub fn needs_partner(&self) -> bool {
        self.needs_partner
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> PairKeyAllocatorState {
        PairKeyAllocatorState {
            last: self.last,
            needs_partner: self.needs_partner,
        }
    }

    /// Resume from a saved state.
    #[must_use]
    pub fn from_state(state: &PairKeyAllocatorState) -> Self {
        Self {
            last: state.last,
            needs_partner: state.needs_partner,
        }
    }
}

/// Explicit allocator state: last issued value and pairing parity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairKeyAllocatorState {
    /// Last key value handed out (0 before the first call).
    pub last: u32,
    /// Whether the next call completes a pair.
    pub needs_partner: bool,
}
