//! Unit identification.
//!
//! Every creature that takes part in a battle gets a `UnitId` when it is
//! built. Ids are allocated by the battle session that owns the unit, so
//! two sessions never share a counter and an id is never handed out twice
//! within one battle.
//!
//! ## Usage
//!
//! ```
//! use ccg_battle::core::{UnitId, UnitIdAllocator};
//!
//! let mut ids = UnitIdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_ne!(first, second);
//! assert_eq!(ids.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a unit instance within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a unit ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Session-scoped monotonic id allocator.
///
/// Ids start at 1 so that 0 never names a live unit. The counter only moves
/// forward; ids of units that died are not recycled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitIdAllocator {
    next: u32,
}

impl Default for UnitIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl UnitIdAllocator {
    /// Create a fresh allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }

    /// Peek at the id the next `alloc` call will return.
    #[must_use]
    pub fn peek(&self) -> UnitId {
        UnitId(self.next)
    }
}
