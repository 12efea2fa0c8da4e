//! FIFO of presentation effects.
//!
//! The battle machine commits every result synchronously and describes what
//! the renderer should show as a list of `PresentationEffect`s. The driver
//! appends them here; the renderer drains them at its own pace, honoring
//! each effect's delay hint. Nothing in the engine ever waits on this queue.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::combat::ClashOutcome;
use crate::core::entity::UnitId;
use crate::core::player::Side;
use crate::core::state::BattleOutcome;

/// Something the renderer should show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationEffect {
    /// A unit moved from hand to a field slot.
    UnitSummoned { side: Side, unit: UnitId, slot: usize },
    /// An attack was resolved. Show it after `delay_ms`.
    AttackResolved { clash: ClashOutcome, delay_ms: u64 },
    /// A unit moved to its graveyard.
    UnitDied { side: Side, unit: UnitId },
    /// The turn passed to `side`.
    TurnPassed { side: Side, turn_number: u32 },
    /// The battle reached its result.
    BattleEnded { outcome: BattleOutcome },
}

/// Pending effects, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresentationQueue {
    pending: VecDeque<PresentationEffect>,
}

impl PresentationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: PresentationEffect) {
        self.pending.push_back(effect);
    }

    /// Take the oldest effect.
    pub fn pop(&mut self) -> Option<PresentationEffect> {
        self.pending.pop_front()
    }

    /// Take every pending effect, oldest first.
    pub fn drain(&mut self) -> Vec<PresentationEffect> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<PresentationEffect> for PresentationQueue {
    fn extend<I: IntoIterator<Item = PresentationEffect>>(&mut self, effects: I) {
        self.pending.extend(effects);
    }
}
