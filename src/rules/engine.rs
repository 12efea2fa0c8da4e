//! Rules engine trait for battle implementations.
//!
//! A rules engine decides:
//! - Which input events are legal in a session
//! - How an event turns one session into the next
//! - When the battle is over

use smallvec::SmallVec;

use crate::core::action::BattleEvent;
use crate::core::config::BattleConfig;
use crate::core::error::Rejection;
use crate::core::state::{BattleOutcome, BattleSession};
use crate::presentation::PresentationEffect;

/// Effects produced by one event. Most events produce a handful.
pub type EffectList = SmallVec<[PresentationEffect; 4]>;

/// Result of applying an accepted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The next session.
    pub session: BattleSession,
    /// What the renderer should show for this step, in order.
    pub effects: EffectList,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `reduce` must not touch its input; a rejected event leaves the caller
///   holding the exact session it had
/// - `reduce` must be deterministic
/// - `legal_events` lists only events `reduce` would accept
pub trait RulesEngine {
    /// Get the battle configuration.
    fn config(&self) -> &BattleConfig;

    /// Events that would currently be accepted.
    fn legal_events(&self, session: &BattleSession) -> Vec<BattleEvent>;

    /// Apply one input event.
    fn reduce(&self, session: &BattleSession, event: BattleEvent) -> Result<Reduction, Rejection>;

    /// Check if the battle is over.
    ///
    /// Returns `Some(outcome)` once a result is recorded, `None` while it
    /// continues.
    fn is_terminal(&self, session: &BattleSession) -> Option<BattleOutcome> {
        session.result()
    }

    /// Check a single event without keeping the result.
    fn is_legal(&self, session: &BattleSession, event: BattleEvent) -> bool {
        self.reduce(session, event).is_ok()
    }
}
