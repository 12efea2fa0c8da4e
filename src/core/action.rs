//! Battle input events and the accepted-event history.
//!
//! Events are the only way a battle session changes. The presentation layer
//! sends the player's events; the opponent AI produces the enemy's events
//! internally, and both end up in the session history as `EventRecord`s.

use serde::{Deserialize, Serialize};

use super::entity::UnitId;
use super::player::Side;

/// A discrete input to the battle state machine.
///
/// ## Example
///
/// ```
/// use ccg_battle::core::{BattleEvent, UnitId};
///
/// let summon = BattleEvent::PlayCard(UnitId(4));
/// assert_eq!(summon.unit(), Some(UnitId(4)));
/// assert_eq!(BattleEvent::ConfirmAttack.unit(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleEvent {
    /// Summon a hand unit to the first empty field slot.
    PlayCard(UnitId),
    /// Select (or deselect) an attacker on the acting side's field.
    ChooseAttacker(UnitId),
    /// Select a target on the opposing field.
    ChooseTarget(UnitId),
    /// Resolve the selected attacker against the selected target.
    ConfirmAttack,
    /// Let the enemy take its turn (when not run automatically).
    EnemyTurnTick,
    /// Throw the battle away and restart from the opening board.
    RequestReset,
}

impl BattleEvent {
    /// The unit this event refers to, if any.
    #[must_use]
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            BattleEvent::PlayCard(id)
            | BattleEvent::ChooseAttacker(id)
            | BattleEvent::ChooseTarget(id) => Some(*id),
            BattleEvent::ConfirmAttack | BattleEvent::EnemyTurnTick | BattleEvent::RequestReset => {
                None
            }
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BattleEvent::PlayCard(_) => "play_card",
            BattleEvent::ChooseAttacker(_) => "choose_attacker",
            BattleEvent::ChooseTarget(_) => "choose_target",
            BattleEvent::ConfirmAttack => "confirm_attack",
            BattleEvent::EnemyTurnTick => "enemy_turn_tick",
            BattleEvent::RequestReset => "request_reset",
        }
    }
}

/// An accepted event with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Side that acted.
    pub side: Side,

    /// The event that was applied.
    pub event: BattleEvent,

    /// Turn number when the event was applied.
    pub turn: u32,

    /// Sequence number across the whole battle.
    pub sequence: u32,
}

impl EventRecord {
    /// Create a new event record.
    #[must_use]
    pub fn new(side: Side, event: BattleEvent, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            event,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_unit() {
        assert_eq!(BattleEvent::ChooseTarget(UnitId(9)).unit(), Some(UnitId(9)));
        assert_eq!(BattleEvent::EnemyTurnTick.unit(), None);
        assert_eq!(BattleEvent::RequestReset.name(), "request_reset");
    }

    #[test]
    fn test_event_serialization() {
        let event = BattleEvent::PlayCard(UnitId(3));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"playCard":3}"#);

        let back: BattleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_unit_less_event_serialization() {
        let json = serde_json::to_string(&BattleEvent::ConfirmAttack).unwrap();
        assert_eq!(json, r#""confirmAttack""#);
    }

    #[test]
    fn test_event_record() {
        let record = EventRecord::new(Side::Enemy, BattleEvent::ConfirmAttack, 3, 17);
        assert_eq!(record.side, Side::Enemy);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 17);
    }
}
