//! Presentation clicks.
//!
//! The renderer reports clicks as `{owner, zone, slot}`. `Click::to_event`
//! turns one into the input event it stands for on the current board:
//!
//! | Click                  | Event                  |
//! |------------------------|------------------------|
//! | player hand, index i   | `PlayCard(hand[i])`    |
//! | player field, slot i   | `ChooseAttacker(unit)` |
//! | enemy field, slot i    | `ChooseTarget(unit)`   |
//!
//! Anything else (empty slots, graveyards, the enemy hand) maps to nothing.

use serde::{Deserialize, Serialize};

use crate::core::action::BattleEvent;
use crate::core::config::Zone;
use crate::core::error::Rejection;
use crate::core::player::Side;
use crate::core::state::BattleSession;

/// A click on a zone position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Click {
    /// Side owning the clicked zone.
    pub owner: Side,
    pub zone: Zone,
    /// Hand index, field slot or graveyard index.
    pub slot: usize,
}

impl Click {
    #[must_use]
    pub fn new(owner: Side, zone: Zone, slot: usize) -> Self {
        Self { owner, zone, slot }
    }

    /// Click on a hand position.
    #[must_use]
    pub fn hand(owner: Side, slot: usize) -> Self {
        Self::new(owner, Zone::Hand, slot)
    }

    /// Click on a field slot.
    #[must_use]
    pub fn field(owner: Side, slot: usize) -> Self {
        Self::new(owner, Zone::Field, slot)
    }

    /// The event this click stands for on `session`'s board.
    pub fn to_event(&self, session: &BattleSession) -> Result<BattleEvent, Rejection> {
        let zones = session.side(self.owner);
        let event = match (self.owner, self.zone) {
            (Side::Player, Zone::Hand) => zones.hand().get(self.slot).map(|u| BattleEvent::PlayCard(u.id)),
            (Side::Player, Zone::Field) => zones
                .unit_in_slot(self.slot)
                .map(|u| BattleEvent::ChooseAttacker(u.id)),
            (Side::Enemy, Zone::Field) => zones
                .unit_in_slot(self.slot)
                .map(|u| BattleEvent::ChooseTarget(u.id)),
            _ => None,
        };

        event.ok_or(Rejection::NotClickable {
            side: self.owner,
            zone: self.zone,
            slot: self.slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::UnitInstance;
    use crate::core::config::BattleConfig;
    use crate::core::entity::{UnitId, UnitIdAllocator};
    use crate::core::state::BoardLayout;

    fn board() -> BattleSession {
        let mut ids = UnitIdAllocator::new();
        let hand = UnitInstance::new(ids.alloc(), Side::Player, "Squire", 1, 1);
        let field = UnitInstance::new(ids.alloc(), Side::Player, "Knight", 3, 3);
        let enemy = UnitInstance::new(ids.alloc(), Side::Enemy, "Goblin", 1, 2);
        let layout = BoardLayout {
            player_hand: vec![hand],
            player_field: vec![None, Some(field)],
            enemy_field: vec![Some(enemy)],
            ..BoardLayout::default()
        };
        BattleSession::from_board(&BattleConfig::default(), ids, layout)
    }

    #[test]
    fn test_clicks_map_to_events() {
        let session = board();

        assert_eq!(Click::hand(Side::Player, 0).to_event(&session), Ok(BattleEvent::PlayCard(UnitId(1))));
        assert_eq!(
            Click::field(Side::Player, 1).to_event(&session),
            Ok(BattleEvent::ChooseAttacker(UnitId(2)))
        );
        assert_eq!(
            Click::field(Side::Enemy, 0).to_event(&session),
            Ok(BattleEvent::ChooseTarget(UnitId(3)))
        );
    }

    #[test]
    fn test_empty_slot_is_not_clickable() {
        let session = board();
        let err = Click::field(Side::Player, 0).to_event(&session).unwrap_err();
        assert_eq!(
            err,
            Rejection::NotClickable { side: Side::Player, zone: Zone::Field, slot: 0 }
        );
    }

    #[test]
    fn test_enemy_hand_is_not_clickable() {
        let session = board();
        assert!(Click::hand(Side::Enemy, 0).to_event(&session).is_err());
        assert!(Click::new(Side::Player, Zone::Graveyard, 0).to_event(&session).is_err());
    }
}
