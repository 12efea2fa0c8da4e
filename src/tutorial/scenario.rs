//! The hand-authored tutorial board.
//!
//! Three player units wait in hand; three goblins already hold the enemy
//! field, so placement never triggers an enemy deployment. The scripted
//! clash (knight in slot 2 against the goblin in slot 0) kills the goblin
//! and leaves the battle running.

use crate::cards::{Rarity, UnitInstance};
use crate::core::config::BattleConfig;
use crate::core::entity::UnitIdAllocator;
use crate::core::player::Side;
use crate::core::state::{BattleSession, BoardLayout};

/// Build the tutorial's opening session.
#[must_use]
pub fn tutorial_session(config: &BattleConfig) -> BattleSession {
    let mut ids = UnitIdAllocator::new();

    let player_hand = vec![
        UnitInstance::new(ids.alloc(), Side::Player, "Squire", 1, 4).with_race("Human"),
        UnitInstance::new(ids.alloc(), Side::Player, "Archer", 2, 2).with_race("Human"),
        UnitInstance::new(ids.alloc(), Side::Player, "Knight", 4, 5)
            .with_race("Human")
            .with_rarity(Rarity::Rare),
    ];
    let enemy_field = vec![
        Some(UnitInstance::new(ids.alloc(), Side::Enemy, "Goblin Scout", 1, 3).with_race("Goblin")),
        Some(UnitInstance::new(ids.alloc(), Side::Enemy, "Goblin Brute", 2, 4).with_race("Goblin")),
        Some(UnitInstance::new(ids.alloc(), Side::Enemy, "Goblin Shaman", 1, 2).with_race("Goblin")),
    ];

    let layout = BoardLayout {
        player_hand,
        enemy_field,
        enemy_deployed: true,
        ..BoardLayout::default()
    };
    BattleSession::from_board(config, ids, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Phase;

    #[test]
    fn test_tutorial_board() {
        let session = tutorial_session(&BattleConfig::default());

        assert_eq!(session.phase(), Phase::Placement);
        assert_eq!(session.side(Side::Player).hand().len(), 3);
        assert_eq!(session.side(Side::Enemy).field_count(), 3);
        assert!(session.side(Side::Enemy).hand().is_empty());
        assert!(session.enemy_deployed());
    }
}
