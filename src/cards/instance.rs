//! Unit instances - battle-scoped creature state.
//!
//! A `UnitInstance` is built once per battle from a card definition (or an
//! enemy roster entry) and carries a snapshot of everything the renderer
//! needs, so the catalog is never consulted again mid-battle.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, Rarity};
use crate::core::entity::UnitId;
use crate::core::player::Side;

/// A creature taking part in a battle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitInstance {
    /// Battle-unique id.
    pub id: UnitId,

    /// Owning side. Never changes.
    pub owner: Side,

    /// Source card, if this unit came from the catalog.
    pub card_id: Option<CardId>,

    pub name: String,
    pub race: String,
    pub rarity: Rarity,
    pub text: String,
    pub art: Option<String>,

    /// Effective level the unit was built at.
    pub level: u32,

    /// Current attack.
    pub attack: i64,

    /// Current health. Zero means dead.
    pub health: i64,

    /// Health the unit entered the battle with.
    pub max_health: i64,
}

impl UnitInstance {
    /// Create a level-1 unit at full health.
    #[must_use]
    pub fn new(id: UnitId, owner: Side, name: impl Into<String>, attack: i64, health: i64) -> Self {
        Self {
            id,
            owner,
            card_id: None,
            name: name.into(),
            race: String::new(),
            rarity: Rarity::Common,
            text: String::new(),
            art: None,
            level: 1,
            attack,
            health,
            max_health: health,
        }
    }

    #[must_use]
    pub fn with_card(mut self, card_id: CardId) -> Self {
        self.card_id = Some(card_id);
        self
    }

    #[must_use]
    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_art(mut self, art: Option<String>) -> Self {
        self.art = art;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Check if the unit still has health left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage taken so far this battle.
    #[must_use]
    pub fn damage_taken(&self) -> i64 {
        (self.max_health - self.health).max(0)
    }
}
