//! Battle configuration types.
//!
//! - `Zone`: the three zones every side owns (hand, field, graveyard)
//! - `BattleConfig`: tunable rules (field size, deploy target, stat ratios)
//!
//! The defaults reproduce the standard game: a three-slot field, six-card
//! decks and enemy stats derived from roster power at 0.6 / 0.8.

use serde::{Deserialize, Serialize};

/// Zone a unit can live in. Each side owns one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Units waiting to be summoned. Order carries no rule meaning.
    Hand,
    /// Fixed-size slot array of summoned units.
    Field,
    /// Append-only list of dead units, in death order.
    Graveyard,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Hand => write!(f, "hand"),
            Zone::Field => write!(f, "field"),
            Zone::Graveyard => write!(f, "graveyard"),
        }
    }
}

/// Plain attack/health pair used for synthesized units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: i64,
    pub health: i64,
}

impl UnitStats {
    #[must_use]
    pub const fn new(attack: i64, health: i64) -> Self {
        Self { attack, health }
    }
}

/// Battle rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Number of field slots per side.
    pub field_slots: usize,

    /// Player field occupancy that ends placement.
    /// Also the number of units the enemy auto-deploys once per battle.
    pub deploy_target: usize,

    /// Maximum deck entries turned into units.
    pub deck_limit: usize,

    /// Enemy attack = round(power * ratio), floored at 1.
    pub enemy_attack_ratio: f64,

    /// Enemy health = round(power * ratio), floored at 1.
    pub enemy_health_ratio: f64,

    /// Units synthesized when a level has no enemy roster.
    pub fallback_roster_size: usize,

    /// Stats of the stand-in unit built for an unknown deck card.
    pub missing_card_stats: UnitStats,

    /// Delay hint attached to attack effects in the presentation queue.
    pub presentation_delay_ms: u64,

    /// Run the enemy turn inside the player's confirm event.
    /// When false the session waits in `EnemyTurn` for an explicit tick.
    pub auto_enemy_turn: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            field_slots: 3,
            deploy_target: 3,
            deck_limit: 6,
            enemy_attack_ratio: 0.6,
            enemy_health_ratio: 0.8,
            fallback_roster_size: 6,
            missing_card_stats: UnitStats::new(2, 2),
            presentation_delay_ms: 600,
            auto_enemy_turn: true,
        }
    }
}

impl BattleConfig {
    /// Set the number of field slots. The deploy target is clamped to fit.
    #[must_use]
    pub fn with_field_slots(mut self, slots: usize) -> Self {
        assert!(slots > 0, "Field must have at least 1 slot");
        self.field_slots = slots;
        self.deploy_target = self.deploy_target.min(slots);
        self
    }

    /// Set the placement occupancy target.
    #[must_use]
    pub fn with_deploy_target(mut self, target: usize) -> Self {
        assert!(
            (1..=self.field_slots).contains(&target),
            "Deploy target must be between 1 and the field size"
        );
        self.deploy_target = target;
        self
    }

    /// Set the deck size limit.
    #[must_use]
    pub fn with_deck_limit(mut self, limit: usize) -> Self {
        self.deck_limit = limit;
        self
    }

    /// Set the presentation delay hint.
    #[must_use]
    pub fn with_presentation_delay(mut self, delay_ms: u64) -> Self {
        self.presentation_delay_ms = delay_ms;
        self
    }

    /// Choose whether the enemy acts immediately after the player's attack.
    #[must_use]
    pub fn with_auto_enemy_turn(mut self, auto: bool) -> Self {
        self.auto_enemy_turn = auto;
        self
    }
}
