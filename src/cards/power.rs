//! Card power model.
//!
//! Effective stats follow from a definition and an upgrade step count:
//!
//! ```text
//! level  = min(base_level + steps, max_level)
//! attack = attack + (level - base_level) * attack_per_level
//! health = health + (level - base_level) * health_per_level
//! ```
//!
//! Steps past the max level are clamped, never an error. The next step
//! costs `cost * (steps + 1)`.

use serde::{Deserialize, Serialize};

use super::definition::CardDefinition;

/// Level and stats of a card after upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub level: u32,
    pub attack: i64,
    pub health: i64,
}

/// Compute a card's effective level and stats for an upgrade step count.
///
/// ```
/// use ccg_battle::cards::{compute_effective_stats, CardDefinition, CardId};
///
/// let card = CardDefinition::new(CardId::new("wolf"), "Wolf", 2, 3)
///     .with_growth(1, 2)
///     .with_levels(1, 3);
///
/// let stats = compute_effective_stats(&card, 10);
/// assert_eq!(stats.level, 3);
/// assert_eq!(stats.attack, 4);
/// assert_eq!(stats.health, 7);
/// ```
#[must_use]
pub fn compute_effective_stats(card: &CardDefinition, steps: u32) -> EffectiveStats {
    let level = card.base_level.saturating_add(steps).min(card.level_cap());
    let delta = i64::from(level - card.base_level);

    EffectiveStats {
        level,
        attack: card.attack + delta * card.attack_per_level,
        health: card.health + delta * card.health_per_level,
    }
}

/// Cost of the next upgrade step when `steps` have been bought.
#[must_use]
pub fn upgrade_cost(card: &CardDefinition, steps: u32) -> u64 {
    card.cost.saturating_mul(u64::from(steps) + 1)
}

/// Whether another step would go past the max level.
#[must_use]
pub fn is_max_level(card: &CardDefinition, steps: u32) -> bool {
    card.base_level.saturating_add(steps) >= card.level_cap()
}

/// Whether the next step is both possible and affordable.
#[must_use]
pub fn can_upgrade(card: &CardDefinition, steps: u32, currency: u64) -> bool {
    !is_max_level(card, steps) && currency >= upgrade_cost(card, steps)
}
