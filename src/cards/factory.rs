//! Unit factory: battle-ready units for both sides.
//!
//! Player units come from deck card ids, the catalog and the upgrade
//! ledger. Enemy units come from a level's roster, with stats derived from
//! each entry's power. Missing data never stops a battle from starting:
//! an unknown card becomes a plain stand-in unit and an empty roster is
//! replaced by a generated one.

use super::definition::CardId;
use super::instance::UnitInstance;
use super::level::{EnemyEntry, LevelDefinition};
use super::power::compute_effective_stats;
use super::registry::CardCatalog;
use super::upgrades::UpgradeLedger;
use crate::core::config::BattleConfig;
use crate::core::entity::UnitIdAllocator;
use crate::core::player::Side;

/// Builds unit instances from catalog data.
///
/// Every unit gets a fresh id from the allocator passed in, which should
/// be the allocator the battle session will own.
///
/// ```
/// use ccg_battle::cards::{CardCatalog, CardDefinition, CardId, UnitFactory, UpgradeLedger};
/// use ccg_battle::core::{BattleConfig, UnitIdAllocator};
///
/// let catalog = CardCatalog::from_definitions(vec![
///     CardDefinition::new(CardId::new("wolf"), "Wolf", 2, 3),
/// ]);
/// let config = BattleConfig::default();
/// let factory = UnitFactory::new(&catalog, &config);
///
/// let mut ids = UnitIdAllocator::new();
/// let deck = vec![CardId::new("wolf"), CardId::new("wolf")];
/// let units = factory.build_player_units(&mut ids, &deck, &UpgradeLedger::new());
///
/// assert_eq!(units.len(), 2);
/// assert_ne!(units[0].id, units[1].id);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UnitFactory<'a> {
    catalog: &'a CardCatalog,
    config: &'a BattleConfig,
}

impl<'a> UnitFactory<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, config: &'a BattleConfig) -> Self {
        Self { catalog, config }
    }

    /// Build the player's units, one per deck entry, in deck order.
    ///
    /// Duplicates are allowed. Entries past the deck limit are dropped.
    pub fn build_player_units(
        &self,
        ids: &mut UnitIdAllocator,
        deck: &[CardId],
        ledger: &UpgradeLedger,
    ) -> Vec<UnitInstance> {
        if deck.len() > self.config.deck_limit {
            log::warn!(
                "deck has {} cards, using the first {}",
                deck.len(),
                self.config.deck_limit
            );
        }

        deck.iter()
            .take(self.config.deck_limit)
            .map(|card_id| self.build_player_unit(ids, card_id, ledger.get(card_id)))
            .collect()
    }

    fn build_player_unit(
        &self,
        ids: &mut UnitIdAllocator,
        card_id: &CardId,
        steps: u32,
    ) -> UnitInstance {
        let id = ids.alloc();

        let Some(card) = self.catalog.get(card_id) else {
            log::warn!("{} is not in the catalog, using a stand-in unit", card_id);
            let stats = self.config.missing_card_stats;
            return UnitInstance::new(id, Side::Player, card_id.as_str(), stats.attack, stats.health)
                .with_card(card_id.clone());
        };

        let stats = compute_effective_stats(card, steps);
        UnitInstance::new(id, Side::Player, card.name.clone(), stats.attack, stats.health)
            .with_card(card.id.clone())
            .with_race(card.race.clone())
            .with_rarity(card.rarity)
            .with_text(card.text.clone())
            .with_art(card.art.clone())
            .with_level(stats.level)
    }

    /// Build the enemy's units from a level roster, in roster order.
    ///
    /// An empty roster yields the generated fallback roster.
    pub fn build_enemy_units(
        &self,
        ids: &mut UnitIdAllocator,
        level: &LevelDefinition,
    ) -> Vec<UnitInstance> {
        if level.enemies.is_empty() {
            log::warn!("level {} has no enemy roster, using fallback units", level.reference());
            return self.build_fallback_roster(ids);
        }

        level
            .enemies
            .iter()
            .map(|entry| self.build_enemy_unit(ids, entry))
            .collect()
    }

    fn build_enemy_unit(&self, ids: &mut UnitIdAllocator, entry: &EnemyEntry) -> UnitInstance {
        let attack = scale_power(entry.power, self.config.enemy_attack_ratio);
        let health = scale_power(entry.power, self.config.enemy_health_ratio);
        let unit = UnitInstance::new(ids.alloc(), Side::Enemy, entry.name.clone(), attack, health)
            .with_race(entry.race.clone());

        // Roster entries that name a catalog card borrow its presentation.
        match self.catalog.get(&CardId::new(entry.id.as_str())) {
            Some(card) => unit
                .with_card(card.id.clone())
                .with_rarity(card.rarity)
                .with_text(card.text.clone())
                .with_art(card.art.clone()),
            None => unit,
        }
    }

    /// Generic enemies with attack and health of 2, 3, 4, ...
    fn build_fallback_roster(&self, ids: &mut UnitIdAllocator) -> Vec<UnitInstance> {
        (0..self.config.fallback_roster_size)
            .map(|i| {
                let stat = 2 + i as i64;
                UnitInstance::new(ids.alloc(), Side::Enemy, format!("Wanderer {}", i + 1), stat, stat)
            })
            .collect()
    }
}

/// `round(power * ratio)`, never below 1.
fn scale_power(power: i64, ratio: f64) -> i64 {
    ((power as f64 * ratio).round() as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Rarity};

    fn catalog() -> CardCatalog {
        CardCatalog::from_definitions(vec![
            CardDefinition::new(CardId::new("wolf"), "Wolf", 2, 3)
                .with_race("Beast")
                .with_growth(1, 1)
                .with_levels(1, 4),
            CardDefinition::new(CardId::new("ghoul"), "Ghoul", 1, 1)
                .with_rarity(Rarity::Rare)
                .with_art("ghoul.png"),
        ])
    }

    #[test]
    fn test_player_units_apply_upgrades() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);
        let ledger = UpgradeLedger::new().with_steps("wolf", 2);

        let mut ids = UnitIdAllocator::new();
        let units = factory.build_player_units(&mut ids, &[CardId::new("wolf")], &ledger);

        assert_eq!(units.len(), 1);
        let wolf = &units[0];
        assert_eq!(wolf.level, 3);
        assert_eq!(wolf.attack, 4);
        assert_eq!(wolf.health, 5);
        assert_eq!(wolf.max_health, 5);
        assert_eq!(wolf.owner, Side::Player);
        assert_eq!(wolf.race, "Beast");
    }

    #[test]
    fn test_short_deck_is_not_padded() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);

        let mut ids = UnitIdAllocator::new();
        let deck = vec![CardId::new("wolf"), CardId::new("ghoul")];
        let units = factory.build_player_units(&mut ids, &deck, &UpgradeLedger::new());

        assert_eq!(units.len(), 2);
        assert_eq!(ids.allocated(), 2);
    }

    #[test]
    fn test_long_deck_is_truncated() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);

        let mut ids = UnitIdAllocator::new();
        let deck = vec![CardId::new("wolf"); 9];
        let units = factory.build_player_units(&mut ids, &deck, &UpgradeLedger::new());

        assert_eq!(units.len(), 6);
    }

    #[test]
    fn test_unknown_card_becomes_stand_in() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);

        let mut ids = UnitIdAllocator::new();
        let units =
            factory.build_player_units(&mut ids, &[CardId::new("lost")], &UpgradeLedger::new());

        assert_eq!(units[0].attack, 2);
        assert_eq!(units[0].health, 2);
        assert_eq!(units[0].name, "lost");
    }

    #[test]
    fn test_enemy_stats_from_power() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);
        let level = LevelDefinition::new("crypt", 1)
            .with_enemy(EnemyEntry::new("brute", "Brute", 10))
            .with_enemy(EnemyEntry::new("rat", "Rat", 1))
            .with_enemy(EnemyEntry::new("imp", "Imp", 0));

        let mut ids = UnitIdAllocator::new();
        let units = factory.build_enemy_units(&mut ids, &level);

        assert_eq!((units[0].attack, units[0].health), (6, 8));
        assert_eq!((units[1].attack, units[1].health), (1, 1));
        assert_eq!((units[2].attack, units[2].health), (1, 1));
        assert!(units.iter().all(|u| u.owner == Side::Enemy));
    }

    #[test]
    fn test_enemy_borrows_catalog_presentation() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);
        let level = LevelDefinition::new("crypt", 1)
            .with_enemy(EnemyEntry::new("ghoul", "Crypt Ghoul", 5).with_race("Undead"));

        let mut ids = UnitIdAllocator::new();
        let units = factory.build_enemy_units(&mut ids, &level);

        assert_eq!(units[0].name, "Crypt Ghoul");
        assert_eq!(units[0].art.as_deref(), Some("ghoul.png"));
        assert_eq!(units[0].rarity, Rarity::Rare);
        assert_eq!((units[0].attack, units[0].health), (3, 4));
    }

    #[test]
    fn test_empty_roster_falls_back() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let factory = UnitFactory::new(&catalog, &config);

        let mut ids = UnitIdAllocator::new();
        let units = factory.build_enemy_units(&mut ids, &LevelDefinition::new("crypt", 9));

        assert_eq!(units.len(), 6);
        for (i, unit) in units.iter().enumerate() {
            assert_eq!(unit.attack, 2 + i as i64);
            assert_eq!(unit.health, 2 + i as i64);
        }
        assert_eq!(units[0].name, "Wanderer 1");
    }
}
