//! The player's persisted profile.
//!
//! Stored as JSON:
//!
//! ```json
//! {
//!   "gold": 120,
//!   "deck": ["wolf", "knight"],
//!   "upgrades": {"wolf": 2},
//!   "progress": {"crypt": {"maxUnlockedLevel": 2, "completedLevels": [1]}}
//! }
//! ```
//!
//! Battles read the deck and upgrades through `battle_setup`. Finished
//! battles come back through `record_battle`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::battle::{BattleReport, BattleSetup};
use crate::cards::{CardCatalog, CardId, LevelDefinition, LevelRef, UpgradeLedger, UpgradeReceipt};
use crate::core::error::UpgradeError;
use crate::core::state::BattleOutcome;

/// Campaign progress inside one chapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProgress {
    pub max_unlocked_level: u32,
    #[serde(default)]
    pub completed_levels: Vec<u32>,
}

impl Default for ChapterProgress {
    fn default() -> Self {
        Self {
            max_unlocked_level: 1,
            completed_levels: Vec::new(),
        }
    }
}

impl ChapterProgress {
    #[must_use]
    pub fn is_completed(&self, level_id: u32) -> bool {
        self.completed_levels.contains(&level_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub deck: Vec<CardId>,
    #[serde(default)]
    pub upgrades: UpgradeLedger,
    /// Chapter id to progress.
    #[serde(default)]
    pub progress: BTreeMap<String, ChapterProgress>,
}

impl Profile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_gold(mut self, gold: u64) -> Self {
        self.gold = gold;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = CardId>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    /// Buy the next upgrade step for a card, paying from `gold`.
    pub fn purchase_upgrade(
        &mut self,
        catalog: &CardCatalog,
        card: &CardId,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let definition = catalog
            .get(card)
            .ok_or_else(|| UpgradeError::UnknownCard(card.clone()))?;

        let receipt = self.upgrades.purchase(definition, self.gold)?;
        self.gold -= receipt.cost;
        Ok(receipt)
    }

    /// Chapter progress, or the starting progress for an unseen chapter.
    #[must_use]
    pub fn chapter(&self, chapter_id: &str) -> ChapterProgress {
        self.progress.get(chapter_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_unlocked(&self, level: &LevelRef) -> bool {
        level.level_id <= self.chapter(&level.chapter_id).max_unlocked_level
    }

    /// Inputs for a battle on `level` with the current deck and upgrades.
    #[must_use]
    pub fn battle_setup(&self, level: LevelDefinition) -> BattleSetup {
        BattleSetup::new(self.deck.clone(), self.upgrades.clone(), level)
    }

    /// Apply a battle report. Defeats change nothing.
    ///
    /// A victory pays the reward, marks the level completed and unlocks the
    /// next level of the chapter. Returns whether the profile changed.
    pub fn record_battle(&mut self, report: &BattleReport) -> bool {
        if report.outcome != BattleOutcome::Victory {
            return false;
        }

        self.gold = self.gold.saturating_add(report.reward);
        if let Some(level) = &report.level {
            let progress = self.progress.entry(level.chapter_id.clone()).or_default();
            if !progress.is_completed(level.level_id) {
                progress.completed_levels.push(level.level_id);
                progress.completed_levels.sort_unstable();
            }
            let next = level.level_id.saturating_add(1);
            progress.max_unlocked_level = progress.max_unlocked_level.max(next);
            log::info!(
                "{} completed, chapter unlocked up to level {}",
                level,
                progress.max_unlocked_level
            );
        }
        true
    }
}
