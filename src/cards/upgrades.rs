//! Upgrade ledger: card id to purchased step count.
//!
//! The ledger belongs to the player's profile. Battles only read it; the
//! profile writes it through `purchase`, which enforces the level cap and
//! the currency check before a step is recorded.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use super::power::{compute_effective_stats, is_max_level, upgrade_cost};
use crate::core::error::UpgradeError;

/// Purchased upgrade steps per card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLedger {
    steps: FxHashMap<CardId, u32>,
}

/// A completed upgrade purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReceipt {
    pub card: CardId,
    /// Currency spent.
    pub cost: u64,
    /// Step count after the purchase.
    pub steps: u32,
    /// Effective level after the purchase.
    pub level: u32,
}

impl UpgradeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps bought for a card. Cards never upgraded have 0.
    #[must_use]
    pub fn get(&self, card: &CardId) -> u32 {
        self.steps.get(card).copied().unwrap_or(0)
    }

    /// Overwrite a card's step count.
    pub fn set(&mut self, card: CardId, steps: u32) {
        self.steps.insert(card, steps);
    }

    #[must_use]
    pub fn with_steps(mut self, card: impl Into<CardId>, steps: u32) -> Self {
        self.set(card.into(), steps);
        self
    }

    /// Iterate over (card, steps) pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, u32)> {
        self.steps.iter().map(|(card, &steps)| (card, steps))
    }

    /// Buy the next step for a card.
    ///
    /// Fails without changing the ledger if the card is at its max level or
    /// `currency` does not cover the cost. The caller deducts
    /// `receipt.cost` from its balance.
    pub fn purchase(
        &mut self,
        card: &CardDefinition,
        currency: u64,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let steps = self.get(&card.id);
        if is_max_level(card, steps) {
            return Err(UpgradeError::AtMaxLevel {
                card: card.id.clone(),
                max_level: card.level_cap(),
            });
        }

        let cost = upgrade_cost(card, steps);
        if currency < cost {
            return Err(UpgradeError::InsufficientFunds {
                have: currency,
                need: cost,
            });
        }

        let steps = steps + 1;
        self.set(card.id.clone(), steps);
        log::debug!("upgraded {} to step {} for {}", card.id, steps, cost);

        Ok(UpgradeReceipt {
            card: card.id.clone(),
            cost,
            steps,
            level: compute_effective_stats(card, steps).level,
        })
    }
}
