//! Card definitions - static catalog data.
//!
//! `CardDefinition` holds the immutable properties of a creature card:
//! its base stats, how much each upgrade level adds, and its level range.
//! Everything that changes during a battle lives on `UnitInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// Card ids are the strings stored in decks and upgrade ledgers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rarity tier. Cosmetic for the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_battle::cards::{CardDefinition, CardId, Rarity};
///
/// let drake = CardDefinition::new(CardId::new("ember_drake"), "Ember Drake", 3, 4)
///     .with_race("Dragon")
///     .with_rarity(Rarity::Rare)
///     .with_growth(1, 2)
///     .with_levels(1, 5);
///
/// assert_eq!(drake.max_level, 5);
/// assert_eq!(drake.health_per_level, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Creature race (e.g. "Dragon", "Undead").
    #[serde(default)]
    pub race: String,

    #[serde(default)]
    pub rarity: Rarity,

    /// Attack at `base_level`.
    pub attack: i64,

    /// Health at `base_level`.
    pub health: i64,

    /// Attack added per level above `base_level`.
    #[serde(default)]
    pub attack_per_level: i64,

    /// Health added per level above `base_level`.
    #[serde(default)]
    pub health_per_level: i64,

    /// Level of an unupgraded card.
    #[serde(default = "default_level")]
    pub base_level: u32,

    /// Highest reachable level.
    #[serde(default = "default_level")]
    pub max_level: u32,

    /// Base upgrade cost. Step `n` (0-based) costs `cost * (n + 1)`.
    #[serde(default)]
    pub cost: u64,

    /// Rules text.
    #[serde(default)]
    pub text: String,

    /// Flavor text.
    #[serde(default)]
    pub flavor: String,

    /// Art reference handed through to the renderer.
    #[serde(default)]
    pub art: Option<String>,
}

fn default_level() -> u32 {
    1
}

impl CardDefinition {
    /// Create a new level-1 card with no growth.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, attack: i64, health: i64) -> Self {
        Self {
            id,
            name: name.into(),
            race: String::new(),
            rarity: Rarity::Common,
            attack,
            health,
            attack_per_level: 0,
            health_per_level: 0,
            base_level: 1,
            max_level: 1,
            cost: 0,
            text: String::new(),
            flavor: String::new(),
            art: None,
        }
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

    /// Set per-level attack and health deltas.
    #[must_use]
    pub fn with_growth(mut self, attack_per_level: i64, health_per_level: i64) -> Self {
        self.attack_per_level = attack_per_level;
        self.health_per_level = health_per_level;
        self
    }

    /// Set the base and max level.
    #[must_use]
    pub fn with_levels(mut self, base_level: u32, max_level: u32) -> Self {
        self.base_level = base_level;
        self.max_level = max_level;
        self
    }

    /// Set the base upgrade cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = flavor.into();
        self
    }

    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    /// Highest level this card can reach, never below its base level.
    #[must_use]
    pub fn level_cap(&self) -> u32 {
        self.max_level.max(self.base_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new("ember_drake");
        assert_eq!(id.as_str(), "ember_drake");
        assert_eq!(format!("{}", id), "Card(ember_drake)");
        assert_eq!(CardId::from("ember_drake"), id);
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new(CardId::new("bone_knight"), "Bone Knight", 2, 5)
            .with_race("Undead")
            .with_rarity(Rarity::Epic)
            .with_growth(1, 1)
            .with_levels(2, 6)
            .with_cost(40)
            .with_text("Stubborn.")
            .with_art("cards/bone_knight.png");

        assert_eq!(card.name, "Bone Knight");
        assert_eq!(card.race, "Undead");
        assert_eq!(card.rarity, Rarity::Epic);
        assert_eq!(card.base_level, 2);
        assert_eq!(card.max_level, 6);
        assert_eq!(card.cost, 40);
        assert_eq!(card.art.as_deref(), Some("cards/bone_knight.png"));
    }

    #[test]
    fn test_level_cap_never_below_base() {
        let card = CardDefinition::new(CardId::new("odd"), "Odd", 1, 1).with_levels(4, 2);
        assert_eq!(card.level_cap(), 4);
    }

    #[test]
    fn test_card_definition_from_catalog_json() {
        let json = r#"{
            "id": "ember_drake",
            "name": "Ember Drake",
            "race": "Dragon",
            "rarity": "rare",
            "attack": 3,
            "health": 4,
            "attackPerLevel": 1,
            "healthPerLevel": 2,
            "maxLevel": 5,
            "cost": 25
        }"#;

        let card: CardDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId::new("ember_drake"));
        assert_eq!(card.rarity, Rarity::Rare);
        assert_eq!(card.base_level, 1);
        assert_eq!(card.max_level, 5);
        assert!(card.art.is_none());
    }
}
