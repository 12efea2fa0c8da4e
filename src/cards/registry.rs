//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition loaded at startup and
//! provides lookup by `CardId`. It is read-only during battles.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_battle::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(CardId::new("ghoul"), "Ghoul", 2, 3));
///
/// let found = catalog.get(&CardId::new("ghoul")).unwrap();
/// assert_eq!(found.name, "Ghoul");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions.
    ///
    /// Panics on duplicate ids.
    pub fn from_definitions(cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {} already registered", card.id);
        }
        self.cards.insert(card.id.clone(), card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards of a race.
    pub fn find_by_race<'a>(&'a self, race: &'a str) -> impl Iterator<Item = &'a CardDefinition> {
        self.cards.values().filter(move |c| c.race == race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDefinition::new(CardId::new("ghoul"), "Ghoul", 2, 3));

        let found = catalog.get(&CardId::new("ghoul"));
        assert!(found.is_some());
        assert_eq!(found.unwrap().attack, 2);

        assert!(catalog.get(&CardId::new("missing")).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDefinition::new(CardId::new("ghoul"), "Ghoul", 2, 3));
        catalog.register(CardDefinition::new(CardId::new("ghoul"), "Other Ghoul", 1, 1));
    }

    #[test]
    fn test_from_definitions() {
        let catalog = CardCatalog::from_definitions(vec![
            CardDefinition::new(CardId::new("a"), "A", 1, 1),
            CardDefinition::new(CardId::new("b"), "B", 1, 1),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&CardId::new("a")));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_find_by_race() {
        let catalog = CardCatalog::from_definitions(vec![
            CardDefinition::new(CardId::new("ghoul"), "Ghoul", 2, 3).with_race("Undead"),
            CardDefinition::new(CardId::new("drake"), "Drake", 3, 4).with_race("Dragon"),
            CardDefinition::new(CardId::new("wight"), "Wight", 3, 2).with_race("Undead"),
        ]);

        let undead: Vec<_> = catalog.find_by_race("Undead").collect();
        assert_eq!(undead.len(), 2);
        assert_eq!(catalog.iter().count(), 3);
    }
}
