//! Level definitions: the enemy roster of one campaign level.

use serde::{Deserialize, Serialize};

/// One enemy in a level's roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyEntry {
    /// Roster id. Matches a catalog card id when the enemy reuses card art.
    pub id: String,
    pub name: String,
    /// Overall strength. Attack and health are derived from it.
    pub power: i64,
    #[serde(default)]
    pub race: String,
}

impl EnemyEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, power: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            power,
            race: String::new(),
        }
    }

    #[must_use]
    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }
}

/// Identifies a level inside a chapter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRef {
    pub chapter_id: String,
    pub level_id: u32,
}

impl LevelRef {
    #[must_use]
    pub fn new(chapter_id: impl Into<String>, level_id: u32) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            level_id,
        }
    }
}

impl std::fmt::Display for LevelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.chapter_id, self.level_id)
    }
}

/// A playable level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub chapter_id: String,
    pub level_id: u32,
    #[serde(default)]
    pub enemies: Vec<EnemyEntry>,
}

impl LevelDefinition {
    #[must_use]
    pub fn new(chapter_id: impl Into<String>, level_id: u32) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            level_id,
            enemies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyEntry) -> Self {
        self.enemies.push(enemy);
        self
    }

    #[must_use]
    pub fn reference(&self) -> LevelRef {
        LevelRef::new(self.chapter_id.clone(), self.level_id)
    }
}
