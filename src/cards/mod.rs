//! Card system: definitions, power model, upgrades, levels and units.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (base stats, growth, level range)
//! - `CardCatalog`: Card definition lookup
//! - `EffectiveStats`: Level and stats after upgrades
//! - `UpgradeLedger`: Purchased upgrade steps per card
//! - `LevelDefinition`: A level's enemy roster
//! - `UnitInstance`: Battle-scoped creature
//! - `UnitFactory`: Builds units for both sides

pub mod definition;
pub mod factory;
pub mod instance;
pub mod level;
pub mod power;
pub mod registry;
pub mod upgrades;

pub use definition::{CardDefinition, CardId, Rarity};
pub use factory::UnitFactory;
pub use instance::UnitInstance;
pub use level::{EnemyEntry, LevelDefinition, LevelRef};
pub use power::{can_upgrade, compute_effective_stats, is_max_level, upgrade_cost, EffectiveStats};
pub use registry::CardCatalog;
pub use upgrades::{UpgradeLedger, UpgradeReceipt};
