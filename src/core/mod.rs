//! Core battle types: unit ids, sides, configuration, events, RNG, session state.
//!
//! This module contains the building blocks every other module shares.
//! Battles are tuned through `BattleConfig` rather than by changing the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use entity::{UnitId, UnitIdAllocator};
pub use player::{Side, SideMap};
pub use rng::GameRng;
pub use config::{BattleConfig, UnitStats, Zone};
pub use action::{BattleEvent, EventRecord};
pub use error::{Rejection, ScriptError, SnapshotError, UpgradeError};
pub use state::{BattleOutcome, BattleSession, BoardLayout, Phase};
