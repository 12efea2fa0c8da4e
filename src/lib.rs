//! # ccg-battle
//!
//! Turn-based creature card battle engine.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: Every input is a `BattleEvent`. `RulesEngine::reduce`
//!    maps `(session, event)` to a new session plus presentation effects, or
//!    rejects the event and leaves the session untouched.
//!
//! 2. **One Rule Set**: The regular battle and the tutorial drive the same
//!    `BattleMachine`. The tutorial only gates which inputs reach it.
//!
//! 3. **Presentation Is Downstream**: The engine never waits on animation.
//!    Effects are queued and the renderer drains them at its own pace.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) session clones via `im-rs`, so the
//!   reducer can hand back a fresh session for every event.
//!
//! - **Session-Scoped Ids**: Unit ids come from the session's own allocator
//!   and are never reused within a battle.
//!
//! ## Modules
//!
//! - `core`: Unit ids, sides, configuration, events, errors, session state
//! - `zones`: Hand, field slots and graveyard per side
//! - `cards`: Card definitions, power model, upgrades, unit factory
//! - `combat`: Simultaneous attack resolution
//! - `rules`: RulesEngine trait
//! - `battle`: The battle state machine, click mapping and battle driver
//! - `ai`: Opponent policies
//! - `tutorial`: Scripted tutorial over the battle machine
//! - `presentation`: Effect queue for the renderer
//! - `profile`: Gold, deck, upgrades and campaign progress

pub mod core;
pub mod zones;
pub mod cards;
pub mod combat;
pub mod rules;
pub mod battle;
pub mod ai;
pub mod tutorial;
pub mod presentation;
pub mod profile;

// Re-export commonly used types
pub use crate::core::{
    UnitId, UnitIdAllocator, Side, SideMap,
    GameRng, BattleConfig, UnitStats, Zone,
    BattleEvent, EventRecord,
    Rejection, ScriptError, SnapshotError, UpgradeError,
    BattleOutcome, BattleSession, BoardLayout, Phase,
};

pub use crate::zones::{SideZones, ZoneLocation};

pub use crate::cards::{
    CardId, CardDefinition, Rarity, CardCatalog, UnitInstance, UnitFactory,
    EnemyEntry, LevelDefinition, LevelRef,
    EffectiveStats, compute_effective_stats, upgrade_cost,
    UpgradeLedger, UpgradeReceipt,
};

pub use crate::combat::{resolve_attack, AttackResolution, ClashOutcome};

pub use crate::rules::{RulesEngine, Reduction, EffectList};

pub use crate::battle::{
    Battle, BattleMachine, BattleObserver, BattleReport, BattleSetup,
    Click, FixedReward, RewardPolicy,
};

pub use crate::ai::{OpponentPolicy, EnemyPlan, FrontLine, RandomTarget};

pub use crate::tutorial::{
    TutorialEngine, TutorialInput, TutorialOutcome, TutorialProgress,
    TutorialScript, TutorialStep,
};

pub use crate::presentation::{PresentationEffect, PresentationQueue};

pub use crate::profile::{ChapterProgress, Profile};
