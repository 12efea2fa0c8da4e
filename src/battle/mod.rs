//! Battle state machine and driver.
//!
//! ## Key Types
//!
//! - `BattleMachine`: The reducer implementing `RulesEngine`
//! - `Battle`: Runs one battle and notifies a `BattleObserver`
//! - `BattleSetup`: Deck, ledger and level for building a session
//! - `Click`: Presentation click mapped to an input event
//! - `RewardPolicy`: Scoring hook, `FixedReward` by default

pub mod click;
pub mod driver;
pub mod machine;

pub use click::Click;
pub use driver::{Battle, BattleObserver, BattleReport, BattleSetup, FixedReward, RewardPolicy};
pub use machine::BattleMachine;
