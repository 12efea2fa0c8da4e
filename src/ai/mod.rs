//! Opponent AI.
//!
//! The enemy's turn is decided by an `OpponentPolicy` and executed by the
//! battle machine. The default `FrontLine` policy deploys into every empty
//! slot, then makes exactly one attack: leftmost enemy unit against the
//! leftmost player unit.
//!
//! ```
//! use ccg_battle::ai::{take_enemy_turn, FrontLine};
//! use ccg_battle::battle::BattleMachine;
//! use ccg_battle::cards::UnitInstance;
//! use ccg_battle::core::{BattleConfig, BattleSession, Side, UnitIdAllocator};
//! use ccg_battle::rules::RulesEngine;
//!
//! let machine = BattleMachine::new(BattleConfig::default(), FrontLine);
//! let mut ids = UnitIdAllocator::new();
//! let player = vec![UnitInstance::new(ids.alloc(), Side::Player, "Wolf", 2, 3)];
//! let enemy = vec![UnitInstance::new(ids.alloc(), Side::Enemy, "Rat", 1, 1)];
//! let session = BattleSession::start(machine.config(), ids, player, enemy);
//!
//! // Still the player's placement: nothing happens.
//! assert_eq!(take_enemy_turn(&machine, &session), session);
//! ```

pub mod policy;

pub use policy::{plan_deployment, EnemyPlan, FrontLine, OpponentPolicy, RandomTarget};

use crate::battle::BattleMachine;
use crate::core::action::BattleEvent;
use crate::core::state::BattleSession;
use crate::rules::RulesEngine;

/// Play the enemy's turn if it is the enemy's turn.
///
/// Otherwise the session comes back unchanged.
#[must_use]
pub fn take_enemy_turn(machine: &BattleMachine, session: &BattleSession) -> BattleSession {
    match machine.reduce(session, BattleEvent::EnemyTurnTick) {
        Ok(reduction) => reduction.session,
        Err(_) => session.clone(),
    }
}
