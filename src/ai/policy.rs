//! Opponent policies.
//!
//! A policy looks at the session at the start of the enemy's turn and
//! returns an `EnemyPlan`: which hand units to deploy and at most one
//! attack. The battle machine carries the plan out, so a policy can never
//! break the rules by itself.
//!
//! - `FrontLine`: leftmost enemy unit attacks the leftmost player unit
//! - `RandomTarget`: leftmost enemy unit attacks a seeded random player unit

use serde::{Deserialize, Serialize};

use crate::core::entity::UnitId;
use crate::core::player::Side;
use crate::core::rng::GameRng;
use crate::core::state::BattleSession;
use crate::zones::SideZones;

/// What the enemy will do this turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPlan {
    /// Hand units to summon, in order.
    pub deploy: Vec<UnitId>,
    /// `(attacker, target)` for the single attack, if any.
    pub attack: Option<(UnitId, UnitId)>,
}

/// Policy for the enemy's turn.
pub trait OpponentPolicy: Send + Sync {
    /// Plan the enemy's turn.
    fn plan(&self, session: &BattleSession) -> EnemyPlan;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Fill empty enemy slots from the hand, in hand order.
///
/// Returns the units to deploy and the enemy zones as they will look
/// afterwards.
#[must_use]
pub fn plan_deployment(session: &BattleSession) -> (Vec<UnitId>, SideZones) {
    let mut zones = session.side(Side::Enemy).clone();
    let mut deploy = Vec::new();

    while zones.first_empty_slot().is_some() {
        let Some(next) = zones.hand().front().map(|u| u.id) else {
            break;
        };
        zones.summon(next);
        deploy.push(next);
    }

    (deploy, zones)
}

/// Deterministic front-line policy.
///
/// The leftmost enemy field unit attacks the leftmost player field unit.
/// Unit strength is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontLine;

impl OpponentPolicy for FrontLine {
    fn plan(&self, session: &BattleSession) -> EnemyPlan {
        let (deploy, enemy) = plan_deployment(session);
        let attack = enemy
            .first_field_unit()
            .zip(session.side(Side::Player).first_field_unit())
            .map(|(attacker, target)| (attacker.id, target.id));

        EnemyPlan { deploy, attack }
    }

    fn name(&self) -> &'static str {
        "front_line"
    }
}

/// Seeded random targeting.
///
/// The leftmost enemy field unit attacks a player field unit picked by a
/// `GameRng` stream derived from the seed and the turn number, so a replay
/// makes the same choices.
#[derive(Clone, Copy, Debug)]
pub struct RandomTarget {
    seed: u64,
}

impl RandomTarget {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl OpponentPolicy for RandomTarget {
    fn plan(&self, session: &BattleSession) -> EnemyPlan {
        let (deploy, enemy) = plan_deployment(session);
        let targets: Vec<UnitId> = session
            .side(Side::Player)
            .field_units()
            .map(|(_, unit)| unit.id)
            .collect();

        let mut rng = GameRng::new(self.seed).for_turn(session.turn_number());
        let attack = enemy
            .first_field_unit()
            .map(|u| u.id)
            .zip(rng.choose(&targets).copied());

        EnemyPlan { deploy, attack }
    }

    fn name(&self) -> &'static str {
        "random_target"
    }
}
