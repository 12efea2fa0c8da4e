//! Attack resolution.
//!
//! One clash between an attacker and a defender on opposing fields:
//!
//! 1. Both units deal damage equal to their attack at the same time.
//! 2. Health is floored at 0.
//! 3. Each unit at 0 health leaves its slot and joins its side's graveyard.
//!
//! The resolver never changes phase or turn. That is the battle machine's
//! job once it has the `ClashOutcome`.

use serde::{Deserialize, Serialize};

use crate::core::config::Zone;
use crate::core::entity::UnitId;
use crate::core::player::Side;
use crate::core::state::BattleSession;

/// What happened in one clash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClashOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    /// Side of the attacker. The defender is on the other side.
    pub attacker_side: Side,
    /// Damage dealt by the defender to the attacker.
    pub attacker_damage: i64,
    /// Damage dealt by the attacker to the defender.
    pub defender_damage: i64,
    pub attacker_died: bool,
    pub defender_died: bool,
}

/// Session after an attack, plus the clash outcome if one happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub session: BattleSession,
    /// `None` when the attack was not legal and nothing changed.
    pub outcome: Option<ClashOutcome>,
}

/// Resolve an attack on a copy of the session.
///
/// If the attacker and defender are not both on the field on opposing
/// sides the session comes back unchanged with no outcome.
#[must_use]
pub fn resolve_attack(session: &BattleSession, attacker: UnitId, defender: UnitId) -> AttackResolution {
    let mut next = session.clone();
    let outcome = resolve_in_place(&mut next, attacker, defender);
    AttackResolution {
        session: next,
        outcome,
    }
}

/// Resolve an attack directly on `session`.
///
/// Leaves the session untouched and returns `None` if the clash is not
/// legal.
pub(crate) fn resolve_in_place(
    session: &mut BattleSession,
    attacker: UnitId,
    defender: UnitId,
) -> Option<ClashOutcome> {
    let (attacker_side, attacker_slot) = field_slot(session, attacker)?;
    let (defender_side, defender_slot) = field_slot(session, defender)?;
    if defender_side != attacker_side.opponent() {
        return None;
    }

    let a = session.side(attacker_side).unit_in_slot(attacker_slot)?.clone();
    let d = session.side(defender_side).unit_in_slot(defender_slot)?.clone();

    // Both results are computed from the pre-clash stats.
    let defender_health = (d.health - a.attack.max(0)).max(0);
    let attacker_health = (a.health - d.attack.max(0)).max(0);

    let outcome = ClashOutcome {
        attacker,
        defender,
        attacker_side,
        attacker_damage: a.health - attacker_health,
        defender_damage: d.health - defender_health,
        attacker_died: attacker_health == 0,
        defender_died: defender_health == 0,
    };

    apply(session, attacker_side, attacker_slot, attacker_health);
    apply(session, defender_side, defender_slot, defender_health);

    log::debug!(
        "{} ({}) hits {} for {}, takes {}{}{}",
        a.name,
        attacker,
        d.name,
        outcome.defender_damage,
        outcome.attacker_damage,
        if outcome.defender_died { ", defender dies" } else { "" },
        if outcome.attacker_died { ", attacker dies" } else { "" },
    );

    Some(outcome)
}

fn field_slot(session: &BattleSession, unit: UnitId) -> Option<(Side, usize)> {
    match session.locate(unit)? {
        (side, location) if location.zone == Zone::Field => Some((side, location.index)),
        _ => None,
    }
}

fn apply(session: &mut BattleSession, side: Side, slot: usize, health: i64) {
    let zones = session.side_mut(side);
    zones.set_health(slot, health);
    if health <= 0 {
        zones.bury(slot);
    }
}
