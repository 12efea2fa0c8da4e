//! The battle state machine.
//!
//! `BattleMachine` is the one `RulesEngine` implementation. It is a pure
//! reducer: `reduce` clones the session (O(1) thanks to `im`), applies the
//! event to the clone and hands it back with the presentation effects the
//! step produced. A rejected event returns before anything is kept, so the
//! caller's session is never touched.
//!
//! ## Phases
//!
//! ```text
//! Placement ──(deploy target, full field or empty hand)──> SelectAttacker
//! SelectAttacker ──ChooseAttacker──> SelectTarget
//! SelectTarget ──ChooseTarget──> SelectTarget (target stored)
//! SelectTarget ──ConfirmAttack──> Resolving ──> EnemyTurn | Result
//! EnemyTurn ──(policy plays)──> Placement | SelectAttacker | Result
//! ```
//!
//! The first time placement ends, the enemy deploys once from its hand.
//! After that the enemy refills its field at the start of each of its
//! turns through its `OpponentPolicy`.

use crate::ai::{FrontLine, OpponentPolicy};
use crate::combat::resolver::resolve_in_place;
use crate::combat::ClashOutcome;
use crate::core::action::BattleEvent;
use crate::core::config::{BattleConfig, Zone};
use crate::core::entity::UnitId;
use crate::core::error::Rejection;
use crate::core::player::Side;
use crate::core::state::{BattleOutcome, BattleSession, Phase};
use crate::presentation::PresentationEffect;
use crate::rules::{EffectList, Reduction, RulesEngine};

/// Battle rules plus the policy that plays the enemy.
///
/// ## Example
///
/// ```
/// use ccg_battle::ai::FrontLine;
/// use ccg_battle::battle::BattleMachine;
/// use ccg_battle::cards::UnitInstance;
/// use ccg_battle::core::{BattleConfig, BattleEvent, BattleSession, Phase, Side, UnitIdAllocator};
/// use ccg_battle::rules::RulesEngine;
///
/// let config = BattleConfig::default().with_deploy_target(1);
/// let machine = BattleMachine::new(config.clone(), FrontLine);
///
/// let mut ids = UnitIdAllocator::new();
/// let wolf = UnitInstance::new(ids.alloc(), Side::Player, "Wolf", 3, 3);
/// let rat = UnitInstance::new(ids.alloc(), Side::Enemy, "Rat", 1, 1);
/// let wolf_id = wolf.id;
/// let session = BattleSession::start(&config, ids, vec![wolf], vec![rat]);
///
/// let next = machine.reduce(&session, BattleEvent::PlayCard(wolf_id)).unwrap().session;
/// assert_eq!(next.phase(), Phase::SelectAttacker);
/// assert_eq!(next.side(Side::Enemy).field_count(), 1);
/// ```
pub struct BattleMachine {
    config: BattleConfig,
    opponent: Box<dyn OpponentPolicy>,
}

impl BattleMachine {
    /// Create a machine with the given enemy policy.
    #[must_use]
    pub fn new(config: BattleConfig, opponent: impl OpponentPolicy + 'static) -> Self {
        Self {
            config,
            opponent: Box::new(opponent),
        }
    }

    /// The policy playing the enemy.
    #[must_use]
    pub fn opponent(&self) -> &dyn OpponentPolicy {
        self.opponent.as_ref()
    }

    fn apply(&self, session: &BattleSession, event: BattleEvent) -> Result<Reduction, Rejection> {
        if session.is_finished() && event != BattleEvent::RequestReset {
            return Err(Rejection::BattleOver);
        }

        let mut next = session.clone();
        let mut effects = EffectList::new();
        match event {
            BattleEvent::RequestReset => {
                log::info!("battle reset to its opening board");
                next = session.reset();
            }
            BattleEvent::PlayCard(unit) => self.play_card(&mut next, unit, &mut effects)?,
            BattleEvent::ChooseAttacker(unit) => choose_attacker(&mut next, unit)?,
            BattleEvent::ChooseTarget(unit) => choose_target(&mut next, unit)?,
            BattleEvent::ConfirmAttack => self.confirm_attack(&mut next, &mut effects)?,
            BattleEvent::EnemyTurnTick => {
                if next.turn() != Side::Enemy || next.phase() != Phase::EnemyTurn {
                    return Err(wrong_phase(&next, event));
                }
                next.record(Side::Enemy, event);
                self.run_enemy_turn(&mut next, &mut effects);
            }
        }

        Ok(Reduction {
            session: next,
            effects,
        })
    }

    // === Player Events ===

    fn play_card(
        &self,
        session: &mut BattleSession,
        unit: UnitId,
        effects: &mut EffectList,
    ) -> Result<(), Rejection> {
        expect_player_phase(session, BattleEvent::PlayCard(unit), &[Phase::Placement])?;
        expect_zone(session, unit, Side::Player, Zone::Hand)?;

        let slot = session
            .side_mut(Side::Player)
            .summon(unit)
            .ok_or(Rejection::FieldFull { side: Side::Player })?;
        session.record(Side::Player, BattleEvent::PlayCard(unit));
        effects.push(PresentationEffect::UnitSummoned {
            side: Side::Player,
            unit,
            slot,
        });

        if placement_done(&self.config, session) {
            self.end_placement(session, effects);
        }
        Ok(())
    }

    fn end_placement(&self, session: &mut BattleSession, effects: &mut EffectList) {
        session.set_phase(Phase::SelectAttacker);
        log::debug!("placement over");

        if !session.enemy_deployed() {
            let enemy = session.side_mut(Side::Enemy);
            let mut deployed = Vec::new();
            while enemy.field_count() < self.config.deploy_target {
                let Some(next) = enemy.hand().front().map(|u| u.id) else {
                    break;
                };
                match enemy.summon(next) {
                    Some(slot) => deployed.push((next, slot)),
                    None => break,
                }
            }
            session.mark_enemy_deployed();

            log::debug!("enemy deployed {} units", deployed.len());
            for (unit, slot) in deployed {
                session.record(Side::Enemy, BattleEvent::PlayCard(unit));
                effects.push(PresentationEffect::UnitSummoned {
                    side: Side::Enemy,
                    unit,
                    slot,
                });
            }
        }
    }

    fn confirm_attack(
        &self,
        session: &mut BattleSession,
        effects: &mut EffectList,
    ) -> Result<(), Rejection> {
        expect_player_phase(
            session,
            BattleEvent::ConfirmAttack,
            &[Phase::SelectAttacker, Phase::SelectTarget],
        )?;
        let (Some(attacker), Some(target)) = (session.selected_attacker(), session.selected_target())
        else {
            return Err(Rejection::NothingSelected);
        };

        session.set_phase(Phase::Resolving);
        let clash =
            resolve_in_place(session, attacker, target).ok_or(Rejection::NothingSelected)?;
        session.record(Side::Player, BattleEvent::ConfirmAttack);
        self.after_clash(session, clash, effects);
        Ok(())
    }

    // === Turn Flow ===

    /// Decide what follows a resolved clash.
    fn after_clash(&self, session: &mut BattleSession, clash: ClashOutcome, effects: &mut EffectList) {
        push_clash_effects(&self.config, clash, effects);
        session.clear_selection();

        let attacker_side = clash.attacker_side;
        let defender_side = attacker_side.opponent();

        if !session.side(defender_side).has_units() {
            finish(session, BattleOutcome::for_winner(attacker_side), effects);
        } else if !session.side(attacker_side).has_units() {
            finish(session, BattleOutcome::for_winner(defender_side), effects);
        } else if attacker_side == Side::Player {
            session.pass_turn(Side::Enemy);
            session.set_phase(Phase::EnemyTurn);
            effects.push(PresentationEffect::TurnPassed {
                side: Side::Enemy,
                turn_number: session.turn_number(),
            });
            if self.config.auto_enemy_turn {
                self.run_enemy_turn(session, effects);
            }
        } else {
            return_to_player(session, effects);
        }
    }

    /// Carry out the opponent policy's plan for this turn.
    fn run_enemy_turn(&self, session: &mut BattleSession, effects: &mut EffectList) {
        let plan = self.opponent.plan(session);
        log::debug!(
            "{} plans {} deployments, attack {:?}",
            self.opponent.name(),
            plan.deploy.len(),
            plan.attack
        );

        for unit in plan.deploy {
            if let Some(slot) = session.side_mut(Side::Enemy).summon(unit) {
                session.record(Side::Enemy, BattleEvent::PlayCard(unit));
                effects.push(PresentationEffect::UnitSummoned {
                    side: Side::Enemy,
                    unit,
                    slot,
                });
            }
        }

        let Some((attacker, target)) = plan.attack else {
            return_to_player(session, effects);
            return;
        };
        if !is_enemy_attack(session, attacker, target) {
            log::warn!("{} planned an illegal attack, skipping it", self.opponent.name());
            return_to_player(session, effects);
            return;
        }

        session.set_phase(Phase::Resolving);
        match resolve_in_place(session, attacker, target) {
            Some(clash) => {
                session.record(Side::Enemy, BattleEvent::ChooseAttacker(attacker));
                session.record(Side::Enemy, BattleEvent::ChooseTarget(target));
                session.record(Side::Enemy, BattleEvent::ConfirmAttack);
                self.after_clash(session, clash, effects);
            }
            None => return_to_player(session, effects),
        }
    }
}

impl RulesEngine for BattleMachine {
    fn config(&self) -> &BattleConfig {
        &self.config
    }

    fn legal_events(&self, session: &BattleSession) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if session.is_finished() {
            events.push(BattleEvent::RequestReset);
            return events;
        }

        let player = session.side(Side::Player);
        match (session.turn(), session.phase()) {
            (Side::Player, Phase::Placement) if player.first_empty_slot().is_some() => {
                events.extend(player.hand().iter().map(|u| BattleEvent::PlayCard(u.id)));
            }
            (Side::Player, Phase::SelectAttacker) => {
                events.extend(player.field_units().map(|(_, u)| BattleEvent::ChooseAttacker(u.id)));
            }
            (Side::Player, Phase::SelectTarget) => {
                events.extend(player.field_units().map(|(_, u)| BattleEvent::ChooseAttacker(u.id)));
                events.extend(
                    session
                        .side(Side::Enemy)
                        .field_units()
                        .map(|(_, u)| BattleEvent::ChooseTarget(u.id)),
                );
                if session.selected_target().is_some() {
                    events.push(BattleEvent::ConfirmAttack);
                }
            }
            (Side::Enemy, Phase::EnemyTurn) => events.push(BattleEvent::EnemyTurnTick),
            _ => {}
        }

        events.push(BattleEvent::RequestReset);
        events
    }

    fn reduce(&self, session: &BattleSession, event: BattleEvent) -> Result<Reduction, Rejection> {
        let result = self.apply(session, event);
        match &result {
            Ok(reduction) => log::debug!(
                "{} accepted, now {} on the {} turn",
                event.name(),
                reduction.session.phase(),
                reduction.session.turn()
            ),
            Err(rejection) => log::trace!("{} rejected: {}", event.name(), rejection),
        }
        result
    }
}

impl Default for BattleMachine {
    fn default() -> Self {
        Self::new(BattleConfig::default(), FrontLine)
    }
}

// === Selection ===

fn choose_attacker(session: &mut BattleSession, unit: UnitId) -> Result<(), Rejection> {
    expect_player_phase(
        session,
        BattleEvent::ChooseAttacker(unit),
        &[Phase::SelectAttacker, Phase::SelectTarget],
    )?;
    expect_zone(session, unit, Side::Player, Zone::Field)?;

    if session.selected_attacker() == Some(unit) {
        session.clear_selection();
        session.set_phase(Phase::SelectAttacker);
    } else {
        session.select_attacker(Some(unit));
        session.select_target(None);
        session.set_phase(Phase::SelectTarget);
    }
    session.record(Side::Player, BattleEvent::ChooseAttacker(unit));
    Ok(())
}

fn choose_target(session: &mut BattleSession, unit: UnitId) -> Result<(), Rejection> {
    expect_player_phase(session, BattleEvent::ChooseTarget(unit), &[Phase::SelectTarget])?;
    expect_zone(session, unit, Side::Enemy, Zone::Field)?;

    session.select_target(Some(unit));
    session.record(Side::Player, BattleEvent::ChooseTarget(unit));
    Ok(())
}

// === Helpers ===

fn wrong_phase(session: &BattleSession, event: BattleEvent) -> Rejection {
    Rejection::WrongPhase {
        event,
        phase: session.phase(),
    }
}

fn expect_player_phase(
    session: &BattleSession,
    event: BattleEvent,
    phases: &[Phase],
) -> Result<(), Rejection> {
    if session.turn() != Side::Player {
        return Err(Rejection::OutOfTurn {
            turn: session.turn(),
        });
    }
    if !phases.contains(&session.phase()) {
        return Err(wrong_phase(session, event));
    }
    Ok(())
}

fn expect_zone(session: &BattleSession, unit: UnitId, side: Side, zone: Zone) -> Result<(), Rejection> {
    match session.side(side).locate(unit) {
        Some(location) if location.zone == zone => Ok(()),
        _ => Err(Rejection::NotInZone { unit, side, zone }),
    }
}

/// Placement ends at the deploy target, or earlier once nothing more fits
/// or nothing is left to play.
fn placement_done(config: &BattleConfig, session: &BattleSession) -> bool {
    let player = session.side(Side::Player);
    player.field_count() >= config.deploy_target
        || player.first_empty_slot().is_none()
        || player.hand().is_empty()
}

fn is_enemy_attack(session: &BattleSession, attacker: UnitId, target: UnitId) -> bool {
    expect_zone(session, attacker, Side::Enemy, Zone::Field).is_ok()
        && expect_zone(session, target, Side::Player, Zone::Field).is_ok()
}

fn push_clash_effects(config: &BattleConfig, clash: ClashOutcome, effects: &mut EffectList) {
    effects.push(PresentationEffect::AttackResolved {
        clash,
        delay_ms: config.presentation_delay_ms,
    });
    if clash.defender_died {
        effects.push(PresentationEffect::UnitDied {
            side: clash.attacker_side.opponent(),
            unit: clash.defender,
        });
    }
    if clash.attacker_died {
        effects.push(PresentationEffect::UnitDied {
            side: clash.attacker_side,
            unit: clash.attacker,
        });
    }
}

/// Give the turn back to the player and pick the phase they land in.
fn return_to_player(session: &mut BattleSession, effects: &mut EffectList) {
    session.pass_turn(Side::Player);
    effects.push(PresentationEffect::TurnPassed {
        side: Side::Player,
        turn_number: session.turn_number(),
    });

    let player = session.side(Side::Player);
    if !player.has_units() {
        finish(session, BattleOutcome::Defeat, effects);
    } else if player.field_count() == 0 {
        session.set_phase(Phase::Placement);
    } else {
        session.set_phase(Phase::SelectAttacker);
    }
}

fn finish(session: &mut BattleSession, outcome: BattleOutcome, effects: &mut EffectList) {
    session.clear_selection();
    session.set_phase(Phase::Result(outcome));
    effects.push(PresentationEffect::BattleEnded { outcome });
    log::info!("battle over: {} after {} turns", outcome, session.turn_number());
}
