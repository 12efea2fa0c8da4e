//! Battle driver: one battle from setup to report.
//!
//! `Battle` owns the machine, the current session and the presentation
//! queue. Each dispatched event either replaces the session or is rejected.
//! After every accepted event the observer gets a snapshot; when a result
//! is reached it gets exactly one `BattleReport`, guarded by the session's
//! reported flag.

use serde::{Deserialize, Serialize};

use super::click::Click;
use super::machine::BattleMachine;
use crate::ai::OpponentPolicy;
use crate::cards::{CardCatalog, CardId, LevelDefinition, LevelRef, UnitFactory, UpgradeLedger};
use crate::core::action::BattleEvent;
use crate::core::config::BattleConfig;
use crate::core::entity::UnitIdAllocator;
use crate::core::error::Rejection;
use crate::core::state::{BattleOutcome, BattleSession};
use crate::presentation::{PresentationEffect, PresentationQueue};
use crate::rules::RulesEngine;

/// Final result handed to the battle-complete observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub level: Option<LevelRef>,
    pub reward: u64,
}

/// Receives battle output.
pub trait BattleObserver {
    /// Called with the full session after every accepted event.
    fn on_snapshot(&mut self, _session: &BattleSession) {}

    /// Called once per battle when a result is reached.
    fn on_battle_complete(&mut self, report: &BattleReport);
}

/// Scoring hook for finished battles.
pub trait RewardPolicy: Send + Sync {
    fn reward(&self, outcome: BattleOutcome, level: Option<&LevelRef>) -> u64;
}

/// Fixed currency on victory, nothing on defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedReward(pub u64);

impl Default for FixedReward {
    fn default() -> Self {
        Self(100)
    }
}

impl RewardPolicy for FixedReward {
    fn reward(&self, outcome: BattleOutcome, _level: Option<&LevelRef>) -> u64 {
        match outcome {
            BattleOutcome::Victory => self.0,
            BattleOutcome::Defeat => 0,
        }
    }
}

/// Inputs needed to start a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSetup {
    pub deck: Vec<CardId>,
    pub ledger: UpgradeLedger,
    pub level: LevelDefinition,
}

impl BattleSetup {
    #[must_use]
    pub fn new(deck: Vec<CardId>, ledger: UpgradeLedger, level: LevelDefinition) -> Self {
        Self { deck, ledger, level }
    }

    /// Build both sides' units and the opening session.
    #[must_use]
    pub fn build(&self, catalog: &CardCatalog, config: &BattleConfig) -> BattleSession {
        let mut ids = UnitIdAllocator::new();
        let factory = UnitFactory::new(catalog, config);
        let player = factory.build_player_units(&mut ids, &self.deck, &self.ledger);
        let enemy = factory.build_enemy_units(&mut ids, &self.level);

        log::info!(
            "battle {} starts: {} player units against {} enemy units",
            self.level.reference(),
            player.len(),
            enemy.len()
        );
        BattleSession::start(config, ids, player, enemy)
    }
}

/// A running battle.
pub struct Battle {
    machine: BattleMachine,
    session: BattleSession,
    level: Option<LevelRef>,
    rewards: Box<dyn RewardPolicy>,
    presentation: PresentationQueue,
}

impl Battle {
    /// Wrap an existing session.
    #[must_use]
    pub fn new(machine: BattleMachine, session: BattleSession) -> Self {
        Self {
            machine,
            session,
            level: None,
            rewards: Box::new(FixedReward::default()),
            presentation: PresentationQueue::new(),
        }
    }

    /// Build a battle for a level from a deck and upgrade ledger.
    #[must_use]
    pub fn from_setup(
        catalog: &CardCatalog,
        config: BattleConfig,
        setup: &BattleSetup,
        opponent: impl OpponentPolicy + 'static,
    ) -> Self {
        let session = setup.build(catalog, &config);
        Self::new(BattleMachine::new(config, opponent), session).with_level(setup.level.reference())
    }

    #[must_use]
    pub fn with_level(mut self, level: LevelRef) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_reward_policy(mut self, rewards: impl RewardPolicy + 'static) -> Self {
        self.rewards = Box::new(rewards);
        self
    }

    #[must_use]
    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    #[must_use]
    pub fn machine(&self) -> &BattleMachine {
        &self.machine
    }

    #[must_use]
    pub fn level(&self) -> Option<&LevelRef> {
        self.level.as_ref()
    }

    /// Events the current session would accept.
    #[must_use]
    pub fn legal_events(&self) -> Vec<BattleEvent> {
        self.machine.legal_events(&self.session)
    }

    /// Send the opening snapshot, and the report if the battle is already
    /// decided (a player with no units loses before any event).
    pub fn begin(&mut self, observer: &mut dyn BattleObserver) {
        observer.on_snapshot(&self.session);
        self.report_if_finished(observer);
    }

    /// Apply one input event.
    pub fn dispatch(
        &mut self,
        event: BattleEvent,
        observer: &mut dyn BattleObserver,
    ) -> Result<(), Rejection> {
        let reduction = self.machine.reduce(&self.session, event)?;
        if event == BattleEvent::RequestReset {
            self.presentation.clear();
        }

        self.session = reduction.session;
        self.presentation.extend(reduction.effects);
        observer.on_snapshot(&self.session);
        self.report_if_finished(observer);
        Ok(())
    }

    /// Map a presentation click to its event and apply it.
    pub fn click(&mut self, click: Click, observer: &mut dyn BattleObserver) -> Result<(), Rejection> {
        let event = click.to_event(&self.session)?;
        self.dispatch(event, observer)
    }

    /// The report for a finished battle, whether or not it was sent yet.
    #[must_use]
    pub fn report(&self) -> Option<BattleReport> {
        let outcome = self.session.result()?;
        Some(BattleReport {
            outcome,
            level: self.level.clone(),
            reward: self.rewards.reward(outcome, self.level.as_ref()),
        })
    }

    #[must_use]
    pub fn presentation(&self) -> &PresentationQueue {
        &self.presentation
    }

    /// Take every pending presentation effect, oldest first.
    pub fn drain_presentation(&mut self) -> Vec<PresentationEffect> {
        self.presentation.drain()
    }

    fn report_if_finished(&mut self, observer: &mut dyn BattleObserver) {
        let Some(report) = self.report() else {
            return;
        };
        if self.session.mark_reported() {
            log::info!("reporting {} with reward {}", report.outcome, report.reward);
            observer.on_battle_complete(&report);
        }
    }
}
