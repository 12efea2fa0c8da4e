//! Tutorial script engine.
//!
//! `TutorialEngine` runs a `TutorialScript` on top of the regular
//! `BattleMachine`. It never implements a rule itself: it only decides
//! whether an input reaches the machine, then looks at the resulting
//! session to decide whether the current step is done.
//!
//! - Clicks that do not match the step's expected click are swallowed.
//! - Summon steps watch the player's field count, not the click.
//! - The enemy never acts: the machine runs with `auto_enemy_turn` off.
//! - The tutorial ends only through `Finish` on the last step or `Skip`.

use serde::{Deserialize, Serialize};

use super::scenario::tutorial_session;
use super::script::{StepAdvance, TutorialScript, TutorialStep};
use crate::ai::FrontLine;
use crate::battle::{BattleMachine, Click};
use crate::core::action::BattleEvent;
use crate::core::config::BattleConfig;
use crate::core::player::Side;
use crate::core::state::BattleSession;
use crate::rules::RulesEngine;

/// Player input during the tutorial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialInput {
    Click(Click),
    /// Dismiss an informational step.
    Continue,
    /// Confirm the selected attack.
    Confirm,
    /// Close the final step.
    Finish,
    /// Leave the tutorial immediately.
    Skip,
}

/// How the tutorial was left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialOutcome {
    pub skipped: bool,
}

/// What an input did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TutorialProgress {
    /// Not expected now. Nothing changed.
    Ignored,
    /// Forwarded to the battle, but the step is not done yet.
    Applied,
    /// Moved on to the step with this index.
    Advanced(usize),
    /// The tutorial is over.
    Completed(TutorialOutcome),
}

/// Scripted battle over the shared battle machine.
pub struct TutorialEngine {
    machine: BattleMachine,
    session: BattleSession,
    script: TutorialScript,
    step: usize,
    outcome: Option<TutorialOutcome>,
}

impl Default for TutorialEngine {
    fn default() -> Self {
        Self::new(TutorialScript::standard())
    }
}

impl TutorialEngine {
    /// Run `script` on the standard tutorial board.
    #[must_use]
    pub fn new(script: TutorialScript) -> Self {
        let config = BattleConfig::default().with_auto_enemy_turn(false);
        let session = tutorial_session(&config);
        Self::with_session(script, BattleMachine::new(config, FrontLine), session)
    }

    /// Run `script` on a custom board and machine.
    #[must_use]
    pub fn with_session(script: TutorialScript, machine: BattleMachine, session: BattleSession) -> Self {
        Self {
            machine,
            session,
            script,
            step: 0,
            outcome: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&TutorialStep> {
        if self.outcome.is_some() {
            return None;
        }
        self.script.get(self.step)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<TutorialOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Feed one input to the tutorial.
    pub fn handle(&mut self, input: TutorialInput) -> TutorialProgress {
        let Some(step) = self.current_step().cloned() else {
            return TutorialProgress::Ignored;
        };

        match (input, step.advance) {
            (TutorialInput::Skip, _) => self.complete(true, step.advance),
            (TutorialInput::Finish, StepAdvance::Finish) => self.complete(false, step.advance),
            (TutorialInput::Continue, StepAdvance::Continue) => self.advance(),
            (TutorialInput::Confirm, StepAdvance::ClashResolved) => {
                if self.forward(BattleEvent::ConfirmAttack) {
                    self.advance()
                } else {
                    TutorialProgress::Ignored
                }
            }
            (TutorialInput::Click(click), advance) => {
                let expected = step.expected.is_some_and(|e| e.matches(&click));
                if !expected {
                    log::trace!("tutorial step {} swallowed {:?}", self.step, click);
                    return TutorialProgress::Ignored;
                }
                let Ok(event) = click.to_event(&self.session) else {
                    return TutorialProgress::Ignored;
                };
                if !self.forward(event) {
                    return TutorialProgress::Ignored;
                }
                if self.step_done(advance, event) {
                    self.advance()
                } else {
                    TutorialProgress::Applied
                }
            }
            _ => TutorialProgress::Ignored,
        }
    }

    /// Send an event to the battle machine. Returns whether it was accepted.
    fn forward(&mut self, event: BattleEvent) -> bool {
        match self.machine.reduce(&self.session, event) {
            Ok(reduction) => {
                self.session = reduction.session;
                true
            }
            Err(_) => false,
        }
    }

    fn step_done(&self, advance: StepAdvance, event: BattleEvent) -> bool {
        match advance {
            StepAdvance::FieldCount(count) => self.session.side(Side::Player).field_count() >= count,
            StepAdvance::AttackerChosen => {
                matches!(event, BattleEvent::ChooseAttacker(_)) && self.session.selected_attacker().is_some()
            }
            StepAdvance::TargetChosen => {
                matches!(event, BattleEvent::ChooseTarget(_)) && self.session.selected_target().is_some()
            }
            StepAdvance::Continue | StepAdvance::ClashResolved | StepAdvance::Finish => false,
        }
    }

    fn advance(&mut self) -> TutorialProgress {
        self.step = (self.step + 1).min(self.script.len() - 1);
        log::debug!("tutorial advanced to step {}", self.step);
        TutorialProgress::Advanced(self.step)
    }

    fn complete(&mut self, skipped: bool, at: StepAdvance) -> TutorialProgress {
        let outcome = TutorialOutcome { skipped };
        self.outcome = Some(outcome);
        log::info!("tutorial {} at step {} ({:?})", if skipped { "skipped" } else { "finished" }, self.step, at);
        TutorialProgress::Completed(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Zone;
    use crate::core::state::Phase;

    fn summon_all(engine: &mut TutorialEngine) {
        engine.handle(TutorialInput::Continue);
        for _ in 0..3 {
            engine.handle(TutorialInput::Click(Click::hand(Side::Player, 0)));
        }
    }

    #[test]
    fn test_intro_needs_continue() {
        let mut engine = TutorialEngine::default();

        let progress = engine.handle(TutorialInput::Click(Click::hand(Side::Player, 0)));
        assert_eq!(progress, TutorialProgress::Ignored);
        assert_eq!(engine.session().side(Side::Player).field_count(), 0);

        assert_eq!(engine.handle(TutorialInput::Continue), TutorialProgress::Advanced(1));
    }

    #[test]
    fn test_summon_steps_follow_field_count() {
        let mut engine = TutorialEngine::default();
        engine.handle(TutorialInput::Continue);

        assert_eq!(
            engine.handle(TutorialInput::Click(Click::hand(Side::Player, 0))),
            TutorialProgress::Advanced(2)
        );
        // A click on an empty hand position changes nothing.
        assert_eq!(
            engine.handle(TutorialInput::Click(Click::hand(Side::Player, 5))),
            TutorialProgress::Ignored
        );
        assert_eq!(engine.step_index(), 2);
    }

    #[test]
    fn test_wrong_zone_click_is_swallowed() {
        let mut engine = TutorialEngine::default();
        summon_all(&mut engine);
        assert_eq!(engine.step_index(), 4);

        let before = engine.session().clone();
        let progress = engine.handle(TutorialInput::Click(Click::field(Side::Player, 0)));

        assert_eq!(progress, TutorialProgress::Ignored);
        assert_eq!(engine.step_index(), 4);
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn test_full_walkthrough() {
        let mut engine = TutorialEngine::default();
        summon_all(&mut engine);
        assert_eq!(engine.session().phase(), Phase::SelectAttacker);

        let attack = Click::field(Side::Player, 2);
        assert_eq!(engine.handle(TutorialInput::Click(attack)), TutorialProgress::Advanced(5));
        let target = Click::new(Side::Enemy, Zone::Field, 0);
        assert_eq!(engine.handle(TutorialInput::Click(target)), TutorialProgress::Advanced(6));
        assert_eq!(engine.handle(TutorialInput::Confirm), TutorialProgress::Advanced(7));

        let session = engine.session();
        assert_eq!(session.side(Side::Enemy).graveyard().len(), 1);
        assert!(session.result().is_none());

        // The last step waits for an explicit finish.
        assert_eq!(engine.handle(TutorialInput::Continue), TutorialProgress::Ignored);
        assert_eq!(
            engine.handle(TutorialInput::Finish),
            TutorialProgress::Completed(TutorialOutcome { skipped: false })
        );
        assert!(engine.is_complete());
        assert_eq!(engine.handle(TutorialInput::Finish), TutorialProgress::Ignored);
    }

    #[test]
    fn test_skip_exits_immediately() {
        let mut engine = TutorialEngine::default();
        assert_eq!(
            engine.handle(TutorialInput::Skip),
            TutorialProgress::Completed(TutorialOutcome { skipped: true })
        );
        assert_eq!(engine.outcome(), Some(TutorialOutcome { skipped: true }));
        assert!(engine.current_step().is_none());
    }
}
