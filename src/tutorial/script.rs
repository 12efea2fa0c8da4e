//! Tutorial script data.
//!
//! A script is an ordered list of steps. Each step names the click it is
//! waiting for (if any) and the condition that moves the tutorial on.

use serde::{Deserialize, Serialize};

use crate::battle::Click;
use crate::core::config::Zone;
use crate::core::error::ScriptError;
use crate::core::player::Side;

/// Click a step is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedClick {
    pub owner: Side,
    pub zone: Zone,
    /// Exact slot, or any slot of the zone when `None`.
    pub slot: Option<usize>,
}

impl ExpectedClick {
    #[must_use]
    pub fn any(owner: Side, zone: Zone) -> Self {
        Self { owner, zone, slot: None }
    }

    #[must_use]
    pub fn exact(owner: Side, zone: Zone, slot: usize) -> Self {
        Self {
            owner,
            zone,
            slot: Some(slot),
        }
    }

    #[must_use]
    pub fn matches(&self, click: &Click) -> bool {
        self.owner == click.owner
            && self.zone == click.zone
            && self.slot.map_or(true, |slot| slot == click.slot)
    }
}

/// What moves a step on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAdvance {
    /// An explicit continue signal.
    Continue,
    /// The player's field holds at least this many units.
    FieldCount(usize),
    /// An attacker selection was accepted.
    AttackerChosen,
    /// A target selection was accepted.
    TargetChosen,
    /// A confirmed attack was resolved.
    ClashResolved,
    /// The finish signal. Ends the tutorial.
    Finish,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialStep {
    /// Instruction shown to the player.
    pub text: String,
    pub expected: Option<ExpectedClick>,
    pub advance: StepAdvance,
}

impl TutorialStep {
    #[must_use]
    pub fn new(text: impl Into<String>, expected: Option<ExpectedClick>, advance: StepAdvance) -> Self {
        Self {
            text: text.into(),
            expected,
            advance,
        }
    }
}

/// Ordered tutorial steps.
///
/// Loaded scripts go through the same check as `try_new`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScriptSteps")]
pub struct TutorialScript {
    steps: Vec<TutorialStep>,
}

/// Unchecked wire form of `TutorialScript`.
#[derive(Deserialize)]
struct ScriptSteps {
    steps: Vec<TutorialStep>,
}

impl TryFrom<ScriptSteps> for TutorialScript {
    type Error = ScriptError;

    fn try_from(raw: ScriptSteps) -> Result<Self, Self::Error> {
        Self::try_new(raw.steps)
    }
}

impl TutorialScript {
    /// Create a script. Panics if it is empty or does not end on a finish step.
    #[must_use]
    pub fn new(steps: Vec<TutorialStep>) -> Self {
        match Self::try_new(steps) {
            Ok(script) => script,
            Err(err) => panic!("Tutorial script {err}"),
        }
    }

    /// Create a script, rejecting one that is empty or does not end on a
    /// finish step.
    pub fn try_new(steps: Vec<TutorialStep>) -> Result<Self, ScriptError> {
        match steps.last().map(|s| s.advance) {
            None => Err(ScriptError::Empty),
            Some(StepAdvance::Finish) => Ok(Self { steps }),
            Some(_) => Err(ScriptError::MissingFinish),
        }
    }

    /// The scripted first battle: summon three units, attack once, finish.
    ///
    /// Summons are pinned to the front of the hand so the squire, archer
    /// and knight land in field slots 0, 1 and 2.
    #[must_use]
    pub fn standard() -> Self {
        let front = ExpectedClick::exact(Side::Player, Zone::Hand, 0);
        Self::new(vec![
            TutorialStep::new(
                "Welcome, commander. Win battles by destroying every enemy creature.",
                None,
                StepAdvance::Continue,
            ),
            TutorialStep::new(
                "Summon your squire, the first card in your hand.",
                Some(front),
                StepAdvance::FieldCount(1),
            ),
            TutorialStep::new("Now summon the archer.", Some(front), StepAdvance::FieldCount(2)),
            TutorialStep::new("Fill your last slot with the knight.", Some(front), StepAdvance::FieldCount(3)),
            TutorialStep::new(
                "Your knight hits hardest. Choose it as the attacker.",
                Some(ExpectedClick::exact(Side::Player, Zone::Field, 2)),
                StepAdvance::AttackerChosen,
            ),
            TutorialStep::new(
                "Target the goblin on the left.",
                Some(ExpectedClick::exact(Side::Enemy, Zone::Field, 0)),
                StepAdvance::TargetChosen,
            ),
            TutorialStep::new("Confirm the attack.", None, StepAdvance::ClashResolved),
            TutorialStep::new(
                "Both creatures strike at once. The goblin falls. You are ready.",
                None,
                StepAdvance::Finish,
            ),
        ])
    }

    #[must_use]
    pub fn steps(&self) -> &[TutorialStep] {
        &self.steps
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TutorialStep> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_click_matching() {
        let any_hand = ExpectedClick::any(Side::Player, Zone::Hand);
        assert!(any_hand.matches(&Click::hand(Side::Player, 2)));
        assert!(!any_hand.matches(&Click::field(Side::Player, 2)));
        assert!(!any_hand.matches(&Click::hand(Side::Enemy, 0)));

        let slot = ExpectedClick::exact(Side::Enemy, Zone::Field, 0);
        assert!(slot.matches(&Click::field(Side::Enemy, 0)));
        assert!(!slot.matches(&Click::field(Side::Enemy, 1)));
    }

    #[test]
    fn test_standard_script_shape() {
        let script = TutorialScript::standard();
        assert_eq!(script.len(), 8);
        assert_eq!(script.get(0).map(|s| s.advance), Some(StepAdvance::Continue));
        assert_eq!(script.get(3).map(|s| s.advance), Some(StepAdvance::FieldCount(3)));
        assert_eq!(script.steps().last().map(|s| s.advance), Some(StepAdvance::Finish));
    }

    #[test]
    #[should_panic(expected = "finish step")]
    fn test_script_must_finish() {
        let _ = TutorialScript::new(vec![TutorialStep::new("Hi", None, StepAdvance::Continue)]);
    }

    #[test]
    fn test_loaded_script_is_checked() {
        let open_ended = r#"{"steps": [{"text": "Hi", "expected": null, "advance": "Continue"}]}"#;
        let err = serde_json::from_str::<TutorialScript>(open_ended).unwrap_err();
        assert!(err.to_string().contains("finish step"), "{err}");

        let empty = serde_json::from_str::<TutorialScript>(r#"{"steps": []}"#).unwrap_err();
        assert!(empty.to_string().contains("no steps"), "{empty}");

        let json = serde_json::to_string(&TutorialScript::standard()).unwrap();
        let loaded: TutorialScript = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, TutorialScript::standard());
    }
}
