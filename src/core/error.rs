//! Error types.
//!
//! Nothing in a battle is fatal. An event the rules cannot accept comes
//! back as a `Rejection` and the session it was aimed at is left exactly
//! as it was; the caller may simply send a valid event next.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::BattleEvent;
use super::config::Zone;
use super::entity::UnitId;
use super::player::Side;
use super::state::Phase;
use crate::cards::CardId;

/// Why an input event was not applied.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// A result has been recorded; only a reset is accepted.
    #[error("the battle is already over")]
    BattleOver,

    /// The event belongs to the other side's turn.
    #[error("it is the {turn} side's turn")]
    OutOfTurn { turn: Side },

    /// The event is not accepted in the current phase.
    #[error("{event:?} is not accepted during {phase}")]
    WrongPhase { event: BattleEvent, phase: Phase },

    /// The referenced unit is not where the event expects it.
    #[error("{unit} is not in the {side} {zone}")]
    NotInZone { unit: UnitId, side: Side, zone: Zone },

    /// Every field slot is occupied.
    #[error("no empty field slot on the {side} side")]
    FieldFull { side: Side },

    /// Confirm was sent without both an attacker and a target selected.
    #[error("an attacker and a target must be selected first")]
    NothingSelected,

    /// A click landed where no event applies (empty slot, graveyard).
    #[error("nothing to do for a click on {side} {zone} slot {slot}")]
    NotClickable { side: Side, zone: Zone, slot: usize },
}

/// Why an upgrade purchase failed.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum UpgradeError {
    /// The card is not in the catalog.
    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),

    /// Another step would exceed the card's max level.
    #[error("{card} is already at max level {max_level}")]
    AtMaxLevel { card: CardId, max_level: u32 },

    /// Not enough currency for the next step.
    #[error("upgrade costs {need} but only {have} is available")]
    InsufficientFunds { have: u64, need: u64 },
}

/// Why a tutorial script was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("has no steps")]
    Empty,

    /// The tutorial could never be finished.
    #[error("must end with a finish step")]
    MissingFinish,
}

/// Failure to encode or decode a session snapshot.
#[derive(Debug, Error)]
#[error("snapshot codec failed: {0}")]
pub struct SnapshotError(#[from] pub bincode::Error);
