//! Battle session state.
//!
//! ## Phase
//!
//! Where the battle stands: placement, attacker/target selection, the
//! enemy's turn, or the terminal result.
//!
//! ## BattleSession
//!
//! The complete state of one battle:
//! - Zones for both sides
//! - Turn owner, phase, selected attacker and target
//! - Whether the enemy has made its one-time deployment
//! - The reported flag for the battle-complete notification
//! - The session's own unit id allocator and event history
//! - The opening board, kept so a reset can start over
//!
//! Only the battle machine and the combat resolver mutate a session; every
//! other caller sees the read-only accessors. Zones and history use `im`
//! persistent structures, so cloning a session is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{BattleEvent, EventRecord};
use super::config::BattleConfig;
use super::entity::{UnitId, UnitIdAllocator};
use super::error::SnapshotError;
use super::player::{Side, SideMap};
use crate::cards::UnitInstance;
use crate::zones::{SideZones, ZoneLocation};

/// Terminal battle result, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    /// Outcome for the player when `winner` is left standing.
    #[must_use]
    pub fn for_winner(winner: Side) -> Self {
        match winner {
            Side::Player => BattleOutcome::Victory,
            Side::Enemy => BattleOutcome::Defeat,
        }
    }
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleOutcome::Victory => write!(f, "victory"),
            BattleOutcome::Defeat => write!(f, "defeat"),
        }
    }
}

/// Battle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Summoning units from hand to field.
    Placement,
    /// Waiting for an attacker.
    SelectAttacker,
    /// Attacker chosen, waiting for a target and a confirm.
    SelectTarget,
    /// Combat in progress. Only seen inside a confirm.
    Resolving,
    /// The enemy is acting.
    EnemyTurn,
    /// Terminal. Zones no longer change.
    Result(BattleOutcome),
}

impl Phase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Result(_))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Placement => write!(f, "placement"),
            Phase::SelectAttacker => write!(f, "attacker selection"),
            Phase::SelectTarget => write!(f, "target selection"),
            Phase::Resolving => write!(f, "resolution"),
            Phase::EnemyTurn => write!(f, "the enemy turn"),
            Phase::Result(outcome) => write!(f, "the {} screen", outcome),
        }
    }
}

/// Hand-authored starting board.
///
/// Used by scripted battles (the tutorial) and by tests that need a
/// specific position. Units keep the ids they were built with; `ids` must
/// be the allocator those ids came from.
#[derive(Clone, Debug, Default)]
pub struct BoardLayout {
    pub player_hand: Vec<UnitInstance>,
    pub player_field: Vec<Option<UnitInstance>>,
    pub enemy_hand: Vec<UnitInstance>,
    pub enemy_field: Vec<Option<UnitInstance>>,
    /// Skip the enemy's one-time auto-deployment.
    pub enemy_deployed: bool,
}

/// Everything a reset needs to rebuild the opening position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Opening {
    sides: SideMap<SideZones>,
    phase: Phase,
    enemy_deployed: bool,
    ids: UnitIdAllocator,
}

/// Complete state of one battle.
///
/// ## Example
///
/// ```
/// use ccg_battle::cards::UnitInstance;
/// use ccg_battle::core::{BattleConfig, BattleSession, Phase, Side, UnitIdAllocator};
///
/// let mut ids = UnitIdAllocator::new();
/// let player = vec![UnitInstance::new(ids.alloc(), Side::Player, "Ghoul", 2, 3)];
/// let enemy = vec![UnitInstance::new(ids.alloc(), Side::Enemy, "Rat", 1, 1)];
///
/// let session = BattleSession::start(&BattleConfig::default(), ids, player, enemy);
/// assert_eq!(session.phase(), Phase::Placement);
/// assert_eq!(session.turn(), Side::Player);
/// assert_eq!(session.side(Side::Player).hand().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSession {
    sides: SideMap<SideZones>,
    turn: Side,
    phase: Phase,
    selected_attacker: Option<UnitId>,
    selected_target: Option<UnitId>,
    enemy_deployed: bool,
    reported: bool,
    turn_number: u32,
    ids: UnitIdAllocator,
    history: Vector<EventRecord>,
    opening: Opening,
}

impl BattleSession {
    /// Start a battle with both sides' units in hand and empty fields.
    #[must_use]
    pub fn start(
        config: &BattleConfig,
        ids: UnitIdAllocator,
        player_units: Vec<UnitInstance>,
        enemy_units: Vec<UnitInstance>,
    ) -> Self {
        let layout = BoardLayout {
            player_hand: player_units,
            enemy_hand: enemy_units,
            ..BoardLayout::default()
        };
        Self::from_board(config, ids, layout)
    }

    /// Start a battle from a prepared board.
    ///
    /// Panics if either field layout is wider than `config.field_slots`.
    #[must_use]
    pub fn from_board(config: &BattleConfig, ids: UnitIdAllocator, layout: BoardLayout) -> Self {
        let sides = SideMap::new(|side| match side {
            Side::Player => SideZones::from_parts(
                config.field_slots,
                layout.player_hand.iter().cloned(),
                layout.player_field.iter().cloned(),
            ),
            Side::Enemy => SideZones::from_parts(
                config.field_slots,
                layout.enemy_hand.iter().cloned(),
                layout.enemy_field.iter().cloned(),
            ),
        });
        let phase = opening_phase(config, &sides);

        let opening = Opening {
            sides: sides.clone(),
            phase,
            enemy_deployed: layout.enemy_deployed,
            ids: ids.clone(),
        };
        Self::from_opening(opening)
    }

    fn from_opening(opening: Opening) -> Self {
        Self {
            sides: opening.sides.clone(),
            turn: Side::Player,
            phase: opening.phase,
            selected_attacker: None,
            selected_target: None,
            enemy_deployed: opening.enemy_deployed,
            reported: false,
            turn_number: 1,
            ids: opening.ids.clone(),
            history: Vector::new(),
            opening,
        }
    }

    /// A fresh session with the same opening board.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::from_opening(self.opening.clone())
    }

    // === Views ===

    /// Zones of one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideZones {
        &self.sides[side]
    }

    /// Zones of both sides.
    #[must_use]
    pub fn sides(&self) -> &SideMap<SideZones> {
        &self.sides
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn selected_attacker(&self) -> Option<UnitId> {
        self.selected_attacker
    }

    #[must_use]
    pub fn selected_target(&self) -> Option<UnitId> {
        self.selected_target
    }

    /// Terminal result, if the battle is over.
    #[must_use]
    pub fn result(&self) -> Option<BattleOutcome> {
        match self.phase {
            Phase::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether the enemy has made its one-time deployment.
    #[must_use]
    pub fn enemy_deployed(&self) -> bool {
        self.enemy_deployed
    }

    /// Whether the result has been reported to the battle-complete observer.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Turn counter, starting at 1. Each handoff between sides adds one.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Accepted events in order.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Number of unit ids this battle has handed out.
    #[must_use]
    pub fn units_allocated(&self) -> u32 {
        self.ids.allocated()
    }

    /// Find a unit on either side.
    #[must_use]
    pub fn locate(&self, id: UnitId) -> Option<(Side, ZoneLocation)> {
        self.sides
            .iter()
            .find_map(|(side, zones)| zones.locate(id).map(|location| (side, location)))
    }

    /// Get a unit on either side.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitInstance> {
        self.sides.iter().find_map(|(_, zones)| zones.get(id))
    }

    // === Mutation (battle machine and combat resolver only) ===

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut SideZones {
        &mut self.sides[side]
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Hand the turn to `side`, clearing any selection.
    pub(crate) fn pass_turn(&mut self, side: Side) {
        if self.turn != side {
            self.turn = side;
            self.turn_number += 1;
        }
        self.clear_selection();
    }

    pub(crate) fn select_attacker(&mut self, attacker: Option<UnitId>) {
        self.selected_attacker = attacker;
    }

    pub(crate) fn select_target(&mut self, target: Option<UnitId>) {
        self.selected_target = target;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected_attacker = None;
        self.selected_target = None;
    }

    pub(crate) fn mark_enemy_deployed(&mut self) {
        self.enemy_deployed = true;
    }

    /// Set the reported flag. Returns true only the first time.
    pub(crate) fn mark_reported(&mut self) -> bool {
        !std::mem::replace(&mut self.reported, true)
    }

    pub(crate) fn record(&mut self, side: Side, event: BattleEvent) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(EventRecord::new(side, event, self.turn_number, sequence));
    }

    // === Snapshots ===

    /// Encode the session as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Phase a freshly built board opens in.
fn opening_phase(config: &BattleConfig, sides: &SideMap<SideZones>) -> Phase {
    let player = &sides[Side::Player];
    if !player.has_units() {
        return Phase::Result(BattleOutcome::Defeat);
    }
    if !sides[Side::Enemy].has_units() {
        return Phase::Result(BattleOutcome::Victory);
    }
    if player.field_count() < config.deploy_target
        && player.first_empty_slot().is_some()
        && !player.hand().is_empty()
    {
        Phase::Placement
    } else {
        Phase::SelectAttacker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(ids: &mut UnitIdAllocator, side: Side, count: usize) -> Vec<UnitInstance> {
        (0..count)
            .map(|i| UnitInstance::new(ids.alloc(), side, format!("{} {}", side, i), 2, 3))
            .collect()
    }

    fn fresh_session() -> BattleSession {
        let mut ids = UnitIdAllocator::new();
        let player = units(&mut ids, Side::Player, 3);
        let enemy = units(&mut ids, Side::Enemy, 3);
        BattleSession::start(&BattleConfig::default(), ids, player, enemy)
    }

    #[test]
    fn test_start_opens_in_placement() {
        let session = fresh_session();

        assert_eq!(session.phase(), Phase::Placement);
        assert_eq!(session.turn(), Side::Player);
        assert_eq!(session.turn_number(), 1);
        assert_eq!(session.side(Side::Player).hand().len(), 3);
        assert_eq!(session.side(Side::Enemy).field_count(), 0);
        assert!(!session.enemy_deployed());
        assert!(session.result().is_none());
        assert_eq!(session.units_allocated(), 6);
    }

    #[test]
    fn test_start_without_player_units_is_defeat() {
        let mut ids = UnitIdAllocator::new();
        let enemy = units(&mut ids, Side::Enemy, 2);
        let session = BattleSession::start(&BattleConfig::default(), ids, Vec::new(), enemy);

        assert_eq!(session.result(), Some(BattleOutcome::Defeat));
        assert!(session.is_finished());
    }

    #[test]
    fn test_full_board_opens_in_attacker_selection() {
        let mut ids = UnitIdAllocator::new();
        let player = units(&mut ids, Side::Player, 3);
        let enemy = units(&mut ids, Side::Enemy, 3);
        let layout = BoardLayout {
            player_field: player.into_iter().map(Some).collect(),
            enemy_field: enemy.into_iter().map(Some).collect(),
            enemy_deployed: true,
            ..BoardLayout::default()
        };

        let session = BattleSession::from_board(&BattleConfig::default(), ids, layout);
        assert_eq!(session.phase(), Phase::SelectAttacker);
        assert!(session.enemy_deployed());
    }

    #[test]
    fn test_locate_and_unit() {
        let session = fresh_session();
        let (side, location) = session.locate(UnitId(5)).unwrap();

        assert_eq!(side, Side::Enemy);
        assert_eq!(location.index, 1);
        assert_eq!(session.unit(UnitId(5)).map(|u| u.owner), Some(Side::Enemy));
        assert!(session.locate(UnitId(99)).is_none());
    }

    #[test]
    fn test_pass_turn_counts_handoffs() {
        let mut session = fresh_session();
        session.select_attacker(Some(UnitId(1)));

        session.pass_turn(Side::Enemy);
        assert_eq!(session.turn(), Side::Enemy);
        assert_eq!(session.turn_number(), 2);
        assert!(session.selected_attacker().is_none());

        session.pass_turn(Side::Enemy);
        assert_eq!(session.turn_number(), 2);
    }

    #[test]
    fn test_mark_reported_once() {
        let mut session = fresh_session();
        assert!(session.mark_reported());
        assert!(!session.mark_reported());
        assert!(session.is_reported());
    }

    #[test]
    fn test_reset_restores_opening() {
        let mut session = fresh_session();
        let opening = session.clone();

        session.side_mut(Side::Player).summon(UnitId(1));
        session.record(Side::Player, BattleEvent::PlayCard(UnitId(1)));
        session.mark_reported();

        assert_eq!(session.reset(), opening);
    }

    #[test]
    fn test_history_sequence() {
        let mut session = fresh_session();
        session.record(Side::Player, BattleEvent::PlayCard(UnitId(1)));
        session.record(Side::Player, BattleEvent::PlayCard(UnitId(2)));

        let last = session.history().back().unwrap();
        assert_eq!(last.sequence, 1);
        assert_eq!(last.turn, 1);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Placement.to_string(), "placement");
        assert_eq!(Phase::Result(BattleOutcome::Victory).to_string(), "the victory screen");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = fresh_session();
        session.side_mut(Side::Player).summon(UnitId(2));
        session.select_attacker(Some(UnitId(2)));

        let bytes = session.to_bytes().unwrap();
        let decoded = BattleSession::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(BattleSession::from_bytes(&[0xFF, 0x01]).is_err());
    }
}
