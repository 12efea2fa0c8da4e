//! Per-side zone storage and unit movement.
//!
//! `SideZones` owns every unit of one side, split across hand, field and
//! graveyard. All movement goes through methods that remove a unit from
//! one zone and insert it into another in the same call, so a unit is
//! never observed in two zones (or none) between events.
//!
//! The zones are `im::Vector`s. Cloning a `SideZones` is O(1), which is
//! what lets the battle reducer hand back a fresh session per event.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::UnitInstance;
use crate::core::config::Zone;
use crate::core::entity::UnitId;

/// Where a unit currently lives on its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneLocation {
    pub zone: Zone,
    /// Hand position, field slot, or graveyard position.
    pub index: usize,
}

/// Hand, field and graveyard of one side.
///
/// ## Usage
///
/// ```
/// use ccg_battle::cards::UnitInstance;
/// use ccg_battle::core::{Side, UnitId, Zone};
/// use ccg_battle::zones::SideZones;
///
/// let mut zones = SideZones::new(3);
/// zones.add_to_hand(UnitInstance::new(UnitId(1), Side::Player, "Ghoul", 2, 3));
///
/// assert_eq!(zones.summon(UnitId(1)), Some(0));
/// assert_eq!(zones.locate(UnitId(1)).map(|l| l.zone), Some(Zone::Field));
/// assert!(zones.hand().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideZones {
    hand: Vector<UnitInstance>,
    field: Vector<Option<UnitInstance>>,
    graveyard: Vector<UnitInstance>,
}

impl SideZones {
    /// Create empty zones with a fixed number of field slots.
    #[must_use]
    pub fn new(field_slots: usize) -> Self {
        Self {
            hand: Vector::new(),
            field: std::iter::repeat(None).take(field_slots).collect(),
            graveyard: Vector::new(),
        }
    }

    /// Create zones from a prepared hand and field.
    ///
    /// `field` may be shorter than `field_slots`; the rest stays empty.
    /// Panics if it is longer.
    #[must_use]
    pub fn from_parts(
        field_slots: usize,
        hand: impl IntoIterator<Item = UnitInstance>,
        field: impl IntoIterator<Item = Option<UnitInstance>>,
    ) -> Self {
        let mut zones = Self::new(field_slots);
        zones.hand = hand.into_iter().collect();
        for (slot, unit) in field.into_iter().enumerate() {
            assert!(slot < field_slots, "Field layout has more than {} slots", field_slots);
            zones.field.set(slot, unit);
        }
        zones
    }

    // === Zone Views ===

    /// Units waiting to be summoned.
    #[must_use]
    pub fn hand(&self) -> &Vector<UnitInstance> {
        &self.hand
    }

    /// Field slots, left to right.
    #[must_use]
    pub fn field(&self) -> &Vector<Option<UnitInstance>> {
        &self.field
    }

    /// Dead units in death order.
    #[must_use]
    pub fn graveyard(&self) -> &Vector<UnitInstance> {
        &self.graveyard
    }

    /// Number of field slots.
    #[must_use]
    pub fn field_slots(&self) -> usize {
        self.field.len()
    }

    /// Occupied field slots, left to right.
    pub fn field_units(&self) -> impl Iterator<Item = (usize, &UnitInstance)> {
        self.field
            .iter()
            .enumerate()
            .filter_map(|(slot, unit)| unit.as_ref().map(|u| (slot, u)))
    }

    /// Number of occupied field slots.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.field.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.field.iter().position(Option::is_none)
    }

    /// Leftmost unit on the field.
    #[must_use]
    pub fn first_field_unit(&self) -> Option<&UnitInstance> {
        self.field_units().next().map(|(_, unit)| unit)
    }

    /// Unit in a specific field slot.
    #[must_use]
    pub fn unit_in_slot(&self, slot: usize) -> Option<&UnitInstance> {
        self.field.get(slot).and_then(Option::as_ref)
    }

    /// True while the side has anything left to fight with.
    #[must_use]
    pub fn has_units(&self) -> bool {
        !self.hand.is_empty() || self.field_count() > 0
    }

    /// Hand, field and graveyard units together.
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.hand.len() + self.field_count() + self.graveyard.len()
    }

    // === Lookup ===

    /// Find which zone holds a unit.
    #[must_use]
    pub fn locate(&self, id: UnitId) -> Option<ZoneLocation> {
        if let Some(index) = self.hand.iter().position(|u| u.id == id) {
            return Some(ZoneLocation { zone: Zone::Hand, index });
        }
        if let Some(index) = self
            .field
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|u| u.id == id))
        {
            return Some(ZoneLocation { zone: Zone::Field, index });
        }
        self.graveyard
            .iter()
            .position(|u| u.id == id)
            .map(|index| ZoneLocation { zone: Zone::Graveyard, index })
    }

    /// Get a unit wherever it is.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitInstance> {
        let location = self.locate(id)?;
        match location.zone {
            Zone::Hand => self.hand.get(location.index),
            Zone::Field => self.unit_in_slot(location.index),
            Zone::Graveyard => self.graveyard.get(location.index),
        }
    }

    // === Movement ===

    /// Add a unit to the hand.
    pub fn add_to_hand(&mut self, unit: UnitInstance) {
        self.hand.push_back(unit);
    }

    /// Move a hand unit into the first empty field slot.
    ///
    /// Returns the slot, or `None` (nothing changed) if the unit is not in
    /// hand or the field is full.
    pub fn summon(&mut self, id: UnitId) -> Option<usize> {
        let slot = self.first_empty_slot()?;
        let index = self.hand.iter().position(|u| u.id == id)?;
        let unit = self.hand.remove(index);
        self.field.set(slot, Some(unit));
        Some(slot)
    }

    /// Overwrite the health of the unit in a field slot.
    pub fn set_health(&mut self, slot: usize, health: i64) {
        if let Some(Some(unit)) = self.field.get_mut(slot) {
            unit.health = health;
        }
    }

    /// Move the unit in a field slot to the graveyard.
    ///
    /// Returns the buried unit's id, or `None` if the slot was empty.
    pub fn bury(&mut self, slot: usize) -> Option<UnitId> {
        let unit = self.field.get_mut(slot)?.take()?;
        let id = unit.id;
        self.graveyard.push_back(unit);
        Some(id)
    }
}
