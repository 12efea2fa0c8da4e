//! Zone system for unit locations.
//!
//! Every side owns three zones: a hand, a fixed-size field and a graveyard.
//!
//! ## Key Types
//!
//! - `Zone`: Zone kind (from `core::config`)
//! - `SideZones`: One side's zones and the moves between them
//! - `ZoneLocation`: Result of a unit lookup

pub mod manager;

pub use manager::{SideZones, ZoneLocation};

pub use crate::core::config::Zone;
