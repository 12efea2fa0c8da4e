//! Combat: resolving a single attack between two field units.

pub mod resolver;

pub use resolver::{resolve_attack, AttackResolution, ClashOutcome};
