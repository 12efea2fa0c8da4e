//! Rules engine trait for battle implementations.
//!
//! `RulesEngine` is a reducer: a session and an input event go in, the next
//! session (or a rejection) comes out. The battle driver and the tutorial
//! both talk to the rules only through this trait's implementation.

pub mod engine;

pub use engine::{EffectList, Reduction, RulesEngine};
