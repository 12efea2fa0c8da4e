//! Scripted tutorial over the shared battle machine.
//!
//! ## Key Types
//!
//! - `TutorialScript` / `TutorialStep`: The step list
//! - `ExpectedClick`: Which click a step waits for
//! - `TutorialEngine`: Gates input and advances steps
//! - `TutorialOutcome`: `{skipped}` reported when the tutorial ends

pub mod engine;
pub mod scenario;
pub mod script;

pub use engine::{TutorialEngine, TutorialInput, TutorialOutcome, TutorialProgress};
pub use scenario::tutorial_session;
pub use script::{ExpectedClick, StepAdvance, TutorialScript, TutorialStep};
