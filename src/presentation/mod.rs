//! "Decide now, present later": effect descriptors for the renderer.

pub mod queue;

pub use queue::{PresentationEffect, PresentationQueue};
