//! Decision policy
//!
//! Finite rule evaluator: one perception snapshot in, exactly one intent out.
//! The only state is the per-agent capture latch held in `Brain`.

pub mod brain;

#[cfg(test)]
mod brain_tests;

pub use brain::{apply_grab_override, Brain, Decision, Intent, Perception};
