//! chatflow-sim: deterministic replay of an IR document against an
//! ordered intent sequence.
//!
//! The engine consumes the shared interchange types, never mutates the
//! document, and produces either a complete trace or a trace truncated
//! at the first unmatched intent. The per-step matcher [`first_match`]
//! is also the building block of the CLI's interactive driver.

pub mod engine;
pub mod trace;

pub use engine::{first_match, simulate, SimError, SimFailure, SimRun};
pub use trace::Step;
