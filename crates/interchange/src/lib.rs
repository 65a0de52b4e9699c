//! chatflow-interchange: shared IR JSON types and deserialization.
//!
//! The compiler (chatflow-core) writes IR documents; the checker
//! (chatflow-analyze) and the simulator (chatflow-sim) both read them
//! through this crate, so the permissive-then-validate boundary lives in
//! exactly one place.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_interchange, InterchangeError};
pub use types::{FlowDoc, StateDef, Transition};
