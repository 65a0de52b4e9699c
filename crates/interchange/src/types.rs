//! Typed structs representing the ChatFlow IR JSON schema.
//!
//! These types are the shared read-only view consumed by chatflow-analyze
//! and chatflow-sim. A `FlowDoc` is never mutated after deserialization;
//! every downstream consumer takes `&FlowDoc`.

use serde::{Deserialize, Serialize};

/// An intent-labeled edge to a target state.
///
/// No uniqueness constraint: a state may carry two transitions for the
/// same intent, and the first one in declaration order wins at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    pub intent: String,
    pub to: String,
}

/// A state definition from the IR document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateDef {
    pub id: String,
    /// Response text emitted as a side-channel message during simulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respond: Option<String>,
    /// Outgoing transitions in declaration order.
    pub transitions: Vec<Transition>,
}

/// A deserialized IR document.
///
/// Deliberately permissive: `start_state` may be absent or dangle, and
/// transitions may target undeclared states. The semantic checker reports
/// those conditions; this layer only guarantees a well-typed shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_state: Option<String>,
    /// Declared intents, `None` when the document carries no declaration
    /// list at all (distinct from an explicitly empty list).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<String>>,
    /// States in document order.
    pub states: Vec<StateDef>,
}

impl FlowDoc {
    /// Look up a state definition by id.
    pub fn state(&self, id: &str) -> Option<&StateDef> {
        self.states.iter().find(|s| s.id == id)
    }
}
