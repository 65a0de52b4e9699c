//! Raw AST produced by the parser.
//!
//! No reference resolution is done here -- a transition may name a state
//! or intent that was never declared. Validation is a separate phase over
//! the interchange form (chatflow-analyze).

/// A parsed ChatFlow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowAst {
    /// The declared start state. Guaranteed present: a source without a
    /// `start_state` directive fails to parse.
    pub start_state: String,
    /// The declared intents list, `None` when the source never declared one.
    pub intents: Option<Vec<String>>,
    /// States in first-declaration order. Reopening a state merges into
    /// its existing entry, so ids are unique here.
    pub states: Vec<RawState>,
}

/// A single state definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawState {
    pub id: String,
    /// Response text emitted as a side-channel message during simulation.
    /// Not part of control flow. A later `respond` directive overwrites.
    pub respond: Option<String>,
    /// Outgoing transitions in declaration order. Append-only: a state may
    /// declare the same intent twice and the first match wins at runtime.
    pub transitions: Vec<RawTransition>,
}

/// An intent-labeled edge to a (possibly undeclared) target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransition {
    pub intent: String,
    pub to: String,
}
