//! Execution trace types.
//!
//! A trace is an ordered list of steps. Serialization matches the IR
//! tooling's trace entry shapes: a respond step is
//! `{ "state": ..., "respond": ... }` and a transition step is
//! `{ "state": ..., "intent": ..., "to": ... }`.

use serde::Serialize;

/// One step of a simulation run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Step {
    /// The current state emitted its response text. Side-channel only;
    /// not part of control flow.
    Respond { state: String, respond: String },
    /// An intent matched a transition and the walk advanced.
    Transition {
        state: String,
        intent: String,
        to: String,
    },
}

impl Step {
    pub fn respond(state: &str, text: &str) -> Self {
        Step::Respond {
            state: state.to_owned(),
            respond: text.to_owned(),
        }
    }

    pub fn transition(state: &str, intent: &str, to: &str) -> Self {
        Step::Transition {
            state: state.to_owned(),
            intent: intent.to_owned(),
            to: to.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respond_step_shape() {
        let v = serde_json::to_value(Step::respond("A", "hi")).unwrap();
        assert_eq!(v, serde_json::json!({ "state": "A", "respond": "hi" }));
    }

    #[test]
    fn transition_step_shape() {
        let v = serde_json::to_value(Step::transition("A", "x", "B")).unwrap();
        assert_eq!(
            v,
            serde_json::json!({ "state": "A", "intent": "x", "to": "B" })
        );
    }
}
