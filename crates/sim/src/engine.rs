//! Deterministic simulation engine.
//!
//! Walks the transition graph one intent per iteration, so termination
//! is bounded by the input sequence length and cyclic flows are legal.
//! The engine never mutates the document; repeated runs over the same
//! inputs produce identical traces.
//!
//! Intent matching is exact and case-sensitive. Any case folding (the
//! interactive driver lower-cases user input) happens before identifiers
//! reach this crate.

use crate::trace::Step;
use chatflow_interchange::{FlowDoc, StateDef, Transition};
use serde::Serialize;
use std::fmt;

/// Precondition failure: the engine refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The document has no start state at all. An undeclared-but-present
    /// start state is not a precondition failure; the walk simply fails
    /// on its first intent.
    #[error("missing start state")]
    MissingStartState,
}

/// A run that stopped at an unmatched intent. Carried alongside the
/// partial trace, not thrown -- progress already made is kept.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SimFailure {
    pub state: String,
    pub intent: String,
}

impl fmt::Display for SimFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no transition for intent '{}' from state '{}'",
            self.intent, self.state
        )
    }
}

/// The outcome of a simulation: the full trace plus an optional failure
/// describing why the walk stopped early.
#[derive(Debug, Clone, Serialize)]
pub struct SimRun {
    pub trace: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<SimFailure>,
}

impl SimRun {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// First transition in declaration order matching `intent`, if any.
///
/// This is the single step function shared by batch simulation and the
/// interactive driver. Duplicate intents are legal; first match wins.
pub fn first_match<'a>(state: &'a StateDef, intent: &str) -> Option<&'a Transition> {
    state.transitions.iter().find(|t| t.intent == intent)
}

/// Replay an intent sequence against a document.
///
/// A state the walk lands on that was never declared (dangling start or
/// dangling transition target) behaves as an empty state: no response,
/// no transitions, so the next intent fails the walk.
pub fn simulate(doc: &FlowDoc, intents: &[String]) -> Result<SimRun, SimError> {
    let mut current = doc
        .start_state
        .clone()
        .ok_or(SimError::MissingStartState)?;

    let mut trace = Vec::new();

    for intent in intents {
        let state = doc.state(&current);

        if let Some(text) = state.and_then(|s| s.respond.as_deref()) {
            trace.push(Step::respond(&current, text));
        }

        let matched = state.and_then(|s| first_match(s, intent));
        match matched {
            Some(t) => {
                trace.push(Step::transition(&current, intent, &t.to));
                current = t.to.clone();
            }
            None => {
                return Ok(SimRun {
                    trace,
                    failure: Some(SimFailure {
                        state: current,
                        intent: intent.clone(),
                    }),
                });
            }
        }
    }

    // Trailing response of the final state, if any.
    if let Some(text) = doc.state(&current).and_then(|s| s.respond.as_deref()) {
        trace.push(Step::respond(&current, text));
    }

    Ok(SimRun {
        trace,
        failure: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatflow_interchange::from_interchange;
    use serde_json::json;

    /// The menu flow used across the engine tests.
    fn menu_doc() -> FlowDoc {
        from_interchange(&json!({
            "start_state": "Inicio",
            "intents": ["greet", "help", "bye"],
            "states": {
                "Inicio": { "on": [ { "intent": "greet", "to": "Menu" } ] },
                "Menu": {
                    "respond": "How can I help?",
                    "on": [
                        { "intent": "help", "to": "Menu" },
                        { "intent": "bye", "to": "Fim" }
                    ]
                },
                "Fim": { "respond": "Bye!" }
            }
        }))
        .unwrap()
    }

    fn intents(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_sequence_reaches_end() {
        let run = simulate(&menu_doc(), &intents(&["greet", "help", "bye"])).unwrap();
        assert!(run.succeeded());
        let transitions: Vec<(&str, &str)> = run
            .trace
            .iter()
            .filter_map(|s| match s {
                Step::Transition { state, to, .. } => Some((state.as_str(), to.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            transitions,
            [("Inicio", "Menu"), ("Menu", "Menu"), ("Menu", "Fim")]
        );
        // Trailing respond of the final state.
        assert_eq!(
            run.trace.last(),
            Some(&Step::respond("Fim", "Bye!"))
        );
    }

    #[test]
    fn unmatched_intent_stops_with_partial_trace() {
        let run = simulate(&menu_doc(), &intents(&["greet", "nope"])).unwrap();
        let failure = run.failure.expect("walk should fail");
        assert_eq!(failure.state, "Menu");
        assert_eq!(failure.intent, "nope");
        assert_eq!(
            failure.to_string(),
            "no transition for intent 'nope' from state 'Menu'"
        );
        // One successful transition plus Menu's respond step.
        assert!(run
            .trace
            .contains(&Step::transition("Inicio", "greet", "Menu")));
        // No trailing respond after a failure.
        assert_ne!(run.trace.last(), Some(&Step::respond("Fim", "Bye!")));
    }

    #[test]
    fn respond_emitted_before_each_lookup() {
        let run = simulate(&menu_doc(), &intents(&["greet", "help"])).unwrap();
        assert!(run.succeeded());
        // Menu responds before the help lookup, and again as the final
        // state's trailing respond.
        let responds = run
            .trace
            .iter()
            .filter(|s| matches!(s, Step::Respond { .. }))
            .count();
        assert_eq!(responds, 2);
    }

    #[test]
    fn missing_start_state_is_precondition_failure() {
        let doc = from_interchange(&json!({ "states": { "A": {} } })).unwrap();
        let err = simulate(&doc, &intents(&["x"])).unwrap_err();
        assert_eq!(err, SimError::MissingStartState);
        assert_eq!(err.to_string(), "missing start state");
    }

    #[test]
    fn dangling_start_state_fails_on_first_intent() {
        let doc = from_interchange(&json!({
            "start_state": "Ghost",
            "states": { "A": {} }
        }))
        .unwrap();
        let run = simulate(&doc, &intents(&["x"])).unwrap();
        let failure = run.failure.unwrap();
        assert_eq!(failure.state, "Ghost");
        assert!(run.trace.is_empty());
    }

    #[test]
    fn empty_sequence_emits_only_start_respond() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": { "A": { "respond": "hello" } }
        }))
        .unwrap();
        let run = simulate(&doc, &[]).unwrap();
        assert!(run.succeeded());
        assert_eq!(run.trace, vec![Step::respond("A", "hello")]);
    }

    #[test]
    fn first_declared_transition_wins() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": {
                "A": { "on": [
                    { "intent": "go", "to": "B" },
                    { "intent": "go", "to": "C" }
                ] },
                "B": {}, "C": {}
            }
        }))
        .unwrap();
        let run = simulate(&doc, &intents(&["go"])).unwrap();
        assert_eq!(run.trace, vec![Step::transition("A", "go", "B")]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": {
                "A": { "on": [ { "intent": "Go", "to": "B" } ] },
                "B": {}
            }
        }))
        .unwrap();
        let run = simulate(&doc, &intents(&["go"])).unwrap();
        assert!(!run.succeeded());
    }

    #[test]
    fn cyclic_flow_terminates_with_sequence() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": {
                "A": { "on": [ { "intent": "x", "to": "B" } ] },
                "B": { "on": [ { "intent": "x", "to": "A" } ] }
            }
        }))
        .unwrap();
        let seq = intents(&["x", "x", "x", "x", "x"]);
        let run = simulate(&doc, &seq).unwrap();
        assert!(run.succeeded());
        assert_eq!(run.trace.len(), 5);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let doc = menu_doc();
        let seq = intents(&["greet", "help", "help", "bye"]);
        let first = simulate(&doc, &seq).unwrap();
        for _ in 0..10 {
            let again = simulate(&doc, &seq).unwrap();
            assert_eq!(again.trace, first.trace);
        }
    }
}
