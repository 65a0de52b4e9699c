//! Interchange JSON serialization: raw AST -> IR document.
//!
//! Output shape:
//!
//! ```json
//! {
//!   "start_state": "Inicio",
//!   "intents": ["saudacao", "ajuda"],
//!   "states": {
//!     "Inicio": { "respond": "...", "on": [ { "intent": "...", "to": "..." } ] }
//!   }
//! }
//! ```
//!
//! `intents` is omitted when the source declared none, `respond` when a
//! state has no response, and `on` when a state has no transitions. The
//! `states` object keeps declaration order (serde_json `preserve_order`).

use crate::ast::FlowAst;
use serde_json::{json, Map, Value};

/// Serialize a parsed flow to its interchange JSON document.
pub fn to_interchange(ast: &FlowAst) -> Value {
    let mut doc = Map::new();
    doc.insert(
        "start_state".to_owned(),
        Value::String(ast.start_state.clone()),
    );

    if let Some(intents) = &ast.intents {
        doc.insert(
            "intents".to_owned(),
            Value::Array(intents.iter().cloned().map(Value::String).collect()),
        );
    }

    let mut states = Map::new();
    for state in &ast.states {
        let mut def = Map::new();
        if let Some(text) = &state.respond {
            def.insert("respond".to_owned(), Value::String(text.clone()));
        }
        if !state.transitions.is_empty() {
            let on: Vec<Value> = state
                .transitions
                .iter()
                .map(|t| json!({ "intent": t.intent, "to": t.to }))
                .collect();
            def.insert("on".to_owned(), Value::Array(on));
        }
        states.insert(state.id.clone(), Value::Object(def));
    }
    doc.insert("states".to_owned(), Value::Object(states));

    Value::Object(doc)
}
