//! Symbol table: flat set/list view of an IR document.
//!
//! Building the table is total -- a document with no states or intents
//! yields empty sets, never an error.

use chatflow_interchange::FlowDoc;
use serde::Serialize;
use std::collections::BTreeSet;

/// A flattened `(from, intent, to)` transition triple.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionRef {
    pub from: String,
    pub intent: String,
    pub to: String,
}

/// Derived, read-only symbol table.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolTable {
    /// All declared state identifiers.
    pub states: BTreeSet<String>,
    /// All declared intent identifiers; empty when the document carries
    /// no `intents` list.
    pub intents: BTreeSet<String>,
    /// Every transition, flattened in state-declaration order then
    /// in-state declaration order. The ordering is semantically
    /// significant: it is the tie-break order the simulator honors.
    pub transitions: Vec<TransitionRef>,
}

/// Build the symbol table for a document.
pub fn build_symbol_table(doc: &FlowDoc) -> SymbolTable {
    let states: BTreeSet<String> = doc.states.iter().map(|s| s.id.clone()).collect();

    let intents: BTreeSet<String> = doc
        .intents
        .as_deref()
        .unwrap_or_default()
        .iter()
        .cloned()
        .collect();

    let mut transitions = Vec::new();
    for state in &doc.states {
        for t in &state.transitions {
            transitions.push(TransitionRef {
                from: state.id.clone(),
                intent: t.intent.clone(),
                to: t.to.clone(),
            });
        }
    }

    SymbolTable {
        states,
        intents,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatflow_interchange::from_interchange;
    use serde_json::json;

    #[test]
    fn flattens_in_declaration_order() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "intents": ["x", "y"],
            "states": {
                "B": { "on": [ { "intent": "x", "to": "A" }, { "intent": "y", "to": "B" } ] },
                "A": { "on": [ { "intent": "x", "to": "B" } ] }
            }
        }))
        .unwrap();

        let table = build_symbol_table(&doc);
        assert_eq!(table.states.len(), 2);
        assert_eq!(table.intents.len(), 2);
        // Transition count equals the sum of per-state list lengths.
        assert_eq!(table.transitions.len(), 3);
        // State order (B before A, document order), then in-state order.
        assert_eq!(table.transitions[0].from, "B");
        assert_eq!(table.transitions[0].intent, "x");
        assert_eq!(table.transitions[1].intent, "y");
        assert_eq!(table.transitions[2].from, "A");
    }

    #[test]
    fn empty_document_yields_empty_table() {
        let doc = from_interchange(&json!({})).unwrap();
        let table = build_symbol_table(&doc);
        assert!(table.states.is_empty());
        assert!(table.intents.is_empty());
        assert!(table.transitions.is_empty());
    }

    #[test]
    fn undeclared_intents_is_empty_set() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": { "A": { "on": [ { "intent": "x", "to": "A" } ] } }
        }))
        .unwrap();
        let table = build_symbol_table(&doc);
        assert!(table.intents.is_empty());
        assert_eq!(table.transitions.len(), 1);
    }
}
