//! S1 -- Undefined transition targets.
//!
//! For every flattened transition, an ERROR is emitted when the target
//! is not a declared state. The parser allows dangling targets; this
//! pass is where they surface.

use crate::report::Issue;
use crate::table::SymbolTable;

/// Flag every transition whose target state was never declared.
pub fn check_undefined_targets(table: &SymbolTable) -> Vec<Issue> {
    let mut issues = Vec::new();
    for t in &table.transitions {
        if !table.states.contains(&t.to) {
            issues.push(Issue::error(
                format!(
                    "transition '{}' --[{}]--> '{}' targets an undefined state",
                    t.from, t.intent, t.to
                ),
                Some(t.from.clone()),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_symbol_table;
    use chatflow_interchange::from_interchange;
    use serde_json::json;

    #[test]
    fn dangling_target_flagged_once() {
        let doc = from_interchange(&json!({
            "start_state": "Inicio",
            "states": {
                "Inicio": { "on": [ { "intent": "go", "to": "NaoExiste" } ] }
            }
        }))
        .unwrap();
        let issues = check_undefined_targets(&build_symbol_table(&doc));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Inicio"));
        assert!(issues[0].message.contains("go"));
        assert!(issues[0].message.contains("NaoExiste"));
        assert_eq!(issues[0].location.as_deref(), Some("Inicio"));
    }

    #[test]
    fn defined_targets_pass() {
        let doc = from_interchange(&json!({
            "start_state": "A",
            "states": {
                "A": { "on": [ { "intent": "x", "to": "B" } ] },
                "B": { "on": [ { "intent": "x", "to": "A" } ] }
            }
        }))
        .unwrap();
        assert!(check_undefined_targets(&build_symbol_table(&doc)).is_empty());
    }

    #[test]
    fn duplicate_dangling_transitions_flagged_each() {
        // Issues are never deduplicated.
        let doc = from_interchange(&json!({
            "states": {
                "A": { "on": [
                    { "intent": "x", "to": "Gone" },
                    { "intent": "x", "to": "Gone" }
                ] }
            }
        }))
        .unwrap();
        assert_eq!(check_undefined_targets(&build_symbol_table(&doc)).len(), 2);
    }
}
