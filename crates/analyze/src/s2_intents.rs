//! S2 -- Undefined transition intents.
//!
//! For every flattened transition, an ERROR is emitted when the intent
//! is not in the declared-intents set. When the document never declared
//! an `intents` list, that set is empty and every transition is flagged.
//! That is the reference semantics, applied literally; `CheckOptions`
//! exposes the lenient alternative ("no declaration, no constraint") for
//! callers who want it.

use crate::report::Issue;
use crate::table::SymbolTable;
use crate::CheckOptions;
use chatflow_interchange::FlowDoc;

/// Flag every transition whose intent was never declared.
pub fn check_undefined_intents(
    doc: &FlowDoc,
    table: &SymbolTable,
    options: &CheckOptions,
) -> Vec<Issue> {
    if !options.require_declared_intents && doc.intents.is_none() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for t in &table.transitions {
        if !table.intents.contains(&t.intent) {
            issues.push(Issue::error(
                format!("intent '{}' used in '{}' is never declared", t.intent, t.from),
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

    fn doc(v: serde_json::Value) -> FlowDoc {
        from_interchange(&v).unwrap()
    }

    #[test]
    fn undeclared_intent_flagged() {
        let d = doc(json!({
            "intents": ["ok"],
            "states": { "A": { "on": [ { "intent": "nope", "to": "A" } ] } }
        }));
        let issues = check_undefined_intents(&d, &build_symbol_table(&d), &CheckOptions::default());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("nope"));
        assert!(issues[0].message.contains("A"));
    }

    #[test]
    fn no_intents_list_flags_every_transition() {
        // Deliberate, literal reference behavior.
        let d = doc(json!({
            "start_state": "Inicio",
            "states": { "Inicio": { "on": [ { "intent": "greet", "to": "Menu" } ] } }
        }));
        let issues = check_undefined_intents(&d, &build_symbol_table(&d), &CheckOptions::default());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn lenient_mode_skips_when_undeclared() {
        let d = doc(json!({
            "states": { "A": { "on": [ { "intent": "x", "to": "A" } ] } }
        }));
        let options = CheckOptions {
            require_declared_intents: false,
        };
        assert!(check_undefined_intents(&d, &build_symbol_table(&d), &options).is_empty());
    }

    #[test]
    fn lenient_mode_still_checks_declared_lists() {
        let d = doc(json!({
            "intents": ["ok"],
            "states": { "A": { "on": [ { "intent": "bad", "to": "A" } ] } }
        }));
        let options = CheckOptions {
            require_declared_intents: false,
        };
        assert_eq!(
            check_undefined_intents(&d, &build_symbol_table(&d), &options).len(),
            1
        );
    }

    #[test]
    fn declared_empty_list_flags_in_both_modes() {
        let d = doc(json!({
            "intents": [],
            "states": { "A": { "on": [ { "intent": "x", "to": "A" } ] } }
        }));
        for require in [true, false] {
            let options = CheckOptions {
                require_declared_intents: require,
            };
            assert_eq!(
                check_undefined_intents(&d, &build_symbol_table(&d), &options).len(),
                1
            );
        }
    }
}
