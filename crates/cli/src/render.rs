//! Pure renderers for IR documents: ASCII state diagram and pseudocode.
//!
//! Both are rendering only -- no validation is performed, and a document
//! with a dangling or missing start state still renders.

use chatflow_interchange::FlowDoc;

/// Render a simple ASCII diagram of the state graph.
///
/// States are sorted by name for stable, readable output. Terminal
/// states (no outgoing transitions) are marked `(end)`.
pub fn render_visualization(doc: &FlowDoc) -> String {
    let mut lines = Vec::new();

    let start = doc.start_state.as_deref().unwrap_or("<unknown>");
    lines.push("ChatFlow state diagram".to_string());
    lines.push(format!("Start at: {}", start));
    lines.push(String::new());

    let mut states: Vec<_> = doc.states.iter().collect();
    states.sort_by(|a, b| a.id.cmp(&b.id));

    for state in states {
        let mut header = format!("[{}]", state.id);
        if state.transitions.is_empty() {
            header.push_str(" (end)");
        }
        lines.push(header);

        if let Some(text) = &state.respond {
            lines.push(format!("  respond: \"{}\"", text));
        }

        for t in &state.transitions {
            lines.push(format!("  |--[{}]--> {}", t.intent, t.to));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render pseudocode for the flow, states in declaration order.
pub fn render_pseudocode(doc: &FlowDoc) -> String {
    let mut lines = Vec::new();

    let start = doc.start_state.as_deref().unwrap_or("<unknown>");
    lines.push("ChatFlow pseudocode:".to_string());
    lines.push(format!("Start at {}", start));

    for state in &doc.states {
        lines.push(String::new());
        lines.push(format!("State {}:", state.id));
        if let Some(text) = &state.respond {
            lines.push(format!("  respond: {}", text));
        }
        for t in &state.transitions {
            lines.push(format!("  if {} -> {}", t.intent, t.to));
        }
    }

    lines.join("\n")
}
