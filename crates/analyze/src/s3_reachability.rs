//! S3 -- Reachability from the start state.
//!
//! BFS over the `from -> to` transition relation, queue-based and
//! visit-once so traversal order is deterministic for diagnostics.
//! Declared states never visited are WARN-level orphans, reported in
//! declaration order. An absent or undeclared start state is a single
//! ERROR that ends this pass only -- the other passes are independent
//! and have already run.

use crate::report::Issue;
use crate::table::SymbolTable;
use chatflow_interchange::FlowDoc;
use std::collections::{HashMap, HashSet, VecDeque};

/// Flag orphan (unreachable) states via BFS from the start state.
pub fn check_reachability(doc: &FlowDoc, table: &SymbolTable) -> Vec<Issue> {
    let start = match &doc.start_state {
        Some(s) if table.states.contains(s) => s.as_str(),
        other => {
            return vec![Issue::error(
                "invalid or missing start state",
                other.clone(),
            )];
        }
    };

    // Adjacency in declaration order. Edges to undefined states are kept;
    // they simply lead nowhere further.
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for t in &table.transitions {
        adjacency.entry(t.from.as_str()).or_default().push(t.to.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(state) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(state) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    let mut issues = Vec::new();
    for state in &doc.states {
        if !visited.contains(state.id.as_str()) {
            issues.push(Issue::warn(
                format!(
                    "state '{}' is unreachable from start state '{}'",
                    state.id, start
                ),
                Some(state.id.clone()),
            ));
        }
    }
    issues
}
