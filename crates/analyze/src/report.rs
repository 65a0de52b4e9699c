//! CheckReport -- aggregated output from the semantic check passes.
//!
//! Issues are accumulated in fixed pass order (undefined targets, then
//! undefined intents, then reachability), never mutated and never
//! deduplicated.

use crate::table::SymbolTable;
use serde::Serialize;

/// Severity of a semantic issue.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueKind {
    Error,
    Warn,
}

/// A single semantic finding.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    /// Location hint: a state identifier, or the literal start-state
    /// value for the invalid-start error.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Issue {
    pub fn error(message: impl Into<String>, location: Option<String>) -> Self {
        Issue {
            kind: IssueKind::Error,
            message: message.into(),
            location,
        }
    }

    pub fn warn(message: impl Into<String>, location: Option<String>) -> Self {
        Issue {
            kind: IssueKind::Warn,
            message: message.into(),
            location,
        }
    }
}

/// Aggregated semantic check result: the symbol table plus every issue
/// found, in pass order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub table: SymbolTable,
    pub issues: Vec<Issue>,
}

impl CheckReport {
    /// True when any ERROR-level issue is present. Warnings alone do
    /// not count.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.kind == IssueKind::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn empty_table() -> SymbolTable {
        SymbolTable {
            states: BTreeSet::new(),
            intents: BTreeSet::new(),
            transitions: Vec::new(),
        }
    }

    #[test]
    fn has_errors_ignores_warnings() {
        let report = CheckReport {
            table: empty_table(),
            issues: vec![Issue::warn("orphan", Some("X".to_string()))],
        };
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.errors().count(), 0);
    }

    #[test]
    fn issue_serializes_with_where_key() {
        let issue = Issue::error("boom", Some("A".to_string()));
        let v = serde_json::to_value(&issue).unwrap();
        assert_eq!(v["kind"], "ERROR");
        assert_eq!(v["where"], "A");
    }
}
