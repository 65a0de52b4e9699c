//! ChatFlow semantic checker -- symbol table plus three check passes.
//!
//! The checker consumes the deserialized IR (chatflow-interchange), not
//! raw DSL text. Each pass is a separate module producing a `Vec<Issue>`;
//! [`check()`] orchestrates them in fixed order and aggregates the
//! results into a [`CheckReport`]. Passes are independent: no pass is
//! skipped because an earlier one reported errors.

pub mod report;
pub mod s1_targets;
pub mod s2_intents;
pub mod s3_reachability;
pub mod table;

pub use report::{CheckReport, Issue, IssueKind};
pub use table::{build_symbol_table, SymbolTable, TransitionRef};

/// Strictness knobs for the semantic checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// When true (the reference behavior), a document with no `intents`
    /// declaration has an empty declared set and every transition fails
    /// the undefined-intent check. When false, an absent declaration
    /// places no constraint on intents.
    pub require_declared_intents: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            require_declared_intents: true,
        }
    }
}

/// Run the full semantic check suite on a document.
///
/// Pass order is fixed: undefined targets, undefined intents,
/// reachability. The issue list concatenates the passes' findings in
/// that order, errors and warnings interleaved as produced.
pub fn check(doc: &chatflow_interchange::FlowDoc, options: &CheckOptions) -> CheckReport {
    let table = table::build_symbol_table(doc);

    let mut issues = Vec::new();
    issues.extend(s1_targets::check_undefined_targets(&table));
    issues.extend(s2_intents::check_undefined_intents(doc, &table, options));
    issues.extend(s3_reachability::check_reachability(doc, &table));

    CheckReport { table, issues }
}
