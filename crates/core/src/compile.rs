//! Compile orchestrator: .cf rules file -> interchange JSON document.
//!
//! A thin wrapper that reads the source file, parses it, and serializes
//! the AST. Read failures are reported as whole-file grammar errors so
//! callers deal with a single error type.

use crate::error::GrammarError;
use crate::parser::parse;
use crate::serialize::to_interchange;
use serde_json::Value;
use std::path::Path;

/// Compile the given ChatFlow rules file and return the IR document.
pub fn compile(path: &Path) -> Result<Value, GrammarError> {
    let filename = path.display().to_string();
    let src = std::fs::read_to_string(path)
        .map_err(|e| GrammarError::new(&filename, 0, format!("cannot read file: {}", e)))?;
    let ast = parse(&src, &filename)?;
    Ok(to_interchange(&ast))
}
