use serde::{Deserialize, Serialize};
use std::fmt;

/// A grammar error raised by the parser.
///
/// The only fatal grammar condition is a source file that never declares
/// `start_state`; everything else the parser skips leniently. `line` is 0
/// for whole-file conditions (missing directive, unreadable file).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarError {
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl GrammarError {
    pub fn new(file: &str, line: u32, message: impl Into<String>) -> Self {
        GrammarError {
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    /// Serialize to the JSON error shape emitted by the CLI.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.file,
            "line":    self.line,
            "message": self.message,
        })
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.file, self.message)
        } else {
            write!(f, "{}:{}: {}", self.file, self.line, self.message)
        }
    }
}

impl std::error::Error for GrammarError {}
