//! ChatFlow DSL parser: source text -> raw AST.
//!
//! The grammar is line-oriented and lenient. Each physical line is
//! recognized independently; blank lines and lines matching no form are
//! skipped. `respond` and `on` directives attach to the most recent
//! `state` header seen -- indentation is cosmetic. The only fatal
//! condition is a source that never declares `start_state`.

use crate::ast::{FlowAst, RawState, RawTransition};
use crate::error::GrammarError;

// ──────────────────────────────────────────────
// Line recognition
// ──────────────────────────────────────────────

/// One recognized directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Start(String),
    Intents(Vec<String>),
    StateHeader(String),
    Respond(String),
    On { intent: String, to: String },
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Split a leading identifier off `s`, returning `(ident, rest)`.
fn split_ident(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some((&s[..end], &s[end..]))
    }
}

/// Strip a leading keyword, rejecting identifier continuations
/// (`state_x` is not the keyword `state`).
fn after_keyword<'a>(t: &'a str, kw: &str) -> Option<&'a str> {
    let rest = t.strip_prefix(kw)?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

/// Recognize a single trimmed line, or `None` when it matches no form.
fn recognize(raw: &str) -> Option<Line> {
    let t = raw.trim();

    // start_state: <id>
    if let Some(rest) = after_keyword(t, "start_state") {
        let rest = rest.trim_start().strip_prefix(':')?;
        let id = rest.trim();
        if is_ident(id) {
            return Some(Line::Start(id.to_owned()));
        }
        return None;
    }

    // intents: <id>(,<id>)*
    // Elements are trimmed and empties dropped, but the original grammar
    // never validated them as identifiers; neither do we.
    if let Some(rest) = after_keyword(t, "intents") {
        let rest = rest.trim_start().strip_prefix(':')?;
        let text = rest.trim();
        if text.is_empty() {
            return None;
        }
        let items: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(str::to_owned)
            .collect();
        return Some(Line::Intents(items));
    }

    // state <id>:
    if let Some(rest) = after_keyword(t, "state") {
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            return None;
        }
        let (id, rest) = split_ident(rest.trim_start())?;
        let rest = rest.trim_start().strip_prefix(':')?;
        if rest.trim().is_empty() {
            return Some(Line::StateHeader(id.to_owned()));
        }
        return None;
    }

    // respond "<text>"
    if let Some(rest) = after_keyword(t, "respond") {
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            return None;
        }
        let body = rest.trim();
        if body.len() >= 2 && body.starts_with('"') && body.ends_with('"') {
            return Some(Line::Respond(body[1..body.len() - 1].to_owned()));
        }
        return None;
    }

    // on <intent> -> <id>
    if let Some(rest) = after_keyword(t, "on") {
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            return None;
        }
        let (intent, rest) = split_ident(rest.trim_start())?;
        let rest = rest.trim_start().strip_prefix("->")?;
        let to = rest.trim();
        if is_ident(to) {
            return Some(Line::On {
                intent: intent.to_owned(),
                to: to.to_owned(),
            });
        }
        return None;
    }

    None
}

// ──────────────────────────────────────────────
// Fold accumulator
// ──────────────────────────────────────────────

/// Parse state threaded through the line fold. The "currently open state"
/// is an index into `states`, never shared outside a single `parse` call.
struct Acc {
    start_state: Option<String>,
    intents: Option<Vec<String>>,
    states: Vec<RawState>,
    current: Option<usize>,
}

impl Acc {
    fn new() -> Self {
        Acc {
            start_state: None,
            intents: None,
            states: Vec::new(),
            current: None,
        }
    }

    fn apply(&mut self, line: Line) {
        match line {
            // Last occurrence wins -- repetition is not an error.
            Line::Start(id) => self.start_state = Some(id),
            Line::Intents(items) => self.intents = Some(items),
            Line::StateHeader(id) => {
                // Reopening a state targets its existing entry; first
                // declaration order is preserved.
                let idx = match self.states.iter().position(|s| s.id == id) {
                    Some(i) => i,
                    None => {
                        self.states.push(RawState {
                            id,
                            respond: None,
                            transitions: Vec::new(),
                        });
                        self.states.len() - 1
                    }
                };
                self.current = Some(idx);
            }
            // Body directives with no open state context are ignored.
            Line::Respond(text) => {
                if let Some(i) = self.current {
                    self.states[i].respond = Some(text);
                }
            }
            Line::On { intent, to } => {
                if let Some(i) = self.current {
                    self.states[i].transitions.push(RawTransition { intent, to });
                }
            }
        }
    }
}

/// Parse ChatFlow DSL source into a raw AST.
///
/// Dangling state and intent references are legal here; validation is a
/// separate pass over the interchange form.
pub fn parse(src: &str, filename: &str) -> Result<FlowAst, GrammarError> {
    let mut acc = Acc::new();

    for raw in src.lines() {
        if raw.trim().is_empty() {
            continue;
        }
        if let Some(line) = recognize(raw) {
            acc.apply(line);
        }
    }

    let start_state = acc.start_state.ok_or_else(|| {
        GrammarError::new(filename, 0, "no start_state directive found")
    })?;

    Ok(FlowAst {
        start_state,
        intents: acc.intents,
        states: acc.states,
    })
}
