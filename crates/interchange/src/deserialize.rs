//! Deserialization from IR JSON documents into typed structs.
//!
//! The main entry point is [`from_interchange`], which takes a
//! `&serde_json::Value` and produces a [`FlowDoc`].
//!
//! Absent fields default rather than fail: a document without
//! `start_state`, `intents`, or `states` is still a well-typed `FlowDoc`
//! (the semantic checker reports what is actually wrong with it). Only a
//! structurally malformed document is an error here.

use crate::types::{FlowDoc, StateDef, Transition};
use std::fmt;

/// Errors during IR JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// The document root is not a JSON object.
    NotAnObject,
    /// A field has the wrong JSON type.
    InvalidField { field: String, message: String },
    /// A state definition is malformed.
    StateError { state: String, message: String },
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::NotAnObject => {
                write!(f, "IR document is not a JSON object")
            }
            InterchangeError::InvalidField { field, message } => {
                write!(f, "field '{}': {}", field, message)
            }
            InterchangeError::StateError { state, message } => {
                write!(f, "state '{}': {}", state, message)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

/// Deserialize an IR JSON document into typed structs.
///
/// The `states` object is walked in document order, which `serde_json`'s
/// `preserve_order` feature keeps equal to declaration order. Unknown
/// fields are silently skipped for forward compatibility.
pub fn from_interchange(doc: &serde_json::Value) -> Result<FlowDoc, InterchangeError> {
    let obj = doc.as_object().ok_or(InterchangeError::NotAnObject)?;

    let start_state = match obj.get("start_state") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            v.as_str()
                .ok_or_else(|| InterchangeError::InvalidField {
                    field: "start_state".to_string(),
                    message: "expected a string".to_string(),
                })?
                .to_string(),
        ),
    };

    let intents = match obj.get("intents") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => {
            let arr = v.as_array().ok_or_else(|| InterchangeError::InvalidField {
                field: "intents".to_string(),
                message: "expected an array of strings".to_string(),
            })?;
            Some(
                arr.iter()
                    .filter_map(|x| x.as_str().map(str::to_string))
                    .collect(),
            )
        }
    };

    let mut states = Vec::new();
    if let Some(v) = obj.get("states") {
        let map = v.as_object().ok_or_else(|| InterchangeError::InvalidField {
            field: "states".to_string(),
            message: "expected an object".to_string(),
        })?;
        for (id, def) in map {
            states.push(parse_state(id, def)?);
        }
    }

    Ok(FlowDoc {
        start_state,
        intents,
        states,
    })
}

fn parse_state(id: &str, def: &serde_json::Value) -> Result<StateDef, InterchangeError> {
    let obj = def.as_object().ok_or_else(|| InterchangeError::StateError {
        state: id.to_string(),
        message: "definition is not an object".to_string(),
    })?;

    let respond = match obj.get("respond") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            v.as_str()
                .ok_or_else(|| InterchangeError::StateError {
                    state: id.to_string(),
                    message: "'respond' is not a string".to_string(),
                })?
                .to_string(),
        ),
    };

    let mut transitions = Vec::new();
    if let Some(v) = obj.get("on") {
        let arr = v.as_array().ok_or_else(|| InterchangeError::StateError {
            state: id.to_string(),
            message: "'on' is not an array".to_string(),
        })?;
        for entry in arr {
            let intent = entry
                .get("intent")
                .and_then(|x| x.as_str())
                .ok_or_else(|| InterchangeError::StateError {
                    state: id.to_string(),
                    message: "transition missing 'intent'".to_string(),
                })?;
            let to = entry
                .get("to")
                .and_then(|x| x.as_str())
                .ok_or_else(|| InterchangeError::StateError {
                    state: id.to_string(),
                    message: "transition missing 'to'".to_string(),
                })?;
            transitions.push(Transition {
                intent: intent.to_string(),
                to: to.to_string(),
            });
        }
    }

    Ok(StateDef {
        id: id.to_string(),
        respond,
        transitions,
    })
}
