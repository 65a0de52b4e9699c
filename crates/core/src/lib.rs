//! chatflow-core: ChatFlow compiler core library.
//!
//! Provides the DSL parser and interchange serialization:
//! `.cf` rules source -> raw AST -> IR JSON document.
//!
//! # Public API
//!
//! - [`compile()`] -- read, parse, and serialize a rules file
//! - [`parse()`] -- parse source text into a [`FlowAst`]
//! - [`to_interchange()`] -- serialize an AST to the IR JSON document
//! - [`GrammarError`] -- the parser's error type
//!
//! Validation of the produced IR (dangling references, reachability) is
//! chatflow-analyze's job; the parser is deliberately permissive.

pub mod ast;
pub mod compile;
pub mod error;
pub mod parser;
pub mod serialize;

pub use ast::{FlowAst, RawState, RawTransition};
pub use compile::compile;
pub use error::GrammarError;
pub use parser::parse;
pub use serialize::to_interchange;
