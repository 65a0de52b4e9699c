//! `chatflow simulate --interactive` -- REPL driver over the engine's
//! step function.
//!
//! Per-step semantics are identical to batch simulation; the session
//! additionally ends at a terminal state (zero outgoing transitions,
//! reported, not an error) or on an empty line / `quit`. User input is
//! folded to lowercase before matching -- the engine itself always
//! compares intents exactly as declared.

use chatflow_interchange::FlowDoc;
use chatflow_sim::first_match;
use std::io::{self, BufRead, Write};

/// Run the interactive session. Returns the process exit code.
pub fn run_interactive(doc: &FlowDoc) -> i32 {
    let mut current = match &doc.start_state {
        Some(s) => s.clone(),
        None => {
            eprintln!("error: missing start state");
            return 1;
        }
    };

    println!();
    println!("  ChatFlow interactive simulation");
    println!(
        "  Starting at '{}'. Empty line or 'quit' ends the session.",
        current
    );
    println!();

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        let state = doc.state(&current);

        if let Some(text) = state.and_then(|s| s.respond.as_deref()) {
            println!("[{}] {}", current, text);
        }

        // A dangling state behaves as an empty one: terminal.
        if state.map_or(true, |s| s.transitions.is_empty()) {
            println!("terminal state '{}' reached", current);
            return 0;
        }

        print!("intent> ");
        if io::stdout().flush().is_err() {
            return 0;
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                return 0;
            }
            Ok(_) => {}
        }

        let input = line.trim().to_lowercase();
        if input.is_empty() || input == "quit" {
            println!("session ended");
            return 0;
        }

        match state.and_then(|s| first_match(s, &input)) {
            Some(t) => {
                println!("[{}] --[{}]--> {}", current, input, t.to);
                current = t.to.clone();
            }
            None => {
                eprintln!(
                    "no transition for intent '{}' from state '{}'",
                    input, current
                );
                return 2;
            }
        }
    }
}
