mod interactive;
mod render;

use std::path::{Path, PathBuf};
use std::process;

use chatflow_analyze::{CheckOptions, CheckReport};
use chatflow_interchange::FlowDoc;
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// ChatFlow rule language toolchain.
#[derive(Parser)]
#[command(name = "chatflow", version, about = "ChatFlow rule language toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .cf rules file to an IR JSON document
    Compile {
        /// Path to the rules file
        rules: PathBuf,
        /// Path to write the IR JSON document to
        out: PathBuf,
    },

    /// Validate an IR JSON document against the formal JSON Schema
    Validate {
        /// Path to the IR JSON document
        ir: PathBuf,
    },

    /// Run the symbol-table builder and semantic checker on an IR document
    Check {
        /// Path to the IR JSON document
        ir: PathBuf,
        /// Skip the undefined-intent check when the document declares no
        /// intents list at all
        #[arg(long)]
        allow_undeclared_intents: bool,
    },

    /// Replay an intent sequence against an IR document
    Simulate {
        /// Path to the IR JSON document
        ir: PathBuf,
        /// Intent sequence (e.g. --intents greet help bye)
        #[arg(long, num_args = 1.., conflicts_with_all = ["script", "interactive"])]
        intents: Vec<String>,
        /// File with one intent per line (blank lines skipped)
        #[arg(long, conflicts_with = "interactive")]
        script: Option<PathBuf>,
        /// Read intents interactively from stdin
        #[arg(long)]
        interactive: bool,
    },

    /// Render an ASCII state diagram of an IR document
    Visualize {
        /// Path to the IR JSON document
        ir: PathBuf,
    },

    /// Render pseudocode for an IR document
    Pseudocode {
        /// Path to the IR JSON document
        ir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { rules, out } => {
            cmd_compile(&rules, &out, cli.output, cli.quiet);
        }
        Commands::Validate { ir } => {
            cmd_validate(&ir, cli.output, cli.quiet);
        }
        Commands::Check {
            ir,
            allow_undeclared_intents,
        } => {
            cmd_check(&ir, allow_undeclared_intents, cli.output, cli.quiet);
        }
        Commands::Simulate {
            ir,
            intents,
            script,
            interactive,
        } => {
            cmd_simulate(
                &ir,
                &intents,
                script.as_deref(),
                interactive,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Visualize { ir } => {
            let doc = load_doc(&ir, cli.output, cli.quiet);
            println!("{}", render::render_visualization(&doc));
        }
        Commands::Pseudocode { ir } => {
            let doc = load_doc(&ir, cli.output, cli.quiet);
            println!("{}", render::render_pseudocode(&doc));
        }
    }
}

fn cmd_compile(rules: &Path, out: &Path, output: OutputFormat, quiet: bool) {
    match chatflow_core::compile(rules) {
        Ok(ir) => {
            let pretty = serde_json::to_string_pretty(&ir)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            if let Err(e) = std::fs::write(out, pretty + "\n") {
                report_error(
                    &format!("error writing '{}': {}", out.display(), e),
                    output,
                    quiet,
                );
                process::exit(1);
            }
            if !quiet {
                match output {
                    OutputFormat::Text => println!("wrote {}", out.display()),
                    OutputFormat::Json => {
                        println!("{{\"ok\": true, \"out\": \"{}\"}}", out.display());
                    }
                }
            }
        }
        Err(e) => {
            match output {
                OutputFormat::Json => {
                    let err_json = serde_json::to_string_pretty(&e.to_json_value())
                        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
                    eprintln!("{}", err_json);
                }
                OutputFormat::Text => {
                    if !quiet {
                        eprintln!("error: {}", e);
                    }
                }
            }
            process::exit(1);
        }
    }
}

static IR_SCHEMA_STR: &str = include_str!("../../../docs/ir-schema.json");

fn cmd_validate(ir_path: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(IR_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded IR schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc = load_json(ir_path, output, quiet);

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors: Vec<String> = validator.iter_errors(&doc).map(|e| format!("{}", e)).collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid document");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({ "valid": false, "errors": errors });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}

fn cmd_check(ir_path: &Path, allow_undeclared_intents: bool, output: OutputFormat, quiet: bool) {
    let doc = load_doc(ir_path, output, quiet);
    let options = CheckOptions {
        require_declared_intents: !allow_undeclared_intents,
    };
    let report = chatflow_analyze::check(&doc, &options);

    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if !quiet {
                print_report(&report);
            }
        }
    }
    // Semantic issues are reported, not mapped to the exit code; only a
    // load failure of the IR file itself exits nonzero.
}

fn print_report(report: &CheckReport) {
    println!("=== SYMBOL TABLE ===");
    println!(
        "states: {}",
        report
            .table
            .states
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "intents: {}",
        report
            .table
            .intents
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("transitions:");
    for t in &report.table.transitions {
        println!("  {} --[{}]--> {}", t.from, t.intent, t.to);
    }

    println!();
    println!("=== ISSUES ===");
    if report.issues.is_empty() {
        println!("no issues found");
    } else {
        for issue in &report.issues {
            let kind = match issue.kind {
                chatflow_analyze::IssueKind::Error => "ERROR",
                chatflow_analyze::IssueKind::Warn => "WARN",
            };
            match &issue.location {
                Some(loc) => println!("- {}: {} (at {})", kind, issue.message, loc),
                None => println!("- {}: {}", kind, issue.message),
            }
        }
    }
}

fn cmd_simulate(
    ir_path: &Path,
    intents: &[String],
    script: Option<&Path>,
    interactive: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let doc = load_doc(ir_path, output, quiet);

    if interactive {
        process::exit(interactive::run_interactive(&doc));
    }

    let sequence: Vec<String> = match script {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_owned)
                .collect(),
            Err(e) => {
                report_error(
                    &format!("error reading script '{}': {}", path.display(), e),
                    output,
                    quiet,
                );
                process::exit(1);
            }
        },
        None => intents.to_vec(),
    };

    let run = match chatflow_sim::simulate(&doc, &sequence) {
        Ok(run) => run,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run).unwrap_or_default());
        }
        OutputFormat::Text => {
            if !quiet {
                println!("=== SIMULATION ===");
                println!(
                    "start_state: {}",
                    doc.start_state.as_deref().unwrap_or("<unknown>")
                );
                if sequence.is_empty() {
                    println!("sequence: (empty)");
                } else {
                    println!("sequence: {}", sequence.join(" "));
                }
                println!();
                println!("--- trace ---");
                for step in &run.trace {
                    match step {
                        chatflow_sim::Step::Respond { state, respond } => {
                            println!("[{}] respond: {}", state, respond);
                        }
                        chatflow_sim::Step::Transition { state, intent, to } => {
                            println!("[{}] --[{}]--> {}", state, intent, to);
                        }
                    }
                }
                println!();
                match &run.failure {
                    Some(f) => println!("{}", f),
                    None => println!("completed without errors"),
                }
            }
        }
    }

    if run.failure.is_some() {
        process::exit(2);
    }
}

/// Read a file and parse it as JSON, exiting with a load error on failure.
fn load_json(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            report_error(
                &format!("error reading '{}': {}", path.display(), e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            report_error(
                &format!("error parsing JSON in '{}': {}", path.display(), e),
                output,
                quiet,
            );
            process::exit(1);
        }
    }
}

/// Load and deserialize an IR document, exiting with a load error on failure.
fn load_doc(path: &Path, output: OutputFormat, quiet: bool) -> FlowDoc {
    let value = load_json(path, output, quiet);
    match chatflow_interchange::from_interchange(&value) {
        Ok(doc) => doc,
        Err(e) => {
            report_error(
                &format!("error in IR document '{}': {}", path.display(), e),
                output,
                quiet,
            );
            process::exit(1);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
