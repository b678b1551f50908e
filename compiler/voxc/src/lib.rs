//! Library half of the `vox` command-line tool.
//!
//! Commands return their output as a string so they can be driven from tests
//! without spawning the binary.

use std::sync::Once;

use clap::{Parser, Subcommand};

pub mod commands;

pub use commands::{CliError, FieldArg};

#[derive(Parser, Debug)]
#[command(name = "vox", version, about = "Inspect and evaluate vox expressions and scripts")]
pub struct Cli {
    /// Log engine internals to stderr (`RUST_LOG` overrides the filter).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the tokens of an expression.
    Lex { expression: String },
    /// Print the syntax tree of an expression and its normalized text.
    Parse { expression: String },
    /// Evaluate an expression.
    Eval {
        expression: String,
        /// Context field, as `name=value`. Repeatable.
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<FieldArg>,
    },
    /// Render `{expr}` spans in a template.
    Interp {
        template: String,
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<FieldArg>,
    },
    /// Run a JSON block script.
    Script {
        path: std::path::PathBuf,
        /// Evaluate as a condition instead of an action.
        #[arg(long)]
        condition: bool,
        /// Deepest allowed call nesting.
        #[arg(long, default_value_t = vox_script::ScriptLimits::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

/// Run one command and return what it prints.
pub fn run(command: &Command) -> Result<String, CliError> {
    match command {
        Command::Lex { expression } => commands::lex_expression(expression),
        Command::Parse { expression } => commands::parse_expression(expression),
        Command::Eval { expression, fields } => commands::eval_expression(expression, fields),
        Command::Interp { template, fields } => Ok(commands::interpolate_template(template, fields)),
        Command::Script {
            path,
            condition,
            max_depth,
        } => commands::run_script_file(path, *condition, *max_depth),
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber, once.
///
/// Does nothing unless `RUST_LOG` is set or `verbose` is requested; verbose
/// without `RUST_LOG` logs the vox crates at `debug`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) if verbose => EnvFilter::new(
                "vox_lexer=debug,vox_parse=debug,vox_runtime=debug,vox_eval=debug,vox_script=debug",
            ),
            Err(_) => return,
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
