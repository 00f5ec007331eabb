//! `zen` - the command-line interpreter for the ZEN scripting language.
//!
//! Runs a `.zen`/`.zn` script file, or starts a line-at-a-time REPL when no
//! file is given (§6).

mod error;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{CliError, Result};
use zen_eval::{Evaluator, ResourceLimits};
use zen_util::diagnostic::Handler;
use zen_util::FileId;
use zen_value::{Scope, ScopeRef};

const EXIT_SUCCESS: i32 = 0;
const EXIT_EVAL_ERROR: i32 = 1;
const EXIT_SYNTAX_ERROR: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

/// The ZEN scripting language interpreter.
#[derive(Parser, Debug)]
#[command(name = "zen")]
#[command(author = "Zen Language Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a ZEN script, or start a REPL with no file", long_about = None)]
struct Cli {
    /// Script to execute. Starts a REPL if omitted.
    file: Option<PathBuf>,

    /// Dump the token stream before parsing.
    #[arg(long)]
    debug_lexer: bool,

    /// Dump the AST before evaluation.
    #[arg(long)]
    debug_ast: bool,

    /// Override the evaluator's recursion ceiling.
    #[arg(long)]
    max_recursion: Option<usize>,

    /// Enable debug-level logging.
    #[arg(short, long, global = true, env = "ZEN_VERBOSE")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{e}");
        std::process::exit(EXIT_IO_ERROR);
    }

    let limits = ResourceLimits {
        max_recursion: cli.max_recursion.unwrap_or_else(|| ResourceLimits::default().max_recursion),
    };

    let exit_code = match &cli.file {
        Some(path) => run_file(path, limits, cli.debug_lexer, cli.debug_ast),
        None => run_repl(limits, cli.debug_lexer, cli.debug_ast),
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

/// Reads a script file, normalizing CRLF line endings to LF (§6).
fn read_source(path: &PathBuf) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        path: path.display().to_string(),
        source,
    })?;
    Ok(raw.replace("\r\n", "\n"))
}

fn root_scope() -> ScopeRef {
    let scope = Scope::root();
    zen_stdlib::install(&scope);
    scope
}

fn run_file(path: &PathBuf, limits: ResourceLimits, debug_lexer: bool, debug_ast: bool) -> i32 {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_IO_ERROR;
        }
    };

    let handler = Handler::new();
    let file_id = FileId(0);

    let tokens = zen_lexer::tokenize(&source, &handler, file_id);
    if debug_lexer {
        for token in &tokens {
            eprintln!("{token:?}");
        }
    }

    let program = zen_parser::parse(&source, &handler, file_id);
    if handler.has_errors() {
        for diagnostic in handler.drain() {
            eprintln!("{diagnostic}");
        }
        return EXIT_SYNTAX_ERROR;
    }

    if debug_ast {
        eprintln!("{program:#?}");
    }

    let scope = root_scope();
    let evaluator = Evaluator::new(limits);
    let result = evaluator.evaluate(&program, &scope);

    if result.is_error() {
        eprintln!("{result}");
        return EXIT_EVAL_ERROR;
    }

    EXIT_SUCCESS
}

/// A line-at-a-time REPL: each line is lexed, parsed, and evaluated against
/// a scope that persists across lines, so earlier `set`/`function`
/// definitions remain visible to later input. Errors are reported and the
/// session continues; only EOF (Ctrl-D) ends it.
fn run_repl(limits: ResourceLimits, debug_lexer: bool, debug_ast: bool) -> i32 {
    let scope = root_scope();
    let evaluator = Evaluator::new(limits);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("zen> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return EXIT_SUCCESS,
            Ok(_) => {}
            Err(e) => {
                eprintln!("I/O error: {e}");
                return EXIT_IO_ERROR;
            }
        }

        let source = line.replace("\r\n", "\n");
        if source.trim().is_empty() {
            continue;
        }

        let handler = Handler::new();
        let file_id = FileId(0);

        let tokens = zen_lexer::tokenize(&source, &handler, file_id);
        if debug_lexer {
            for token in &tokens {
                eprintln!("{token:?}");
            }
        }

        let program = zen_parser::parse(&source, &handler, file_id);
        if handler.has_errors() {
            for diagnostic in handler.drain() {
                eprintln!("{diagnostic}");
            }
            continue;
        }

        if debug_ast {
            eprintln!("{program:#?}");
        }

        let result = evaluator.evaluate(&program, &scope);
        if result.is_error() {
            eprintln!("{result}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_a_file_argument() {
        let cli = Cli::parse_from(["zen", "script.zen"]);
        assert_eq!(cli.file, Some(PathBuf::from("script.zen")));
    }

    #[test]
    fn cli_starts_repl_with_no_file() {
        let cli = Cli::parse_from(["zen"]);
        assert_eq!(cli.file, None);
    }

    #[test]
    fn cli_parses_debug_flags() {
        let cli = Cli::parse_from(["zen", "--debug-lexer", "--debug-ast", "script.zen"]);
        assert!(cli.debug_lexer);
        assert!(cli.debug_ast);
    }

    #[test]
    fn cli_parses_max_recursion_override() {
        let cli = Cli::parse_from(["zen", "--max-recursion", "10", "script.zen"]);
        assert_eq!(cli.max_recursion, Some(10));
    }

    #[test]
    fn read_source_normalizes_crlf_to_lf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.zen");
        std::fs::write(&path, "set x 1\r\nprint x\r\n").unwrap();
        let source = read_source(&path).unwrap();
        assert_eq!(source, "set x 1\nprint x\n");
    }

    #[test]
    fn read_source_reports_missing_file_as_cli_error() {
        let missing = PathBuf::from("/nonexistent/path/does/not/exist.zen");
        assert!(read_source(&missing).is_err());
    }
}
