//! Error handling for the `zen` CLI.

use thiserror::Error;

/// Errors that can occur outside the interpreter itself: reading the
/// source file, or some other host-level I/O failure. Lexer/parser and
/// evaluator errors are reported directly as diagnostics/Error Values and
/// never constructed as a `CliError` (§7: the core has no exceptions).
#[derive(Error, Debug)]
pub enum CliError {
    #[error("could not read {path}: {source}")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
