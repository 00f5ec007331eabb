//! Host-level error types for the foundation crate's own operations
//! (source map / span bookkeeping), distinct from the source-language
//! `Value::Error` taxonomy defined in `zen-value`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("span out of bounds: file has {file_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        file_len: usize,
        span_start: usize,
        span_end: usize,
    },
}

pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
