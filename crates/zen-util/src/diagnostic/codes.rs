//! The stable integer error codes ZEN surfaces to users, both as
//! lexer/parser [`super::Diagnostic`] codes and as the `code` field of a
//! runtime `Value::Error` (see `zen-value`).

use std::fmt;

/// One entry of the ZEN error taxonomy.
///
/// Codes are small negative integers by convention, chosen once and never
/// renumbered so scripts and tests can match on them stably.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Bad character, unterminated string.
    LexicalError,
    /// Parser could not recover a valid position.
    SyntaxError,
    /// Variable lookup miss.
    UndefinedVariable,
    /// Call of a name that isn't bound to a function.
    UndefinedFunction,
    /// Operator applied to incompatible types.
    TypeMismatch,
    /// `/` or `%` with a zero divisor.
    DivisionByZero,
    /// Array index `>= length` or `< 0`.
    IndexOutOfBounds,
    /// Host function contract violation.
    InvalidArgument,
    /// Dereference chain into `null` outside `?.`.
    NullPointer,
    /// Allocation failure.
    MemoryAllocation,
    /// Host I/O: script file not found.
    FileNotFound,
    /// Parser-generated runtime error (e.g. malformed literal at eval time).
    ParseSpecific,
}

impl ErrorCode {
    /// The stable integer code documented for this error kind.
    pub const fn as_i32(self) -> i32 {
        match self {
            ErrorCode::LexicalError => -100,
            ErrorCode::SyntaxError => -101,
            ErrorCode::UndefinedVariable => -200,
            ErrorCode::UndefinedFunction => -201,
            ErrorCode::TypeMismatch => -202,
            ErrorCode::DivisionByZero => -203,
            ErrorCode::IndexOutOfBounds => -204,
            ErrorCode::InvalidArgument => -205,
            ErrorCode::NullPointer => -206,
            ErrorCode::MemoryAllocation => -2,
            ErrorCode::FileNotFound => -300,
            ErrorCode::ParseSpecific => -301,
        }
    }

    /// Short human label, used in `Error: <label> (code: <n>)` messages.
    pub const fn label(self) -> &'static str {
        match self {
            ErrorCode::LexicalError => "Lexical error",
            ErrorCode::SyntaxError => "Syntax error",
            ErrorCode::UndefinedVariable => "Undefined variable",
            ErrorCode::UndefinedFunction => "Undefined function",
            ErrorCode::TypeMismatch => "Type mismatch",
            ErrorCode::DivisionByZero => "Division by zero",
            ErrorCode::IndexOutOfBounds => "Index out of bounds",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::NullPointer => "Null pointer",
            ErrorCode::MemoryAllocation => "Memory allocation failure",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::ParseSpecific => "Parse error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.label(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_documented_values() {
        assert_eq!(ErrorCode::LexicalError.as_i32(), -100);
        assert_eq!(ErrorCode::SyntaxError.as_i32(), -101);
        assert_eq!(ErrorCode::UndefinedVariable.as_i32(), -200);
        assert_eq!(ErrorCode::UndefinedFunction.as_i32(), -201);
        assert_eq!(ErrorCode::TypeMismatch.as_i32(), -202);
        assert_eq!(ErrorCode::DivisionByZero.as_i32(), -203);
        assert_eq!(ErrorCode::IndexOutOfBounds.as_i32(), -204);
        assert_eq!(ErrorCode::InvalidArgument.as_i32(), -205);
        assert_eq!(ErrorCode::NullPointer.as_i32(), -206);
        assert_eq!(ErrorCode::MemoryAllocation.as_i32(), -2);
        assert_eq!(ErrorCode::FileNotFound.as_i32(), -300);
        assert_eq!(ErrorCode::ParseSpecific.as_i32(), -301);
    }
}
