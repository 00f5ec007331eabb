//! The Error Value (§3, §7): a first-class value carrying a message and a
//! stable integer code. ZEN has no exceptions — every failure path returns
//! one of these instead of unwinding (§7, §9 "Error returns vs
//! exceptions").

use zen_util::diagnostic::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub message: String,
    pub code: i32,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Builds an `ErrorValue` from one of the §7 taxonomy entries, using
    /// its documented label and stable code.
    pub fn from_code(code: ErrorCode, detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{}: {}", code.label(), detail),
            code: code.as_i32(),
        }
    }
}

impl std::fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {} (code: {})", self.message, self.code)
    }
}
