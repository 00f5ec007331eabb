//! Token kinds and the [`Token`] produced by the lexer.

use zen_util::{Span, Symbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Newline,
    Indent,
    Dedent,

    Identifier,
    Number,
    String,

    // Keywords
    Set,
    Function,
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Return,
    Break,
    Continue,
    True,
    False,
    Null,
    Class,
    New,
    And,
    Or,
    Not,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    LBracket,
    RBracket,
    Question,
    Colon,
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    AndOp,
    OrOp,
    NotOp,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignDiv,
    AssignMod,
    NullCoalesce,
    OptionalChain,
    Range,
    RangeInclusive,
    Spread,
}

impl TokenKind {
    /// Looks up the keyword `TokenKind` for an identifier lexeme, if any.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        Some(match lexeme {
            "set" => TokenKind::Set,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "class" => TokenKind::Class,
            "new" => TokenKind::New,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => return None,
        })
    }

    /// True for tokens that can never start an operator, i.e. could
    /// plausibly begin a paren-free call argument (§4.5 disambiguation).
    pub fn can_start_argument(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Minus
                | TokenKind::LBracket
                | TokenKind::Not
        )
    }
}

/// A lexed token: kind, decoded text (for identifiers/numbers/strings), and
/// source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded lexeme: identifier name, number's source digits, or a
    /// string literal's content with escapes already resolved. Empty for
    /// tokens that carry no textual payload (operators, punctuation).
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Interns `text` as a [`Symbol`]. Used by the parser for identifiers so
    /// name comparisons become pointer/index comparisons.
    pub fn as_symbol(&self) -> Symbol {
        Symbol::intern(&self.text)
    }
}
