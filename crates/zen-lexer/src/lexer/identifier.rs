//! Identifier and keyword lexing: `[A-Za-z_][A-Za-z0-9_]*`, ASCII only
//! (§9 non-goal: Unicode identifiers).

use crate::token::{Token, TokenKind};

use super::core::Lexer;

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    pub(crate) fn is_identifier_start(&self) -> bool {
        is_ident_start(self.cursor.current_char())
    }

    pub(crate) fn lex_identifier(&mut self) {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());

        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start);
        let span = self.span_from(start, start_line, start_col);
        let kind = TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier);
        self.push(Token::new(kind, lexeme, span));
    }
}
