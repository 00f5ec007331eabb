//! Number literal lexing: decimal digits, an optional single fractional
//! part, and optional scientific-notation exponent. `.` is only consumed
//! as a decimal point when followed by a digit — `42.foo` lexes as the
//! number `42`, a dot, and the identifier `foo` (§4.3).

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance(); // '.'
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let mut lookahead = 1;
            if matches!(self.cursor.peek_char(1), '+' | '-') {
                lookahead = 2;
            }
            if self.cursor.peek_char(lookahead).is_ascii_digit() {
                self.cursor.advance(); // e/E
                if matches!(self.cursor.current_char(), '+' | '-') {
                    self.cursor.advance();
                }
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let lexeme = self.cursor.slice_from(start);
        let span = self.span_from(start, start_line, start_col);
        self.push(Token::new(TokenKind::Number, lexeme, span));
    }
}
