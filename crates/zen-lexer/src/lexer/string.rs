//! String literal lexing. Escapes: `\n`, `\t`, `\r`, `\\`, `\"`, `\/`.
//! An unrecognized escape keeps the backslash and the following character
//! literally. An unterminated string is a lexical error recovered by
//! emitting a STRING token with whatever was collected before EOF/newline.

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance(); // opening '"'

        let mut value = String::new();
        let mut terminated = false;

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                break;
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                terminated = true;
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                let escaped = self.cursor.current_char();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    '/' => value.push('/'),
                    '\0' if self.cursor.is_at_end() => break,
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
                self.cursor.advance();
                continue;
            }
            value.push(c);
            self.cursor.advance();
        }

        let span = self.span_from(start, start_line, start_col);
        if !terminated {
            self.report_lexical_error("unterminated string literal", span);
        }
        self.push(Token::new(TokenKind::String, value, span));
    }
}
