//! Comment skipping. `//` runs to end of line; `/* ... */` is flat (does
//! not nest) and an unterminated block comment is a lexical error.

use zen_util::diagnostic::ErrorCode;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    pub(crate) fn skip_block_comment(&mut self) {
        let start_span = self.point_span();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'

        loop {
            if self.cursor.is_at_end() {
                self.handler
                    .build_error(start_span, "unterminated block comment")
                    .code(ErrorCode::LexicalError)
                    .emit(self.handler);
                return;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}
