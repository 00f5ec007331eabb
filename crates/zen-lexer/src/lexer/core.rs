//! Main `Lexer` struct: indentation tracking, the bounded lookahead buffer,
//! and per-character dispatch to the kind-specific lexing submodules.

use std::collections::VecDeque;

use zen_util::diagnostic::{ErrorCode, Handler};
use zen_util::{FileId, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Tokenizes a single source file.
///
/// Exposes `current()`/`peek(n)`/`advance()` over an internal ring buffer
/// of already-lexed tokens, so the parser can look arbitrarily far ahead
/// (bounded only by how much of the buffer it chooses to fill) without the
/// lexer re-scanning characters it has already tokenized.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) file_id: FileId,
    /// Active indentation prefixes, outermost first. Always non-empty;
    /// `[""]` is the implicit top-level zero-indent.
    pub(crate) indent_stack: Vec<String>,
    pub(crate) at_line_start: bool,
    /// Tokens produced but not yet handed to the caller. Doubles as both
    /// the multi-token production queue (a single source line can yield
    /// several DEDENTs before its first real token) and the lookahead
    /// ring the parser peeks into.
    pub(crate) buffer: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler, file_id: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file_id,
            indent_stack: vec![String::new()],
            at_line_start: true,
            buffer: VecDeque::new(),
        }
    }

    /// Returns the token at the front of the lookahead buffer without
    /// consuming it.
    pub fn current(&mut self) -> &Token {
        self.fill(0);
        &self.buffer[0]
    }

    /// Peeks `n` tokens ahead of the current one (`peek(0) == current()`).
    pub fn peek(&mut self, n: usize) -> &Token {
        self.fill(n);
        &self.buffer[n]
    }

    /// Consumes and returns the current token, advancing the stream.
    pub fn advance(&mut self) -> Token {
        self.fill(0);
        self.buffer.pop_front().expect("fill(0) guarantees a token")
    }

    fn fill(&mut self, upto: usize) {
        while self.buffer.len() <= upto {
            self.lex_more();
        }
    }

    pub(crate) fn point_span(&self) -> Span {
        Span::with_file(
            self.cursor.position(),
            self.cursor.position(),
            self.file_id,
            self.cursor.line(),
            self.cursor.column(),
        )
    }

    pub(crate) fn span_from(&self, start: usize, start_line: u32, start_col: u32) -> Span {
        Span::with_file(start, self.cursor.position(), self.file_id, start_line, start_col)
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.buffer.push_back(token);
    }

    pub(crate) fn report_lexical_error(&self, message: impl Into<String>, span: Span) {
        self.handler
            .build_error(span, message)
            .code(ErrorCode::LexicalError)
            .emit(self.handler);
    }

    /// Produces at least one new token into `self.buffer`.
    fn lex_more(&mut self) {
        loop {
            if self.at_line_start {
                self.handle_line_start();
                if !self.buffer.is_empty() {
                    return;
                }
            }

            self.skip_intraline_whitespace();

            if self.cursor.is_at_end() {
                self.emit_eof();
                return;
            }

            let c = self.cursor.current_char();

            if c == '\n' {
                self.consume_newline();
                return;
            }

            if c == '/' && self.cursor.peek_char(1) == '/' {
                self.skip_line_comment();
                continue;
            }

            if c == '/' && self.cursor.peek_char(1) == '*' {
                self.skip_block_comment();
                continue;
            }

            self.lex_token(c);
            return;
        }
    }

    fn lex_token(&mut self, c: char) {
        if c == '"' {
            self.lex_string();
            return;
        }
        if c.is_ascii_digit() {
            self.lex_number();
            return;
        }
        if self.is_identifier_start() {
            self.lex_identifier();
            return;
        }
        if let Some((kind, len)) = self.match_operator() {
            self.lex_matched_operator(kind, len);
            return;
        }

        let span = self.point_span();
        self.report_lexical_error(format!("unexpected character {c:?}"), span);
        // Recover by skipping to the next whitespace, then retry.
        self.cursor.advance();
        while !self.cursor.is_at_end() && !self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
        self.lex_more();
    }

    fn skip_intraline_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t') {
            self.cursor.advance();
        }
    }

    fn consume_newline(&mut self) {
        let span = self.point_span();
        self.cursor.advance();
        self.at_line_start = true;
        self.push(Token::new(TokenKind::Newline, "", span));
    }

    fn emit_eof(&mut self) {
        let span = self.point_span();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(Token::new(TokenKind::Dedent, "", span));
        }
        self.push(Token::eof(span));
    }

    /// Handles indentation bookkeeping at the start of a line: silently
    /// consumes blank and `//`-comment-only lines, then measures the
    /// indentation of the first real content line and pushes the
    /// INDENT/DEDENT tokens it implies.
    fn handle_line_start(&mut self) {
        loop {
            let start = self.cursor.position();
            while matches!(self.cursor.current_char(), ' ' | '\t') {
                self.cursor.advance();
            }
            let prefix = self.cursor.slice_from(start).to_string();

            if self.cursor.is_at_end() {
                return;
            }

            if self.cursor.current_char() == '\n' {
                self.cursor.advance();
                continue;
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                if self.cursor.current_char() == '\n' {
                    self.cursor.advance();
                }
                continue;
            }

            self.compare_indent(&prefix);
            self.at_line_start = false;
            return;
        }
    }

    fn compare_indent(&mut self, prefix: &str) {
        let span = self.point_span();
        let top = self.indent_stack.last().cloned().unwrap_or_default();

        if prefix == top {
            return;
        }

        if prefix.starts_with(&top) {
            self.indent_stack.push(prefix.to_string());
            self.push(Token::new(TokenKind::Indent, "", span));
            return;
        }

        if top.starts_with(prefix) {
            while let Some(level) = self.indent_stack.last() {
                if level == prefix {
                    return;
                }
                self.indent_stack.pop();
                self.push(Token::new(TokenKind::Dedent, "", span));
            }
            // Popped the whole stack without finding a match: the line's
            // indentation doesn't correspond to any enclosing level.
            self.report_lexical_error(
                "dedent does not match any enclosing indentation level",
                span,
            );
            self.indent_stack.push(prefix.to_string());
            return;
        }

        self.report_lexical_error(
            format!(
                "inconsistent indentation: {:?} is neither an extension of nor a prefix of the current level {:?}",
                prefix, top
            ),
            span,
        );
    }
}
