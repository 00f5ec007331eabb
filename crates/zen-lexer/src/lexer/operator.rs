//! Operator and punctuation lexing. Multi-character tokens are matched
//! greedily (max-munch) before falling back to single-character tokens.

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Matches the longest operator/punctuation token starting at the
    /// cursor, without consuming anything. Returns the token kind and its
    /// length in bytes, or `None` if the current character starts no
    /// known token.
    pub(crate) fn match_operator(&self) -> Option<(TokenKind, usize)> {
        let c = self.cursor.current_char();
        let c1 = self.cursor.peek_char(1);
        let c2 = self.cursor.peek_char(2);

        Some(match (c, c1, c2) {
            ('.', '.', '.') => (TokenKind::Spread, 3),
            ('.', '.', '=') => (TokenKind::RangeInclusive, 3),
            ('=', '=', _) => (TokenKind::Equals, 2),
            ('!', '=', _) => (TokenKind::NotEquals, 2),
            ('<', '=', _) => (TokenKind::LessEquals, 2),
            ('>', '=', _) => (TokenKind::GreaterEquals, 2),
            ('&', '&', _) => (TokenKind::AndOp, 2),
            ('|', '|', _) => (TokenKind::OrOp, 2),
            ('+', '=', _) => (TokenKind::AssignAdd, 2),
            ('-', '=', _) => (TokenKind::AssignSub, 2),
            ('*', '=', _) => (TokenKind::AssignMul, 2),
            ('/', '=', _) => (TokenKind::AssignDiv, 2),
            ('%', '=', _) => (TokenKind::AssignMod, 2),
            ('?', '?', _) => (TokenKind::NullCoalesce, 2),
            ('?', '.', _) => (TokenKind::OptionalChain, 2),
            ('=', '>', _) => (TokenKind::Arrow, 2),
            ('.', '.', _) => (TokenKind::Range, 2),
            ('+', _, _) => (TokenKind::Plus, 1),
            ('-', _, _) => (TokenKind::Minus, 1),
            ('*', _, _) => (TokenKind::Star, 1),
            ('/', _, _) => (TokenKind::Slash, 1),
            ('%', _, _) => (TokenKind::Percent, 1),
            ('=', _, _) => (TokenKind::Equals, 1),
            ('<', _, _) => (TokenKind::Less, 1),
            ('>', _, _) => (TokenKind::Greater, 1),
            ('!', _, _) => (TokenKind::NotOp, 1),
            ('(', _, _) => (TokenKind::LParen, 1),
            (')', _, _) => (TokenKind::RParen, 1),
            (',', _, _) => (TokenKind::Comma, 1),
            ('.', _, _) => (TokenKind::Dot, 1),
            ('[', _, _) => (TokenKind::LBracket, 1),
            (']', _, _) => (TokenKind::RBracket, 1),
            ('?', _, _) => (TokenKind::Question, 1),
            (':', _, _) => (TokenKind::Colon, 1),
            _ => return None,
        })
    }

    pub(crate) fn lex_matched_operator(&mut self, kind: TokenKind, len: usize) {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance_n(len);
        let lexeme = self.cursor.slice_from(start);
        let span = self.span_from(start, start_line, start_col);
        self.push(Token::new(kind, lexeme, span));
    }
}
