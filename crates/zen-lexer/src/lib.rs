//! Character stream to token stream, with indentation synthesis (INDENT /
//! DEDENT) and a bounded lookahead buffer the parser uses to disambiguate
//! paren-free calls.

pub mod cursor;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use zen_util::diagnostic::Handler;
use zen_util::FileId;

/// Tokenizes `source` in one pass, returning every token through EOF.
///
/// Lexical errors (bad characters, unterminated strings, mismatched
/// indentation) are recorded on `handler` rather than aborting the scan —
/// the returned stream still reaches EOF so a caller can inspect both the
/// (degraded) tokens and `handler.has_errors()`.
pub fn tokenize(source: &str, handler: &Handler, file_id: FileId) -> Vec<Token> {
    let mut lexer = Lexer::new(source, handler, file_id);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.advance();
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use zen_util::Span;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        tokenize(source, &handler, FileId::DUMMY)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(
            kinds("set x 42"),
            vec![
                TokenKind::Set,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn indent_dedent_balanced() {
        let source = "if true\n    print 1\nprint 2";
        let ts = kinds(source);
        let indents = ts.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = ts.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, dedents);
        assert_eq!(indents, 1);
    }

    #[test]
    fn nested_indentation_dedents_fully_at_eof() {
        let source = "if true\n    if true\n        print 1\nprint 2";
        let ts = kinds(source);
        let indents = ts.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = ts.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
    }

    #[test]
    fn blank_and_comment_lines_do_not_affect_indentation() {
        let source = "if true\n    print 1\n\n    // a comment\n    print 2\nprint 3";
        let ts = kinds(source);
        assert_eq!(ts.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
        assert_eq!(ts.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
    }

    #[test]
    fn consecutive_newlines_collapse() {
        let ts = kinds("set x 1\n\n\nset y 2");
        let newline_count = ts.iter().filter(|k| **k == TokenKind::Newline).count();
        assert_eq!(newline_count, 1);
    }

    #[test]
    fn number_dot_identifier_not_fraction() {
        let ts = kinds("42.foo");
        assert_eq!(
            ts,
            vec![
                TokenKind::Number,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn fractional_and_scientific_numbers() {
        let handler = Handler::new();
        let tokens = tokenize("3.14 2.5e10 1E-3", &handler, FileId::DUMMY);
        assert_eq!(tokens[0].text, "3.14");
        assert_eq!(tokens[1].text, "2.5e10");
        assert_eq!(tokens[2].text, "1E-3");
    }

    #[test]
    fn string_escapes_are_decoded() {
        let handler = Handler::new();
        let tokens = tokenize(r#""line1\nline2\t\"quoted\"""#, &handler, FileId::DUMMY);
        assert_eq!(tokens[0].text, "line1\nline2\t\"quoted\"");
        assert!(!handler.has_errors());
    }

    #[test]
    fn unterminated_string_reports_error_and_recovers() {
        let handler = Handler::new();
        let tokens = tokenize("\"abc", &handler, FileId::DUMMY);
        assert!(handler.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "abc");
    }

    #[test]
    fn unknown_escape_keeps_backslash() {
        let handler = Handler::new();
        let tokens = tokenize(r#""a\qb""#, &handler, FileId::DUMMY);
        assert_eq!(tokens[0].text, "a\\qb");
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("if elif else while for in return")[0], TokenKind::If);
        let ts = kinds("function");
        assert_eq!(ts[0], TokenKind::Function);
    }

    #[test]
    fn multi_char_operators_max_munch() {
        let ts = kinds("a == b != c <= d >= e && f || g ?? h ?. i");
        assert!(ts.contains(&TokenKind::Equals));
        assert!(ts.contains(&TokenKind::NotEquals));
        assert!(ts.contains(&TokenKind::LessEquals));
        assert!(ts.contains(&TokenKind::GreaterEquals));
        assert!(ts.contains(&TokenKind::AndOp));
        assert!(ts.contains(&TokenKind::OrOp));
        assert!(ts.contains(&TokenKind::NullCoalesce));
        assert!(ts.contains(&TokenKind::OptionalChain));
    }

    #[test]
    fn range_and_inclusive_range_and_spread() {
        let ts = kinds("1..5 1..=5 ...xs");
        assert!(ts.contains(&TokenKind::Range));
        assert!(ts.contains(&TokenKind::RangeInclusive));
        assert!(ts.contains(&TokenKind::Spread));
    }

    #[test]
    fn mismatched_indentation_is_reported() {
        let handler = Handler::new();
        let source = "if true\n    print 1\n  print 2";
        let _ = tokenize(source, &handler, FileId::DUMMY);
        assert!(handler.has_errors());
    }

    #[test]
    fn idempotent_tokenization() {
        let source = "function add a b\n    return a + b\nprint add 2 3";
        let handler1 = Handler::new();
        let handler2 = Handler::new();
        let a = tokenize(source, &handler1, FileId::DUMMY);
        let b = tokenize(source, &handler2, FileId::DUMMY);
        assert_eq!(a, b);
    }

    #[test]
    fn span_dummy_is_point() {
        assert!(Span::DUMMY.is_empty());
    }
}
