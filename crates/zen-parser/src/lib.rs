//! Token stream to AST: Pratt expression parsing, indentation-aware
//! statement/block parsing, and the paren-free call and object-literal
//! disambiguation rules (§4.5).

pub mod ast;
mod expr;
mod stmt;

use zen_lexer::{Lexer, Token, TokenKind};
use zen_util::diagnostic::{ErrorCode, Handler};
use zen_util::{FileId, Span};

use ast::Program;

/// Parses `source` into a [`Program`], recording syntax errors on
/// `handler` instead of aborting. The returned program may be partial if
/// errors occurred — the caller should check `handler.has_errors()` before
/// trusting it for evaluation, per §7's "degraded mode" contract.
pub fn parse(source: &str, handler: &Handler, file_id: FileId) -> Program {
    let lexer = Lexer::new(source, handler, file_id);
    let mut parser = Parser::new(lexer, handler);
    parser.parse_program()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>, handler: &'a Handler) -> Self {
        Self { lexer, handler }
    }

    fn current(&mut self) -> &Token {
        self.lexer.current()
    }

    fn current_kind(&mut self) -> TokenKind {
        self.lexer.current().kind
    }

    fn peek_kind(&mut self, n: usize) -> TokenKind {
        self.lexer.peek(n).kind
    }

    fn advance(&mut self) -> Token {
        self.lexer.advance()
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it matches `kind`, otherwise records a
    /// SyntaxError at the current position and returns a placeholder EOF
    /// token so the caller can keep going without panicking.
    fn expect(&mut self, kind: TokenKind, what: &str) -> Token {
        if self.check(kind) {
            self.advance()
        } else {
            let span = self.current().span;
            let found = self.current().kind;
            self.error(span, format!("expected {what}, found {found:?}"));
            Token::new(kind, "", span)
        }
    }

    fn error(&self, span: Span, message: impl Into<String>) {
        self.handler
            .build_error(span, message)
            .code(ErrorCode::SyntaxError)
            .emit(self.handler);
    }

    /// Skips blank NEWLINE tokens (statements are NEWLINE-separated; a run
    /// of several is legal and means nothing).
    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Error recovery: skip tokens until the next NEWLINE, DEDENT, or EOF
    /// at the current nesting level, so one bad statement doesn't corrupt
    /// the rest of the block.
    fn recover_to_statement_boundary(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let statements = self.parse_statements_until(TokenKind::Eof);
        Program { statements }
    }

    /// Parses a NEWLINE-separated statement block: `NEWLINE INDENT stmt*
    /// DEDENT`. Used after a block-introducing header (`if`, `while`, `for`,
    /// `function`, `class`, method defs).
    fn parse_block(&mut self) -> Vec<ast::Stmt> {
        self.skip_newlines();
        if !self.eat(TokenKind::Indent) {
            let span = self.current().span;
            self.error(span, "expected an indented block");
            return Vec::new();
        }
        let block = self.parse_statements_until(TokenKind::Dedent);
        if !self.eat(TokenKind::Dedent) {
            // EOF reached without a matching DEDENT; the lexer already
            // synthesizes trailing DEDENTs at EOF, so this is unreachable
            // in well-formed streams but kept for defensive symmetry.
        }
        block
    }

    fn parse_statements_until(&mut self, terminator: TokenKind) -> Vec<ast::Stmt> {
        let mut statements = Vec::new();
        self.skip_newlines();
        while self.current_kind() != terminator && self.current_kind() != TokenKind::Eof {
            let before = self.current().span;
            let stmt = self.parse_statement();
            statements.push(stmt);
            if self.current().span == before && self.current_kind() != terminator {
                // Guard against an infinite loop if a statement parser
                // consumed nothing at all.
                self.advance();
            }
            self.skip_newlines();
        }
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{AssignTarget, BinOp, Expr, Literal, Stmt};

    fn parse_ok(source: &str) -> Program {
        let handler = Handler::new();
        let program = parse(source, &handler, FileId::DUMMY);
        assert!(!handler.has_errors(), "unexpected parse errors in {source:?}");
        program
    }

    #[test]
    fn simple_assignment() {
        let program = parse_ok("set x 42");
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::Assignment {
                target: AssignTarget::Identifier(name),
                value: Expr::Literal(Literal::Number(n), _),
                ..
            } => {
                assert_eq!(name.as_str(), "x");
                assert_eq!(n.0, 42.0);
            }
            other => panic!("expected a simple assignment, got {other:?}"),
        }
    }

    #[test]
    fn precedence_respects_multiplicative_over_additive() {
        let program = parse_ok("set x 1 + 2 * 3");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        match value {
            Expr::BinaryOp {
                op: BinOp::Add,
                right,
                ..
            } => {
                assert!(matches!(**right, Expr::BinaryOp { op: BinOp::Mul, .. }));
            }
            other => panic!("expected top-level '+', got {other:?}"),
        }
    }

    #[test]
    fn bare_comma_list_is_an_array_literal() {
        // From the end-to-end scenario `set xs 1, 2, 3; print xs[1]`.
        let program = parse_ok("set xs 1, 2, 3");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        match value {
            Expr::ArrayLiteral(elements, _) => assert_eq!(elements.len(), 3),
            other => panic!("expected an array literal, got {other:?}"),
        }
    }

    #[test]
    fn paren_free_call_with_minus_argument() {
        // `f -1` — the minus abuts the digit with no space, so this is a
        // single-argument call, not `f` followed by binary subtraction.
        let program = parse_ok("print -1");
        let Stmt::Expr { expr, .. } = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        match expr {
            Expr::Call { args, .. } => {
                assert_eq!(args.len(), 1);
                assert!(matches!(
                    args[0],
                    Expr::UnaryOp {
                        op: ast::UnaryOp::Neg,
                        ..
                    }
                ));
            }
            other => panic!("expected a paren-free call, got {other:?}"),
        }
    }

    #[test]
    fn binary_minus_with_spaces_stays_binary() {
        // `x - 1` with an identifier on the left: `x` cannot start a
        // paren-free call argument list here because this whole thing is
        // itself the right-hand side of an assignment below, so exercise it
        // as a standalone expression statement instead.
        let program = parse_ok("set y x - 1");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expr::BinaryOp { op: BinOp::Sub, .. }));
    }

    #[test]
    fn object_literal_disambiguation_on_set() {
        let program = parse_ok("set p x 1, y 2");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        match value {
            Expr::ObjectLiteral(pairs, _) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].0.as_str(), "x");
                assert_eq!(pairs[1].0.as_str(), "y");
            }
            other => panic!("expected an object literal, got {other:?}"),
        }
    }

    #[test]
    fn plain_value_is_not_mistaken_for_object_literal() {
        // A single identifier value is not followed by another
        // value-starting token, so this must parse as a plain reference.
        let program = parse_ok("set a b");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expr::Identifier(..)));
    }

    #[test]
    fn destructuring_assignment_target() {
        let program = parse_ok("set [a, b] pair");
        match &program.statements[0] {
            Stmt::Assignment {
                target: AssignTarget::Destructure(names),
                ..
            } => {
                assert_eq!(names.len(), 2);
                assert_eq!(names[0].as_str(), "a");
                assert_eq!(names[1].as_str(), "b");
            }
            other => panic!("expected a destructuring assignment, got {other:?}"),
        }
    }

    #[test]
    fn if_elif_else_chain() {
        let source = "if a\n    print 1\nelif b\n    print 2\nelse\n    print 3\n";
        let program = parse_ok(source);
        match &program.statements[0] {
            Stmt::If {
                elifs, else_block, ..
            } => {
                assert_eq!(elifs.len(), 1);
                assert!(else_block.is_some());
            }
            other => panic!("expected an if statement, got {other:?}"),
        }
    }

    #[test]
    fn for_over_range() {
        let source = "for i in 1..5\n    print i\n";
        let program = parse_ok(source);
        match &program.statements[0] {
            Stmt::For { iterable, .. } => {
                assert!(matches!(iterable, Expr::Range { inclusive: false, .. }));
            }
            other => panic!("expected a for statement, got {other:?}"),
        }
    }

    #[test]
    fn function_def_and_call() {
        let source = "function add a b\n    return a + b\nprint add 2 3\n";
        let program = parse_ok(source);
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(program.statements[0], Stmt::FunctionDef { .. }));
    }

    #[test]
    fn class_with_parent_and_method() {
        let source = "class Dog : Animal\n    function bark\n        print woof\n";
        let program = parse_ok(source);
        match &program.statements[0] {
            Stmt::ClassDef { parent, methods, .. } => {
                assert!(parent.is_some());
                assert_eq!(methods.len(), 1);
            }
            other => panic!("expected a class definition, got {other:?}"),
        }
    }

    #[test]
    fn compound_assignment_desugars_to_binary_op() {
        let handler = Handler::new();
        let program = parse("x += 1", &handler, FileId::DUMMY);
        match &program.statements[0] {
            Stmt::Assignment {
                target: AssignTarget::Identifier(name),
                value: Expr::BinaryOp { op: BinOp::Add, .. },
                ..
            } => assert_eq!(name.as_str(), "x"),
            other => panic!("expected a desugared compound assignment, got {other:?}"),
        }
    }

    #[test]
    fn ternary_expression() {
        let program = parse_ok("set x a ? 1 : 2");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expr::Ternary { .. }));
    }

    #[test]
    fn member_and_index_chains() {
        let program = parse_ok("set x a.b[0].c");
        let Stmt::Assignment { value, .. } = &program.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expr::Member { .. }));
    }

    #[test]
    fn syntax_error_recovers_to_next_statement() {
        let handler = Handler::new();
        let program = parse("set\nset x 1", &handler, FileId::DUMMY);
        assert!(handler.has_errors());
        assert_eq!(program.statements.len(), 2);
    }
}
