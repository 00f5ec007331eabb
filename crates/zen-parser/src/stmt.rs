//! Statement parsing: assignment (including destructuring and the
//! object-literal disambiguation rule), control flow, and definitions.

use zen_lexer::TokenKind;
use zen_util::Span;

use crate::ast::{AssignTarget, BinOp, ElseIf, Expr, MethodDef, Stmt};
use crate::Parser;

/// Tokens that can open a bare `key value, key value` object literal in
/// value position — deliberately narrower than a general expression
/// start, since an operator there (`-`, `not`, `(`) would make the
/// "identifier key" reading ambiguous with a plain expression.
fn can_start_literal_value(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::LBracket
    )
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        match self.current_kind() {
            TokenKind::Set => self.parse_assignment(),
            TokenKind::Function => self.parse_function_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let span = self.advance().span;
                Stmt::Break { span }
            }
            TokenKind::Continue => {
                let span = self.advance().span;
                Stmt::Continue { span }
            }
            TokenKind::Class => self.parse_class_def(),
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_assignment(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'set'
        let target = self.parse_assign_target();
        let value = self.parse_value_or_object_literal();
        let span = Span::with_file(
            start_span.start,
            value.span().end,
            start_span.file_id,
            start_span.line,
            start_span.column,
        );
        Stmt::Assignment { target, value, span }
    }

    fn parse_assign_target(&mut self) -> AssignTarget {
        if self.check(TokenKind::LBracket) {
            self.advance();
            let mut names = Vec::new();
            if !self.check(TokenKind::RBracket) {
                names.push(
                    self.expect(TokenKind::Identifier, "destructuring target name")
                        .as_symbol(),
                );
                while self.eat(TokenKind::Comma) {
                    names.push(
                        self.expect(TokenKind::Identifier, "destructuring target name")
                            .as_symbol(),
                    );
                }
            }
            self.expect(TokenKind::RBracket, "']'");
            return AssignTarget::Destructure(names);
        }

        let name_tok = self.expect(TokenKind::Identifier, "assignment target");
        let mut base = Expr::Identifier(name_tok.as_symbol(), name_tok.span);
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let member_tok = self.expect(TokenKind::Identifier, "member name");
                    let span = Span::with_file(
                        base.span().start,
                        member_tok.span.end,
                        base.span().file_id,
                        base.span().line,
                        base.span().column,
                    );
                    base = Expr::Member {
                        target: Box::new(base),
                        member: member_tok.as_symbol(),
                        span,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr();
                    let end_tok = self.expect(TokenKind::RBracket, "']'");
                    let span = Span::with_file(
                        base.span().start,
                        end_tok.span.end,
                        base.span().file_id,
                        base.span().line,
                        base.span().column,
                    );
                    base = Expr::Index {
                        target: Box::new(base),
                        index: Box::new(index),
                        span,
                    };
                }
                _ => break,
            }
        }

        match base {
            Expr::Identifier(sym, _) => AssignTarget::Identifier(sym),
            Expr::Member { target, member, .. } => AssignTarget::Member(target, member),
            Expr::Index { target, index, .. } => AssignTarget::Index(target, index),
            _ => unreachable!("loop above only ever builds Identifier/Member/Index"),
        }
    }

    /// Resolves the value grammar on the right-hand side of `set`/`return`,
    /// which admits three shapes: a bare object literal (`key value, key
    /// value`), a bare comma-separated array literal (`1, 2, 3`), or a
    /// single expression. An identifier directly followed by another
    /// value-starting token reads as the first `key value` pair of an
    /// object literal; otherwise a comma after the first expression turns
    /// the whole thing into an array.
    pub(crate) fn parse_value_or_object_literal(&mut self) -> Expr {
        if self.looks_like_object_literal_start() {
            return self.parse_object_literal();
        }

        let span = self.current().span;
        let first = self.parse_expr();
        if !self.check(TokenKind::Comma) {
            return first;
        }

        let mut elements = vec![first];
        while self.eat(TokenKind::Comma) {
            elements.push(self.parse_expr());
        }
        Expr::ArrayLiteral(elements, span)
    }

    fn looks_like_object_literal_start(&mut self) -> bool {
        self.check(TokenKind::Identifier) && can_start_literal_value(self.peek_kind(1))
    }

    fn parse_object_literal(&mut self) -> Expr {
        let span = self.current().span;
        let mut pairs = Vec::new();
        loop {
            let key_tok = self.expect(TokenKind::Identifier, "object literal key");
            let value = self.parse_expr();
            pairs.push((key_tok.as_symbol(), value));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Expr::ObjectLiteral(pairs, span)
    }

    fn parse_function_def(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'function'
        let name_tok = self.expect(TokenKind::Identifier, "function name");
        let mut params = Vec::new();
        while self.check(TokenKind::Identifier) {
            params.push(self.advance().as_symbol());
        }
        let body = self.parse_block();
        Stmt::FunctionDef {
            name: name_tok.as_symbol(),
            params,
            body,
            span: start_span,
        }
    }

    fn parse_if(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'if'
        let condition = self.parse_expr();
        let then_block = self.parse_block();

        let mut elifs = Vec::new();
        while self.check(TokenKind::Elif) {
            self.advance();
            let condition = self.parse_expr();
            let block = self.parse_block();
            elifs.push(ElseIf { condition, block });
        }

        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block())
        } else {
            None
        };

        Stmt::If {
            condition,
            then_block,
            elifs,
            else_block,
            span: start_span,
        }
    }

    fn parse_while(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'while'
        let condition = self.parse_expr();
        let block = self.parse_block();
        Stmt::While {
            condition,
            block,
            span: start_span,
        }
    }

    fn parse_for(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'for'
        let var_tok = self.expect(TokenKind::Identifier, "loop variable");
        self.expect(TokenKind::In, "'in'");
        let iterable = self.parse_expr();
        let block = self.parse_block();
        Stmt::For {
            var: var_tok.as_symbol(),
            iterable,
            block,
            span: start_span,
        }
    }

    fn parse_return(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'return'
        let value = if matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        ) {
            None
        } else {
            Some(self.parse_value_or_object_literal())
        };
        Stmt::Return {
            value,
            span: start_span,
        }
    }

    fn parse_class_def(&mut self) -> Stmt {
        let start_span = self.advance().span; // 'class'
        let name_tok = self.expect(TokenKind::Identifier, "class name");
        let parent = if self.eat(TokenKind::Colon) {
            Some(
                self.expect(TokenKind::Identifier, "parent class name")
                    .as_symbol(),
            )
        } else {
            None
        };

        self.skip_newlines();
        let methods = if self.eat(TokenKind::Indent) {
            let methods = self.parse_methods_until(TokenKind::Dedent);
            self.eat(TokenKind::Dedent);
            methods
        } else {
            let span = self.current().span;
            self.error(span, "expected an indented class body");
            Vec::new()
        };

        Stmt::ClassDef {
            name: name_tok.as_symbol(),
            parent,
            methods,
            span: start_span,
        }
    }

    fn parse_methods_until(&mut self, terminator: TokenKind) -> Vec<MethodDef> {
        let mut methods = Vec::new();
        self.skip_newlines();
        while self.current_kind() != terminator && self.current_kind() != TokenKind::Eof {
            methods.push(self.parse_method_def());
            self.skip_newlines();
        }
        methods
    }

    fn parse_method_def(&mut self) -> MethodDef {
        let start_span = self.expect(TokenKind::Function, "method definition").span;
        let name_tok = self.expect(TokenKind::Identifier, "method name");
        let mut params = Vec::new();
        while self.check(TokenKind::Identifier) {
            params.push(self.advance().as_symbol());
        }
        let body = self.parse_block();
        MethodDef {
            name: name_tok.as_symbol(),
            params,
            body,
            span: start_span,
        }
    }

    /// Everything that isn't a keyword-led statement: a plain expression
    /// statement, or a compound assignment (`x += 1`) desugared into
    /// `x = x + 1`.
    fn parse_expr_statement(&mut self) -> Stmt {
        let expr = self.parse_expr();

        if let Some(op) = self.compound_assign_op() {
            let op_span = self.advance().span;
            let rhs = self.parse_expr();
            return match Self::expr_as_assign_target(&expr) {
                Some(target) => {
                    let span = Span::with_file(
                        expr.span().start,
                        rhs.span().end,
                        expr.span().file_id,
                        expr.span().line,
                        expr.span().column,
                    );
                    let value = Expr::BinaryOp {
                        op,
                        left: Box::new(expr),
                        right: Box::new(rhs),
                        span,
                    };
                    Stmt::Assignment { target, value, span }
                }
                None => {
                    self.error(
                        op_span,
                        "left-hand side of a compound assignment must be a variable, member, or index expression",
                    );
                    Stmt::Expr {
                        span: expr.span(),
                        expr,
                    }
                }
            };
        }

        let span = expr.span();
        Stmt::Expr { expr, span }
    }

    fn compound_assign_op(&mut self) -> Option<BinOp> {
        match self.current_kind() {
            TokenKind::AssignAdd => Some(BinOp::Add),
            TokenKind::AssignSub => Some(BinOp::Sub),
            TokenKind::AssignMul => Some(BinOp::Mul),
            TokenKind::AssignDiv => Some(BinOp::Div),
            TokenKind::AssignMod => Some(BinOp::Mod),
            _ => None,
        }
    }

    fn expr_as_assign_target(expr: &Expr) -> Option<AssignTarget> {
        match expr {
            Expr::Identifier(sym, _) => Some(AssignTarget::Identifier(*sym)),
            Expr::Member { target, member, .. } => Some(AssignTarget::Member(target.clone(), *member)),
            Expr::Index { target, index, .. } => Some(AssignTarget::Index(target.clone(), index.clone())),
            _ => None,
        }
    }
}
