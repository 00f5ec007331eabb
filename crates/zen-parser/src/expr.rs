//! Pratt (precedence-climbing) expression parsing and the paren-free call
//! disambiguation rule (§4.5), the hardest single rule in the grammar.
//!
//! # Precedence (low → high)
//!
//! | Level | Operators | Associativity |
//! |---|---|---|
//! | 1 | `? :` ternary | right |
//! | 2 | `??` | left |
//! | 3 | `or`, `\|\|` | left |
//! | 4 | `and`, `&&` | left |
//! | 5 | `=`, `!=` | left |
//! | 6 | `<`, `>`, `<=`, `>=` | left |
//! | 7 | `..`, `..=` | left (non-assoc in practice) |
//! | 8 | `+`, `-` | left |
//! | 9 | `*`, `/`, `%` | left |
//! | 10 | unary `-`, `not`, `!` | prefix |
//! | 11 | call, `[]`, `.`, `?.` | postfix |

use zen_lexer::TokenKind;
use zen_util::Span;

use crate::ast::{BinOp, Expr, Literal, UnaryOp};
use crate::Parser;

#[doc(hidden)]
pub(crate) mod bp {
    pub const MIN: u8 = 0;
    pub const NULL_COALESCE: u8 = 2;
    pub const OR: u8 = 4;
    pub const AND: u8 = 6;
    pub const EQUALITY: u8 = 8;
    pub const RELATIONAL: u8 = 10;
    pub const RANGE: u8 = 12;
    pub const ADDITIVE: u8 = 14;
    pub const MULTIPLICATIVE: u8 = 16;
}

enum Combinator {
    Bin(BinOp),
    NullCoalesce,
    Range { inclusive: bool },
}

fn binding_power(kind: TokenKind) -> Option<(Combinator, u8, u8)> {
    Some(match kind {
        TokenKind::NullCoalesce => (Combinator::NullCoalesce, bp::NULL_COALESCE, bp::NULL_COALESCE + 1),
        TokenKind::Or | TokenKind::OrOp => (Combinator::Bin(BinOp::Or), bp::OR, bp::OR + 1),
        TokenKind::And | TokenKind::AndOp => (Combinator::Bin(BinOp::And), bp::AND, bp::AND + 1),
        TokenKind::Equals => (Combinator::Bin(BinOp::Eq), bp::EQUALITY, bp::EQUALITY + 1),
        TokenKind::NotEquals => (Combinator::Bin(BinOp::NotEq), bp::EQUALITY, bp::EQUALITY + 1),
        TokenKind::Less => (Combinator::Bin(BinOp::Less), bp::RELATIONAL, bp::RELATIONAL + 1),
        TokenKind::Greater => (Combinator::Bin(BinOp::Greater), bp::RELATIONAL, bp::RELATIONAL + 1),
        TokenKind::LessEquals => (Combinator::Bin(BinOp::LessEq), bp::RELATIONAL, bp::RELATIONAL + 1),
        TokenKind::GreaterEquals => (Combinator::Bin(BinOp::GreaterEq), bp::RELATIONAL, bp::RELATIONAL + 1),
        TokenKind::Range => (Combinator::Range { inclusive: false }, bp::RANGE, bp::RANGE + 1),
        TokenKind::RangeInclusive => (Combinator::Range { inclusive: true }, bp::RANGE, bp::RANGE + 1),
        TokenKind::Plus => (Combinator::Bin(BinOp::Add), bp::ADDITIVE, bp::ADDITIVE + 1),
        TokenKind::Minus => (Combinator::Bin(BinOp::Sub), bp::ADDITIVE, bp::ADDITIVE + 1),
        TokenKind::Star => (Combinator::Bin(BinOp::Mul), bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1),
        TokenKind::Slash => (Combinator::Bin(BinOp::Div), bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1),
        TokenKind::Percent => (Combinator::Bin(BinOp::Mod), bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1),
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Full expression, including the ternary operator at the bottom of
    /// the precedence table.
    pub(crate) fn parse_expr(&mut self) -> Expr {
        let condition = self.parse_binary(bp::MIN);
        if self.eat(TokenKind::Question) {
            let then_expr = self.parse_expr();
            self.expect(TokenKind::Colon, "':' in ternary expression");
            let else_expr = self.parse_expr();
            let span = condition.span();
            return Expr::Ternary {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            };
        }
        condition
    }

    fn parse_binary(&mut self, min_bp: u8) -> Expr {
        let mut left = self.parse_unary();

        loop {
            let Some((combinator, left_bp, right_bp)) = binding_power(self.current_kind()) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            let op_span = self.advance().span;
            let right = self.parse_binary(right_bp);
            let span = Span::with_file(
                left.span().start,
                right.span().end.max(op_span.end),
                left.span().file_id,
                left.span().line,
                left.span().column,
            );
            left = match combinator {
                Combinator::Bin(op) => Expr::BinaryOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                },
                Combinator::NullCoalesce => Expr::NullCoalesce {
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                },
                Combinator::Range { inclusive } => Expr::Range {
                    start: Box::new(left),
                    end: Box::new(right),
                    inclusive,
                    span,
                },
            };
        }

        left
    }

    fn parse_unary(&mut self) -> Expr {
        match self.current_kind() {
            TokenKind::Minus => {
                let tok = self.advance();
                let operand = self.parse_unary();
                let span = Span::with_file(
                    tok.span.start,
                    operand.span().end,
                    tok.span.file_id,
                    tok.span.line,
                    tok.span.column,
                );
                Expr::UnaryOp {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                    span,
                }
            }
            TokenKind::Not | TokenKind::NotOp => {
                let tok = self.advance();
                let operand = self.parse_unary();
                let span = Span::with_file(
                    tok.span.start,
                    operand.span().end,
                    tok.span.file_id,
                    tok.span.line,
                    tok.span.column,
                );
                Expr::UnaryOp {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                    span,
                }
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Expr {
        let mut expr = self.parse_atom();

        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let name_tok = self.expect(TokenKind::Identifier, "member name after '.'");
                    let span = Span::with_file(
                        expr.span().start,
                        name_tok.span.end,
                        expr.span().file_id,
                        expr.span().line,
                        expr.span().column,
                    );
                    expr = Expr::Member {
                        target: Box::new(expr),
                        member: name_tok.as_symbol(),
                        span,
                    };
                }
                TokenKind::OptionalChain => {
                    self.advance();
                    let name_tok = self.expect(TokenKind::Identifier, "member name after '?.'");
                    let span = Span::with_file(
                        expr.span().start,
                        name_tok.span.end,
                        expr.span().file_id,
                        expr.span().line,
                        expr.span().column,
                    );
                    expr = Expr::OptionalChain {
                        object: Box::new(expr),
                        member: name_tok.as_symbol(),
                        span,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr();
                    let end_tok = self.expect(TokenKind::RBracket, "']'");
                    let span = Span::with_file(
                        expr.span().start,
                        end_tok.span.end,
                        expr.span().file_id,
                        expr.span().line,
                        expr.span().column,
                    );
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        args.push(self.parse_expr());
                        while self.eat(TokenKind::Comma) {
                            args.push(self.parse_expr());
                        }
                    }
                    let end_tok = self.expect(TokenKind::RParen, "')'");
                    let span = Span::with_file(
                        expr.span().start,
                        end_tok.span.end,
                        expr.span().file_id,
                        expr.span().line,
                        expr.span().column,
                    );
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                        span,
                    };
                    break;
                }
                _ => {
                    if expr.is_callable_head() && self.looks_like_call_argument() {
                        let span = expr.span();
                        let args = self.parse_paren_free_args();
                        expr = Expr::Call {
                            callee: Box::new(expr),
                            args,
                            span,
                        };
                    }
                    break;
                }
            }
        }

        expr
    }

    /// The paren-free call disambiguation rule: the next token can begin
    /// an argument, with one wrinkle — `-` only counts if it directly
    /// abuts a digit with no space (`f -1` is a call with argument `-1`;
    /// `f - 1` is binary subtraction).
    pub(crate) fn looks_like_call_argument(&mut self) -> bool {
        match self.current_kind() {
            TokenKind::Minus => {
                let minus_span = self.current().span;
                self.peek_kind(1) == TokenKind::Number
                    && minus_span.end == self.lexer.peek(1).span.start
            }
            kind => kind.can_start_argument(),
        }
    }

    /// Gathers comma-separated expressions for a paren-free call until the
    /// statement boundary (NEWLINE/DEDENT/EOF) or an enclosing `)`/`]`.
    pub(crate) fn parse_paren_free_args(&mut self) -> Vec<Expr> {
        let mut args = vec![self.parse_expr()];
        while self.eat(TokenKind::Comma) {
            args.push(self.parse_expr());
        }
        args
    }

    fn parse_atom(&mut self) -> Expr {
        let span = self.current().span;
        match self.current_kind() {
            TokenKind::Number => {
                let tok = self.advance();
                let value: f64 = tok.text.parse().unwrap_or(f64::NAN);
                Expr::Literal(Literal::Number(value.into()), tok.span)
            }
            TokenKind::String => {
                let tok = self.advance();
                Expr::Literal(Literal::String(tok.text), tok.span)
            }
            TokenKind::True => {
                let tok = self.advance();
                Expr::Literal(Literal::Boolean(true), tok.span)
            }
            TokenKind::False => {
                let tok = self.advance();
                Expr::Literal(Literal::Boolean(false), tok.span)
            }
            TokenKind::Null => {
                let tok = self.advance();
                Expr::Literal(Literal::Null, tok.span)
            }
            TokenKind::Identifier => {
                let tok = self.advance();
                Expr::Identifier(tok.as_symbol(), tok.span)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                self.expect(TokenKind::RParen, "')'");
                inner
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Spread => {
                self.advance();
                let inner = self.parse_unary();
                Expr::Spread(Box::new(inner), span)
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Function => self.parse_lambda(),
            _ => {
                let found = self.current_kind();
                self.error(span, format!("expected an expression, found {found:?}"));
                self.advance();
                Expr::Literal(Literal::Null, span)
            }
        }
    }

    fn parse_array_literal(&mut self) -> Expr {
        let start_span = self.advance().span; // '['
        let mut elements = Vec::new();
        if !self.check(TokenKind::RBracket) {
            elements.push(self.parse_expr());
            while self.eat(TokenKind::Comma) {
                if self.check(TokenKind::RBracket) {
                    break;
                }
                elements.push(self.parse_expr());
            }
        }
        let end_tok = self.expect(TokenKind::RBracket, "']'");
        let span = Span::with_file(
            start_span.start,
            end_tok.span.end,
            start_span.file_id,
            start_span.line,
            start_span.column,
        );
        Expr::ArrayLiteral(elements, span)
    }

    fn parse_new(&mut self) -> Expr {
        let start_span = self.advance().span; // 'new'
        let name_tok = self.expect(TokenKind::Identifier, "class name after 'new'");
        let mut args = Vec::new();
        if self.check(TokenKind::LParen) {
            self.advance();
            if !self.check(TokenKind::RParen) {
                args.push(self.parse_expr());
                while self.eat(TokenKind::Comma) {
                    args.push(self.parse_expr());
                }
            }
            self.expect(TokenKind::RParen, "')'");
        } else if self.looks_like_call_argument() {
            args = self.parse_paren_free_args();
        }
        Expr::New {
            class_name: name_tok.as_symbol(),
            args,
            span: start_span,
        }
    }

    /// Anonymous function literal: `function <params...> => <expr>`. The
    /// surface grammar never names a lambda syntax explicitly; this reuses
    /// the `function` keyword in expression position plus the otherwise
    /// free `=>` token rather than inventing new punctuation.
    fn parse_lambda(&mut self) -> Expr {
        let start_span = self.advance().span; // 'function'
        let mut params = Vec::new();
        while self.check(TokenKind::Identifier) {
            params.push(self.advance().as_symbol());
        }
        self.expect(TokenKind::Arrow, "'=>'");
        let body = self.parse_expr();
        Expr::Lambda {
            params,
            body: Box::new(body),
            span: start_span,
        }
    }
}
