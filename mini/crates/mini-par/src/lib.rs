//! Recursive-descent / Pratt parser for the `mini` expression language.
//!
//! # Grammar shape
//!
//! There is no separate statement grammar: a program is a sequence of
//! expressions (optionally semicolon-separated), and everything —
//! assignment, blocks, control flow — is itself an expression.
//!
//! Parsing happens in four layers, from loosest to tightest binding:
//!
//! 1. [`Parser::parse_expression`] — handles the two operator families that
//!    don't fit the generic precedence table: assignment (`=` and the
//!    compound-assigns) and `..` ranges. Both are checked once, right
//!    after the inner layers have produced a complete operand, and both
//!    recurse into a fresh `parse_expression` for their right side rather
//!    than climbing — they bind looser than everything else and don't
//!    chain.
//! 2. [`Parser::continue_binary`] — classic precedence climbing over
//!    arithmetic, comparison and logical operators.
//! 3. [`Parser::parse_unary`] — prefix `-` and `!`/`not`.
//! 4. [`Parser::parse_postfix`] — left-to-right `CALL`/`INDEX`/`.` chains
//!    applied to a primary expression.
//!
//! The binding-power table folds the reference implementation's two
//! separate (left-associative, right-associative) dictionaries into one
//! `(power, Assoc)` table; a `match` over `Assoc` at each climb step does
//! the job both dictionaries did there.

mod ast;

pub use ast::*;

use mini_lex::{Keyword, LexError, Lexer, Token, TokenKind};
use mini_util::{Span, Symbol};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Syntax Error at {span}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Syntax Error at {span}: '{keyword}' is not implemented")]
    NotImplemented { keyword: &'static str, span: Span },

    #[error("Syntax Error at {span}: lambda parameters must be identifiers")]
    InvalidLambdaParam { span: Span },
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// Streaming parser over a `Lexer`, with one token of lookahead (shared
/// with the lexer's own peek cache).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut exprs = Vec::new();
        while !self.lexer.is_done()? {
            exprs.push(self.parse_expression()?);
            if matches!(self.peek()?.kind, TokenKind::Semicolon) {
                self.advance()?;
            }
        }
        Ok(exprs)
    }

    fn peek(&mut self) -> ParseResult<Token> {
        Ok(self.lexer.peek_token(false)?)
    }

    fn advance(&mut self) -> ParseResult<Token> {
        Ok(self.lexer.next_token(false)?)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        let t = self.advance()?;
        if t.kind == kind {
            Ok(t)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.describe().to_string(),
                found: t.kind.describe().to_string(),
                span: t.span,
            })
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<(Symbol, Span)> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::Identifier(sym) => Ok((sym, t.span)),
            other => Err(ParseError::UnexpectedToken {
                expected: "IDENTIFIER".to_string(),
                found: other.describe().to_string(),
                span: t.span,
            }),
        }
    }

    // ---- assignment family & range -----------------------------------

    fn assign_op_for(kind: &TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::Assign => BinOp::Assign,
            TokenKind::PlusEq => BinOp::PlusEq,
            TokenKind::MinusEq => BinOp::MinusEq,
            TokenKind::StarEq => BinOp::StarEq,
            TokenKind::SlashEq => BinOp::SlashEq,
            TokenKind::PercentEq => BinOp::PercentEq,
            TokenKind::CaretEq => BinOp::PowEq,
            _ => return None,
        })
    }

    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_unary()?;

        if let Some(op) = Self::assign_op_for(&self.peek()?.kind) {
            self.advance()?;
            let rhs = self.parse_expression()?;
            let span = lhs.span.merge(rhs.span);
            return Ok(Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            ));
        }

        if matches!(self.peek()?.kind, TokenKind::Range) {
            self.advance()?;
            let rhs = self.parse_expression()?;
            let span = lhs.span.merge(rhs.span);
            return Ok(Expr::new(
                ExprKind::Binary {
                    op: BinOp::Range,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            ));
        }

        self.continue_binary(lhs, 0)
    }

    // ---- precedence climb ---------------------------------------------

    fn binding_power(kind: &TokenKind) -> Option<(u8, Assoc)> {
        use TokenKind::*;
        Some(match kind {
            Caret => (30, Assoc::Left),
            Not => (30, Assoc::Left),
            Star | Slash | Percent => (20, Assoc::Left),
            Plus | Minus => (10, Assoc::Left),
            EqEq | NotEq | Lt | Gt | LtEq | GtEq => (5, Assoc::Left),
            And => (20, Assoc::Right),
            Or => (10, Assoc::Right),
            _ => return None,
        })
    }

    fn binop_for(kind: &TokenKind) -> BinOp {
        match kind {
            TokenKind::Caret => BinOp::Pow,
            TokenKind::Not => BinOp::Not,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::NotEq,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::LtEq => BinOp::LtEq,
            TokenKind::GtEq => BinOp::GtEq,
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            other => unreachable!("{other:?} has no binding power entry"),
        }
    }

    fn continue_binary(&mut self, mut lhs: Expr, min_bp: u8) -> ParseResult<Expr> {
        loop {
            let kind = self.peek()?.kind;
            let Some((bp, assoc)) = Self::binding_power(&kind) else {
                break;
            };
            if bp < min_bp {
                break;
            }
            let op = Self::binop_for(&kind);
            self.advance()?;
            let next_min = match assoc {
                Assoc::Left => bp + 1,
                Assoc::Right => bp,
            };
            let rhs = self.parse_unary()?;
            let rhs = self.continue_binary(rhs, next_min)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }
        Ok(lhs)
    }

    // ---- unary ----------------------------------------------------------

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let t = self.peek()?;
        match t.kind {
            TokenKind::Minus => {
                self.advance()?;
                let rhs = self.parse_unary()?;
                let span = t.span.merge(rhs.span);
                Ok(Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Neg,
                        rhs: Box::new(rhs),
                    },
                    span,
                ))
            }
            TokenKind::Not => {
                self.advance()?;
                let rhs = self.parse_unary()?;
                let span = t.span.merge(rhs.span);
                Ok(Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Not,
                        rhs: Box::new(rhs),
                    },
                    span,
                ))
            }
            _ => self.parse_postfix(),
        }
    }

    // ---- postfix: CALL / INDEX / DOT chains -----------------------------

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut node = self.parse_primary()?;
        loop {
            match self.peek()?.kind {
                TokenKind::Call => {
                    self.advance()?;
                    let args_start = node.span;
                    let args = self.parse_expr_list(TokenKind::RParen)?;
                    let end = self.expect(TokenKind::RParen)?.span;
                    let args_span = args_start.merge(end);
                    let span = node.span.merge(end);
                    node = Expr::new(
                        ExprKind::Binary {
                            op: BinOp::Call,
                            lhs: Box::new(node),
                            rhs: Box::new(Expr::new(ExprKind::Tuple(args), args_span)),
                        },
                        span,
                    );
                }
                TokenKind::Index => {
                    self.advance()?;
                    let index_expr = self.parse_index_body()?;
                    let end = self.expect(TokenKind::RBracket)?.span;
                    let span = node.span.merge(end);
                    node = Expr::new(
                        ExprKind::Binary {
                            op: BinOp::Index,
                            lhs: Box::new(node),
                            rhs: Box::new(index_expr),
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance()?;
                    let (name, name_span) = self.expect_identifier()?;
                    let span = node.span.merge(name_span);
                    node = Expr::new(
                        ExprKind::Binary {
                            op: BinOp::Dot,
                            lhs: Box::new(node),
                            rhs: Box::new(Expr::new(ExprKind::Atomic(AtomicKind::Identifier(name)), name_span)),
                        },
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_index_body(&mut self) -> ParseResult<Expr> {
        let first = self.parse_expression()?;
        if matches!(self.peek()?.kind, TokenKind::Colon) {
            self.advance()?;
            let end = self.parse_expression()?;
            let step = if matches!(self.peek()?.kind, TokenKind::Colon) {
                self.advance()?;
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };
            let span = first.span.merge(end.span);
            Ok(Expr::new(
                ExprKind::Slice {
                    start: Box::new(first),
                    end: Box::new(end),
                    step,
                },
                span,
            ))
        } else {
            Ok(first)
        }
    }

    // ---- primary --------------------------------------------------------

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::Number(n) => Ok(Expr::new(ExprKind::Atomic(AtomicKind::Number(n)), t.span)),
            TokenKind::Str(s) => Ok(Expr::new(ExprKind::Atomic(AtomicKind::Str(s)), t.span)),
            TokenKind::Bool(b) => Ok(Expr::new(ExprKind::Atomic(AtomicKind::Bool(b)), t.span)),
            TokenKind::Identifier(sym) => Ok(Expr::new(ExprKind::Atomic(AtomicKind::Identifier(sym)), t.span)),
            TokenKind::Keyword(Keyword::If) => self.parse_if(t.span),
            TokenKind::Keyword(kw) => Err(ParseError::NotImplemented {
                keyword: kw.as_str(),
                span: t.span,
            }),
            TokenKind::LParen => self.parse_paren_or_lambda(t.span),
            TokenKind::LBracket => self.parse_list(t.span),
            TokenKind::LBrace => self.parse_brace(t.span),
            TokenKind::HashBrace => self.parse_hash_brace(t.span),
            other => Err(ParseError::UnexpectedToken {
                expected: "an expression".to_string(),
                found: other.describe().to_string(),
                span: t.span,
            }),
        }
    }

    fn parse_expr_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.peek()?.kind == end {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if matches!(self.peek()?.kind, TokenKind::Comma) {
                self.advance()?;
                if self.peek()?.kind == end {
                    break;
                }
            } else {
                break;
            }
        }
        Ok(items)
    }

    /// `(` already consumed. Disambiguates a parenthesized/tuple group
    /// from a lambda by looking for a trailing `=>` — mirrors
    /// `__parse_primary`'s `RIGHTARROW` check in the reference lexer,
    /// generalized to any arity (including zero, for `() => expr`).
    fn parse_paren_or_lambda(&mut self, start: Span) -> ParseResult<Expr> {
        let elements = self.parse_expr_list(TokenKind::RParen)?;
        let close = self.expect(TokenKind::RParen)?.span;
        let span = start.merge(close);

        if matches!(self.peek()?.kind, TokenKind::RightArrow) {
            self.advance()?;
            let params = elements
                .into_iter()
                .map(|e| match e.kind {
                    ExprKind::Atomic(AtomicKind::Identifier(sym)) => Ok(sym),
                    _ => Err(ParseError::InvalidLambdaParam { span: e.span }),
                })
                .collect::<ParseResult<Vec<_>>>()?;
            let body = self.parse_expression()?;
            let span = span.merge(body.span);
            return Ok(Expr::new(
                ExprKind::Lambda {
                    params,
                    body: Box::new(body),
                },
                span,
            ));
        }

        Ok(Expr::new(ExprKind::Tuple(elements), span))
    }

    fn parse_list(&mut self, start: Span) -> ParseResult<Expr> {
        let elements = self.parse_expr_list(TokenKind::RBracket)?;
        let close = self.expect(TokenKind::RBracket)?.span;
        Ok(Expr::new(ExprKind::List(elements), start.merge(close)))
    }

    /// `{` already consumed. A plain brace is either a map literal
    /// (`{ key: value, ... }`) or a block (`{ expr; expr }`); there is no
    /// dedicated token telling them apart, so the parser commits after
    /// seeing whether a `:` follows the first element. `#{` (below)
    /// sidesteps the ambiguity entirely and is always a map.
    fn parse_brace(&mut self, start: Span) -> ParseResult<Expr> {
        if matches!(self.peek()?.kind, TokenKind::RBrace) {
            let close = self.advance()?.span;
            return Ok(Expr::new(ExprKind::Block(Vec::new()), start.merge(close)));
        }

        let first = self.parse_expression()?;
        if matches!(self.peek()?.kind, TokenKind::Colon) {
            self.advance()?;
            let value = self.parse_expression()?;
            let mut pairs = vec![(first, value)];
            while matches!(self.peek()?.kind, TokenKind::Comma) {
                self.advance()?;
                if matches!(self.peek()?.kind, TokenKind::RBrace) {
                    break;
                }
                let key = self.parse_expression()?;
                self.expect(TokenKind::Colon)?;
                let value = self.parse_expression()?;
                pairs.push((key, value));
            }
            let close = self.expect(TokenKind::RBrace)?.span;
            Ok(Expr::new(ExprKind::Map(pairs), start.merge(close)))
        } else {
            let mut exprs = vec![first];
            while matches!(self.peek()?.kind, TokenKind::Semicolon) {
                self.advance()?;
                if matches!(self.peek()?.kind, TokenKind::RBrace) {
                    break;
                }
                exprs.push(self.parse_expression()?);
            }
            let close = self.expect(TokenKind::RBrace)?.span;
            Ok(Expr::new(ExprKind::Block(exprs), start.merge(close)))
        }
    }

    fn parse_hash_brace(&mut self, start: Span) -> ParseResult<Expr> {
        if matches!(self.peek()?.kind, TokenKind::RBrace) {
            let close = self.advance()?.span;
            return Ok(Expr::new(ExprKind::Map(Vec::new()), start.merge(close)));
        }
        let key = self.parse_expression()?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_expression()?;
        let mut pairs = vec![(key, value)];
        while matches!(self.peek()?.kind, TokenKind::Comma) {
            self.advance()?;
            if matches!(self.peek()?.kind, TokenKind::RBrace) {
                break;
            }
            let key = self.parse_expression()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression()?;
            pairs.push((key, value));
        }
        let close = self.expect(TokenKind::RBrace)?.span;
        Ok(Expr::new(ExprKind::Map(pairs), start.merge(close)))
    }

    /// `if` keyword already consumed. Accepts either `LParen` or `Call` for
    /// the condition's opening paren, since the lexer classifies `(` by
    /// the raw previous character and `if(x)` (no space) lexes the same
    /// way a call would.
    fn parse_if(&mut self, start: Span) -> ParseResult<Expr> {
        self.expect_open_paren()?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_body = self.parse_expression()?;

        let mut else_ifs = Vec::new();
        let mut else_body = None;
        let mut end_span = then_body.span;

        while matches!(self.peek()?.kind, TokenKind::Keyword(Keyword::Else)) {
            self.advance()?;
            if matches!(self.peek()?.kind, TokenKind::Keyword(Keyword::If)) {
                self.advance()?;
                self.expect_open_paren()?;
                let cond = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_expression()?;
                end_span = body.span;
                else_ifs.push((cond, body));
            } else {
                let body = self.parse_expression()?;
                end_span = body.span;
                else_body = Some(Box::new(body));
                break;
            }
        }

        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_body: Box::new(then_body),
                else_ifs,
                else_body,
            },
            start.merge(end_span),
        ))
    }

    fn expect_open_paren(&mut self) -> ParseResult<Span> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::LParen | TokenKind::Call => Ok(t.span),
            other => Err(ParseError::UnexpectedToken {
                expected: "(".to_string(),
                found: other.describe().to_string(),
                span: t.span,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Program {
        Parser::new(src).parse_program().expect("parse error")
    }

    fn one(src: &str) -> Expr {
        let mut p = parse(src);
        assert_eq!(p.len(), 1);
        p.pop().unwrap()
    }

    #[test]
    fn arithmetic_precedence() {
        // 1 + 2 * 3 -> Add(1, Mul(2, 3))
        let e = one("1 + 2 * 3");
        match e.kind {
            ExprKind::Binary { op: BinOp::Add, rhs, .. } => match rhs.kind {
                ExprKind::Binary { op: BinOp::Mul, .. } => {}
                other => panic!("expected nested Mul, got {other:?}"),
            },
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn power_is_left_associative() {
        // 2 ^ 3 ^ 2 -> Pow(Pow(2,3),2), preserving the original's
        // surprising left-to-right power chaining.
        let e = one("2 ^ 3 ^ 2");
        match e.kind {
            ExprKind::Binary { op: BinOp::Pow, lhs, .. } => match lhs.kind {
                ExprKind::Binary { op: BinOp::Pow, .. } => {}
                other => panic!("expected nested Pow on the left, got {other:?}"),
            },
            other => panic!("expected Pow, got {other:?}"),
        }
    }

    #[test]
    fn and_or_are_right_associative() {
        let e = one("a and b and c");
        match e.kind {
            ExprKind::Binary { op: BinOp::And, rhs, .. } => match rhs.kind {
                ExprKind::Binary { op: BinOp::And, .. } => {}
                other => panic!("expected nested And on the right, got {other:?}"),
            },
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn call_after_identifier() {
        let e = one("f(1, 2)");
        match e.kind {
            ExprKind::Binary { op: BinOp::Call, rhs, .. } => match rhs.kind {
                ExprKind::Tuple(args) => assert_eq!(args.len(), 2),
                other => panic!("expected Tuple args, got {other:?}"),
            },
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn space_before_paren_is_not_a_call() {
        let prog = parse("f (1)");
        assert_eq!(prog.len(), 2);
        assert!(matches!(prog[0].kind, ExprKind::Atomic(AtomicKind::Identifier(_))));
        assert!(matches!(prog[1].kind, ExprKind::Tuple(_)));
    }

    #[test]
    fn postfix_chain() {
        let e = one("a.b[0](x)");
        match e.kind {
            ExprKind::Binary { op: BinOp::Call, lhs, .. } => match lhs.kind {
                ExprKind::Binary { op: BinOp::Index, lhs, .. } => match lhs.kind {
                    ExprKind::Binary { op: BinOp::Dot, .. } => {}
                    other => panic!("expected Dot innermost, got {other:?}"),
                },
                other => panic!("expected Index in the middle, got {other:?}"),
            },
            other => panic!("expected Call outermost, got {other:?}"),
        }
    }

    #[test]
    fn lambda_detection() {
        let e = one("(a, b) => a + b");
        match e.kind {
            ExprKind::Lambda { params, .. } => assert_eq!(params.len(), 2),
            other => panic!("expected Lambda, got {other:?}"),
        }
    }

    #[test]
    fn zero_arity_lambda() {
        let e = one("() => 1");
        match e.kind {
            ExprKind::Lambda { params, .. } => assert!(params.is_empty()),
            other => panic!("expected Lambda, got {other:?}"),
        }
    }

    #[test]
    fn single_element_tuple_stays_a_tuple_node() {
        // Collapse to the bare element is the evaluator's job, not the
        // parser's; the AST always records a Tuple of length 1 here.
        let e = one("(1)");
        match e.kind {
            ExprKind::Tuple(elems) => assert_eq!(elems.len(), 1),
            other => panic!("expected Tuple, got {other:?}"),
        }
    }

    #[test]
    fn assignment_binds_loosely() {
        let e = one("x = 1 + 2");
        match e.kind {
            ExprKind::Binary { op: BinOp::Assign, rhs, .. } => {
                assert!(matches!(rhs.kind, ExprKind::Binary { op: BinOp::Add, .. }));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn compound_assign_is_recognized() {
        let e = one("x += 1");
        assert!(matches!(e.kind, ExprKind::Binary { op: BinOp::PlusEq, .. }));
    }

    #[test]
    fn dotted_assignment_target() {
        let e = one("a.b = 1");
        match e.kind {
            ExprKind::Binary { op: BinOp::Assign, lhs, .. } => {
                assert!(matches!(lhs.kind, ExprKind::Binary { op: BinOp::Dot, .. }));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn range_literal() {
        let e = one("(1..4)");
        match e.kind {
            ExprKind::Tuple(mut elems) if elems.len() == 1 => {
                assert!(matches!(elems.pop().unwrap().kind, ExprKind::Binary { op: BinOp::Range, .. }));
            }
            other => panic!("expected a one-element tuple wrapping Range, got {other:?}"),
        }
    }

    #[test]
    fn map_literal() {
        let e = one(r#"{"a": 1, "b": 2}"#);
        match e.kind {
            ExprKind::Map(pairs) => assert_eq!(pairs.len(), 2),
            other => panic!("expected Map, got {other:?}"),
        }
    }

    #[test]
    fn hash_brace_map_literal_is_unambiguous_even_when_empty() {
        let e = one("#{}");
        assert!(matches!(e.kind, ExprKind::Map(pairs) if pairs.is_empty()));
    }

    #[test]
    fn block_literal() {
        let e = one("{ 1; 2; 3 }");
        match e.kind {
            ExprKind::Block(exprs) => assert_eq!(exprs.len(), 3),
            other => panic!("expected Block, got {other:?}"),
        }
    }

    #[test]
    fn empty_block_is_unit_producing() {
        let e = one("{}");
        assert!(matches!(e.kind, ExprKind::Block(exprs) if exprs.is_empty()));
    }

    #[test]
    fn if_else_if_else_chain() {
        let e = one(r#"if (1 < 2) { "yes" } else if (1 > 2) { "no" } else { "maybe" }"#);
        match e.kind {
            ExprKind::If { else_ifs, else_body, .. } => {
                assert_eq!(else_ifs.len(), 1);
                assert!(else_body.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn slice_index() {
        let e = one("xs[1:3]");
        match e.kind {
            ExprKind::Binary { op: BinOp::Index, rhs, .. } => {
                assert!(matches!(rhs.kind, ExprKind::Slice { step: None, .. }));
            }
            other => panic!("expected Index, got {other:?}"),
        }
    }

    #[test]
    fn slice_with_step() {
        let e = one("xs[0:10:2]");
        match e.kind {
            ExprKind::Binary { op: BinOp::Index, rhs, .. } => {
                assert!(matches!(rhs.kind, ExprKind::Slice { step: Some(_), .. }));
            }
            other => panic!("expected Index, got {other:?}"),
        }
    }

    #[test]
    fn reserved_keyword_is_rejected() {
        let err = Parser::new("while (true) { 1 }").parse_program().unwrap_err();
        assert!(matches!(err, ParseError::NotImplemented { keyword: "while", .. }));
    }

    #[test]
    fn unary_negation_and_not() {
        let e = one("-x");
        assert!(matches!(e.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
        let e = one("!x");
        assert!(matches!(e.kind, ExprKind::Unary { op: UnaryOp::Not, .. }));
    }
}
