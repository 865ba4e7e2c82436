//! Abstract syntax tree produced by the parser.
//!
//! The tree is expression-oriented: a `Program` is just an ordered list of
//! top-level expressions, and there is no separate "statement" node —
//! even an assignment or a block is an `Expr` that produces a value.
//! Structural operators (`Call`, `Index`, `Dot`, `Assign` and its
//! compound-assign siblings, `Range`) are ordinary `Binary` nodes; what
//! makes them "structural" is that the evaluator dispatches on the
//! *shape* of their operands rather than eagerly evaluating both sides
//! (see `mini-eval`).

use mini_util::{Span, Symbol};

pub type Program = Vec<Expr>;

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Leaf value kinds, matching the semantic tags the evaluator constructs
/// `ValueAtom`s from.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicKind {
    Identifier(Symbol),
    Str(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Binary operator tags. `Call`, `Index`, `Dot`, `Range`, `Assign` and the
/// compound-assigns are "structural": `mini-eval` decides what they mean
/// from the shape of their operands rather than evaluating both sides and
/// combining. `Not` here is the infix form the lexer's precedence table
/// admits (`a ! b` parses, mirroring `precedence_binary_left["NOT"]` in
/// the original); the evaluator has no binary case for it and always
/// rejects it with a type error — preserved because nothing currently
/// constructs it from valid surface syntax, but rejecting at parse time
/// would be inventing behavior the original didn't specify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
    Not,
    Range,
    Call,
    Index,
    Dot,
    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    PowEq,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::LtEq => "<=",
            BinOp::GtEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Not => "!",
            BinOp::Range => "..",
            BinOp::Call => "CALL",
            BinOp::Index => "INDEX",
            BinOp::Dot => ".",
            BinOp::Assign => "=",
            BinOp::PlusEq => "+=",
            BinOp::MinusEq => "-=",
            BinOp::StarEq => "*=",
            BinOp::SlashEq => "/=",
            BinOp::PercentEq => "%=",
            BinOp::PowEq => "^=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Atomic(AtomicKind),
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    /// A fresh-scope sequence of expressions; evaluates to its last
    /// element (or `unit` if empty).
    Block(Vec<Expr>),
    Lambda {
        params: Vec<Symbol>,
        body: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_body: Box<Expr>,
        else_ifs: Vec<(Expr, Expr)>,
        else_body: Option<Box<Expr>>,
    },
    Unary {
        op: UnaryOp,
        rhs: Box<Expr>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Only ever appears as the right operand of an `Index` binary node.
    Slice {
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
    },
}
