//! Runtime values.
//!
//! `list`/`map` payloads are reference-counted and interior-mutable so
//! that assigning a container into a slot shares it rather than copying
//! it — required for mutation to be observed through every alias,
//! including a closure's captured environment. `tuple` payloads are a
//! plain immutable `Rc<[ValueAtom]>`: nothing in this language ever
//! mutates a tuple element in place, and path-assignment through one is
//! rejected rather than given a (non-existent) safe mutation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use mini_par::Expr;
use mini_util::Symbol;

use crate::builtin::Builtin;
use crate::environment::Environment;

pub type MiniList = Rc<RefCell<Vec<ValueAtom>>>;
pub type MiniMap = Rc<RefCell<IndexMap<String, ValueAtom>>>;

#[derive(Clone)]
pub enum ValueAtom {
    Unit,
    Bool(bool),
    Number(f64),
    Str(String),
    Tuple(Rc<[ValueAtom]>),
    List(MiniList),
    Map(MiniMap),
    Function(Rc<FunctionValue>),
}

pub enum FunctionValue {
    /// A lambda or named-function-definition value: its parameter names,
    /// its body (cloned once out of the parse tree into an `Rc` so every
    /// value sharing this closure shares the allocation, not the clone
    /// cost), and the environment it closed over.
    Closure {
        name: Option<Symbol>,
        params: Vec<Symbol>,
        body: Rc<Expr>,
        env: Environment,
    },
    Builtin(Rc<dyn Builtin>),
}

impl ValueAtom {
    pub fn list(items: Vec<ValueAtom>) -> Self {
        ValueAtom::List(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: IndexMap<String, ValueAtom>) -> Self {
        ValueAtom::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ValueAtom::Unit => "unit",
            ValueAtom::Bool(_) => "bool",
            ValueAtom::Number(_) => "number",
            ValueAtom::Str(_) => "string",
            ValueAtom::Tuple(_) => "tuple",
            ValueAtom::List(_) => "list",
            ValueAtom::Map(_) => "map",
            ValueAtom::Function(_) => "function",
        }
    }

    /// The stringified form used to key a map, and used on the right side
    /// of `DOT`/non-slice `INDEX`. Integer-valued numbers are promoted to
    /// their integer form first so `1` and `1.0` key the same slot.
    pub fn as_key_string(&self) -> Option<String> {
        match self {
            ValueAtom::Str(s) => Some(s.clone()),
            ValueAtom::Bool(b) => Some(b.to_string()),
            ValueAtom::Number(n) if n.fract() == 0.0 && n.is_finite() => Some((*n as i64).to_string()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueAtom::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ValueAtom::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Structural equality. The reference implementation's `Atom` base
    /// class has no `__eq__`, so comparing two `tuple`/`list`/`map`
    /// values there falls back to Python object identity rather than
    /// content — almost certainly an oversight, since nothing in the
    /// language lets two structurally-identical containers end up as the
    /// same object except by aliasing. This implements the comparison by
    /// content, which is the only reading that makes `==` useful.
    pub fn structurally_eq(&self, other: &ValueAtom) -> bool {
        match (self, other) {
            (ValueAtom::Unit, ValueAtom::Unit) => true,
            (ValueAtom::Bool(a), ValueAtom::Bool(b)) => a == b,
            (ValueAtom::Number(a), ValueAtom::Number(b)) => a == b,
            (ValueAtom::Str(a), ValueAtom::Str(b)) => a == b,
            (ValueAtom::Tuple(a), ValueAtom::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structurally_eq(y))
            }
            (ValueAtom::List(a), ValueAtom::List(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structurally_eq(y))
            }
            (ValueAtom::Map(a), ValueAtom::Map(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| v.structurally_eq(bv)))
            }
            _ => false,
        }
    }
}

fn fmt_list(items: &[ValueAtom], open: char, close: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for ValueAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueAtom::Unit => write!(f, "()"),
            ValueAtom::Bool(b) => write!(f, "{b}"),
            ValueAtom::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            ValueAtom::Number(n) => write!(f, "{n}"),
            ValueAtom::Str(s) => write!(f, "'{s}'"),
            ValueAtom::Tuple(items) => fmt_list(items, '(', ')', f),
            ValueAtom::List(items) => fmt_list(&items.borrow(), '[', ']', f),
            ValueAtom::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            ValueAtom::Function(func) => match func.as_ref() {
                FunctionValue::Closure { name: Some(name), params, .. } => {
                    write!(f, "<function {name}(")?;
                    for (i, p) in params.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{p}")?;
                    }
                    write!(f, ")>")
                }
                FunctionValue::Closure { name: None, params, .. } => {
                    write!(f, "<lambda(")?;
                    for (i, p) in params.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{p}")?;
                    }
                    write!(f, ")>")
                }
                FunctionValue::Builtin(b) => write!(f, "<built-in: {}>", b.name()),
            },
        }
    }
}

impl fmt::Debug for ValueAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Used only by `raw_str`-equivalent call sites (string coercion for `+`
/// and `PLUSEQUAL`) that need a value's textual form without the string
/// quoting `Display` adds.
pub fn stringify_unquoted(value: &ValueAtom) -> String {
    match value {
        ValueAtom::Str(s) => s.clone(),
        other => other.to_string(),
    }
}
