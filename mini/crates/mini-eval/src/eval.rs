//! The tree-walking evaluator.
//!
//! `Evaluator` carries no mutable state of its own — every expression is
//! pure recursion over the AST with the environment chain as the only
//! mutable substrate, per the language's single-threaded, fully
//! synchronous execution model. It is a struct rather than free
//! functions only so a future configuration record (a recursion-depth
//! guard, say) has somewhere to live without changing every call site.

use std::rc::Rc;

use indexmap::IndexMap;
use mini_par::{AtomicKind, BinOp, Expr, ExprKind, Program, UnaryOp};
use mini_util::{Span, Symbol};

use crate::builtin::CallContext;
use crate::error::{EvalError, EvalResult};
use crate::environment::Environment;
use crate::value::{stringify_unquoted, FunctionValue, ValueAtom};

#[derive(Default)]
pub struct Evaluator {
    _private: (),
}

impl Evaluator {
    pub fn new() -> Self {
        Self { _private: () }
    }

    pub fn evaluate_program(&self, program: &Program, env: &Environment) -> EvalResult<ValueAtom> {
        self.evaluate_sequence(program, env)
    }

    fn evaluate_sequence(&self, exprs: &[Expr], env: &Environment) -> EvalResult<ValueAtom> {
        let mut result = ValueAtom::Unit;
        for e in exprs {
            result = self.evaluate(e, env)?;
        }
        Ok(result)
    }

    pub fn evaluate(&self, expr: &Expr, env: &Environment) -> EvalResult<ValueAtom> {
        match &expr.kind {
            ExprKind::Atomic(atomic) => self.evaluate_atomic(atomic, env, expr.span),
            ExprKind::Tuple(elems) => self.evaluate_tuple(elems, env),
            ExprKind::List(elems) => {
                let items = elems.iter().map(|e| self.evaluate(e, env)).collect::<EvalResult<Vec<_>>>()?;
                Ok(ValueAtom::list(items))
            }
            ExprKind::Map(pairs) => self.evaluate_map(pairs, env),
            ExprKind::Block(exprs) => {
                let child = env.child("<block>");
                self.evaluate_sequence(exprs, &child)
            }
            ExprKind::Lambda { params, body } => Ok(ValueAtom::Function(Rc::new(FunctionValue::Closure {
                name: None,
                params: params.clone(),
                body: Rc::new((**body).clone()),
                env: env.clone(),
            }))),
            ExprKind::If {
                condition,
                then_body,
                else_ifs,
                else_body,
            } => self.evaluate_if(condition, then_body, else_ifs, else_body, env),
            ExprKind::Unary { op, rhs } => self.evaluate_unary(*op, rhs, env, expr.span),
            ExprKind::Binary { op, lhs, rhs } => self.evaluate_binary(*op, lhs, rhs, env, expr.span),
            ExprKind::Slice { .. } => Err(EvalError::TypeError {
                message: "a slice is only valid as the right operand of indexing".to_string(),
                span: expr.span,
            }),
        }
    }

    fn evaluate_atomic(&self, atomic: &AtomicKind, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        match atomic {
            AtomicKind::Identifier(name) => env.get(*name).ok_or(EvalError::NameError {
                name: name.to_string(),
                span,
            }),
            AtomicKind::Str(s) => Ok(ValueAtom::Str(s.clone())),
            AtomicKind::Number(n) => Ok(ValueAtom::Number(*n)),
            AtomicKind::Bool(b) => Ok(ValueAtom::Bool(*b)),
        }
    }

    /// 0 elements collapses to `unit`, 1 to the bare element; this is why
    /// `(x)` is never a one-element tuple.
    fn evaluate_tuple(&self, elems: &[Expr], env: &Environment) -> EvalResult<ValueAtom> {
        match elems.len() {
            0 => Ok(ValueAtom::Unit),
            1 => self.evaluate(&elems[0], env),
            _ => {
                let items = elems.iter().map(|e| self.evaluate(e, env)).collect::<EvalResult<Vec<_>>>()?;
                Ok(ValueAtom::Tuple(items.into()))
            }
        }
    }

    fn evaluate_map(&self, pairs: &[(Expr, Expr)], env: &Environment) -> EvalResult<ValueAtom> {
        let mut map = IndexMap::new();
        for (key_expr, value_expr) in pairs {
            let key = map_key_string(key_expr)?;
            let value = self.evaluate(value_expr, env)?;
            map.insert(key, value);
        }
        Ok(ValueAtom::map(map))
    }

    fn evaluate_if(
        &self,
        condition: &Expr,
        then_body: &Expr,
        else_ifs: &[(Expr, Expr)],
        else_body: &Option<Box<Expr>>,
        env: &Environment,
    ) -> EvalResult<ValueAtom> {
        if require_condition(self.evaluate(condition, env)?, condition.span)? {
            return self.evaluate(then_body, env);
        }
        for (cond, body) in else_ifs {
            if require_condition(self.evaluate(cond, env)?, cond.span)? {
                return self.evaluate(body, env);
            }
        }
        match else_body {
            Some(body) => self.evaluate(body, env),
            None => Ok(ValueAtom::Unit),
        }
    }

    fn evaluate_unary(&self, op: UnaryOp, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let rhs = self.evaluate(rhs_expr, env)?;
        match op {
            UnaryOp::Neg => rhs.as_number().map(|n| ValueAtom::Number(-n)).ok_or_else(|| EvalError::TypeError {
                message: format!("cannot negate a {}", rhs.type_name()),
                span,
            }),
            UnaryOp::Not => rhs.as_bool().map(|b| ValueAtom::Bool(!b)).ok_or_else(|| EvalError::TypeError {
                message: format!("cannot apply logical not to a {}", rhs.type_name()),
                span,
            }),
        }
    }

    fn evaluate_binary(&self, op: BinOp, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        match op {
            BinOp::Assign => self.evaluate_assignment(lhs_expr, rhs_expr, env, span),
            BinOp::PlusEq | BinOp::MinusEq | BinOp::StarEq | BinOp::SlashEq | BinOp::PercentEq | BinOp::PowEq => {
                self.evaluate_compound_assign(op, lhs_expr, rhs_expr, env, span)
            }
            BinOp::Dot => self.evaluate_dot(lhs_expr, rhs_expr, env, span),
            BinOp::Index => self.evaluate_index(lhs_expr, rhs_expr, env, span),
            BinOp::Call => self.evaluate_call_expr(lhs_expr, rhs_expr, env, span),
            BinOp::Range => self.evaluate_range(lhs_expr, rhs_expr, env, span),
            _ => {
                let lhs = self.evaluate(lhs_expr, env)?;
                let rhs = self.evaluate(rhs_expr, env)?;
                evaluate_value_binary(op, lhs, rhs, span)
            }
        }
    }

    // ---- structural operators --------------------------------------

    fn evaluate_assignment(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        match &lhs_expr.kind {
            ExprKind::Atomic(AtomicKind::Identifier(name)) => {
                let rhs = self.evaluate(rhs_expr, env)?;
                env.set(*name, rhs.clone());
                Ok(rhs)
            }
            ExprKind::Binary {
                op: BinOp::Call,
                lhs: fname_expr,
                rhs: params_expr,
            } => self.evaluate_function_definition(fname_expr, params_expr, rhs_expr, env, span),
            ExprKind::Binary { op: BinOp::Dot, .. } | ExprKind::Binary { op: BinOp::Index, .. } => {
                self.evaluate_path_assignment(lhs_expr, rhs_expr, env, span)
            }
            _ => Err(EvalError::AssignmentError {
                message: "left-hand side is not an identifier, function definition, or member path".to_string(),
                span,
            }),
        }
    }

    /// `name(params) = body` — a named-function definition, recognized by
    /// the shape of the assignment's left operand (a `CALL` node whose
    /// callee is a bare identifier and whose arguments are all
    /// identifiers) rather than by dedicated syntax.
    fn evaluate_function_definition(
        &self,
        fname_expr: &Expr,
        params_expr: &Expr,
        body_expr: &Expr,
        env: &Environment,
        span: Span,
    ) -> EvalResult<ValueAtom> {
        let name = match &fname_expr.kind {
            ExprKind::Atomic(AtomicKind::Identifier(s)) => *s,
            _ => {
                return Err(EvalError::AssignmentError {
                    message: "function name is not an identifier".to_string(),
                    span,
                })
            }
        };
        let param_exprs = match &params_expr.kind {
            ExprKind::Tuple(elems) => elems,
            _ => {
                return Err(EvalError::AssignmentError {
                    message: "function arguments are not a tuple".to_string(),
                    span,
                })
            }
        };
        let mut params = Vec::with_capacity(param_exprs.len());
        for p in param_exprs {
            match &p.kind {
                ExprKind::Atomic(AtomicKind::Identifier(s)) => params.push(*s),
                _ => {
                    return Err(EvalError::AssignmentError {
                        message: "function argument is not an identifier".to_string(),
                        span: p.span,
                    })
                }
            }
        }
        let func = ValueAtom::Function(Rc::new(FunctionValue::Closure {
            name: Some(name),
            params,
            body: Rc::new(body_expr.clone()),
            env: env.clone(),
        }));
        env.set(name, func.clone());
        Ok(func)
    }

    fn evaluate_dot(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let lhs = self.evaluate(lhs_expr, env)?;
        let name = match &rhs_expr.kind {
            ExprKind::Atomic(AtomicKind::Identifier(s)) => s.to_string(),
            _ => {
                return Err(EvalError::TypeError {
                    message: format!("cannot access a member of {} with a non-identifier key", lhs.type_name()),
                    span,
                })
            }
        };
        match &lhs {
            ValueAtom::Map(m) => m.borrow().get(&name).cloned().ok_or(EvalError::KeyError { key: name, span }),
            other => Err(EvalError::TypeError {
                message: format!("cannot access a member of a {}", other.type_name()),
                span,
            }),
        }
    }

    fn evaluate_index(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let lhs = self.evaluate(lhs_expr, env)?;
        if let ExprKind::Slice { start, end, step } = &rhs_expr.kind {
            return self.evaluate_slice(&lhs, start, end, step.as_deref(), env, span);
        }
        let key = self.evaluate(rhs_expr, env)?;
        index_get(&lhs, &key, span)
    }

    fn evaluate_slice(
        &self,
        lhs: &ValueAtom,
        start_e: &Expr,
        end_e: &Expr,
        step_e: Option<&Expr>,
        env: &Environment,
        span: Span,
    ) -> EvalResult<ValueAtom> {
        let start = require_slice_int(&self.evaluate(start_e, env)?, span)?;
        let end = require_slice_int(&self.evaluate(end_e, env)?, span)?;
        let step = match step_e {
            Some(e) => require_slice_int(&self.evaluate(e, env)?, span)?,
            None => 1,
        };
        if step == 0 {
            return Err(EvalError::TypeError {
                message: "slice step cannot be zero".to_string(),
                span,
            });
        }
        match lhs {
            ValueAtom::List(l) => {
                let items = l.borrow();
                let idxs = slice_range(items.len() as i64, start, end, step);
                Ok(ValueAtom::list(idxs.into_iter().map(|i| items[i as usize].clone()).collect()))
            }
            ValueAtom::Tuple(t) => {
                let idxs = slice_range(t.len() as i64, start, end, step);
                let items: Vec<ValueAtom> = idxs.into_iter().map(|i| t[i as usize].clone()).collect();
                Ok(ValueAtom::Tuple(items.into()))
            }
            other => Err(EvalError::TypeError {
                message: format!("cannot slice a {}", other.type_name()),
                span,
            }),
        }
    }

    fn evaluate_range(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let lhs = self.evaluate(lhs_expr, env)?;
        let rhs = self.evaluate(rhs_expr, env)?;
        require_pair(&lhs, &rhs, &["number"], span)?;
        let start = require_int(&lhs, span)?;
        let end = require_int(&rhs, span)?;
        let items = if start < end {
            (start..end).map(|i| ValueAtom::Number(i as f64)).collect()
        } else {
            Vec::new()
        };
        Ok(ValueAtom::list(items))
    }

    fn evaluate_call_expr(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let func = self.evaluate(lhs_expr, env)?;
        let args_value = self.evaluate(rhs_expr, env)?;
        let args = match args_value {
            ValueAtom::Tuple(items) => items.to_vec(),
            ValueAtom::Unit => Vec::new(),
            other => vec![other],
        };
        self.call_function(func, args, span)
    }

    pub fn call_function(&self, func: ValueAtom, args: Vec<ValueAtom>, span: Span) -> EvalResult<ValueAtom> {
        match func {
            ValueAtom::Function(f) => match f.as_ref() {
                FunctionValue::Closure { name, params, body, env: captured } => {
                    if params.len() != args.len() {
                        let label = name.as_ref().map(|n| n.to_string()).unwrap_or_else(|| "<lambda>".to_string());
                        return Err(EvalError::TypeError {
                            message: format!("function '{}' expects {} argument(s) but got {}", label, params.len(), args.len()),
                            span,
                        });
                    }
                    let label = name.as_ref().map(|n| format!("<function {n}>")).unwrap_or_else(|| "<lambda>".to_string());
                    let call_env = captured.child(label);
                    for (p, a) in params.iter().zip(args) {
                        call_env.set(*p, a);
                    }
                    self.evaluate(body, &call_env)
                }
                FunctionValue::Builtin(b) => {
                    let mut callback = |f: ValueAtom, a: Vec<ValueAtom>, s: Span| self.call_function(f, a, s);
                    let mut ctx = CallContext::new(&mut callback);
                    b.call(args, &mut ctx)
                }
            },
            other => Err(EvalError::TypeError {
                message: format!("cannot call a {}", other.type_name()),
                span,
            }),
        }
    }

    // ---- member/index path assignment ------------------------------

    fn evaluate_path_assignment(&self, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        let (base_expr, segments) = self.collect_path(lhs_expr, env)?;
        let root = match &base_expr.kind {
            ExprKind::Atomic(AtomicKind::Identifier(s)) => *s,
            _ => {
                return Err(EvalError::AssignmentError {
                    message: "cannot set a member of a non-identifier value".to_string(),
                    span,
                })
            }
        };
        let mut current = env.get(root).ok_or(EvalError::NameError {
            name: root.to_string(),
            span: base_expr.span,
        })?;
        for seg in &segments[..segments.len() - 1] {
            current = get_member(&current, seg, span)?;
        }
        let rhs = self.evaluate(rhs_expr, env)?;
        set_member(&current, segments.last().expect("path always has at least one segment"), rhs.clone(), span)?;
        Ok(rhs)
    }

    /// Walks a `DOT`/`INDEX` chain (ignoring slice indices, which are
    /// never assignment targets) from the outside in, returning the root
    /// expression and the ordered list of member/index segments.
    fn collect_path<'e>(&self, expr: &'e Expr, env: &Environment) -> EvalResult<(&'e Expr, Vec<PathSegment>)> {
        match &expr.kind {
            ExprKind::Binary { op: BinOp::Dot, lhs, rhs } => {
                let (base, mut segments) = self.collect_path(lhs, env)?;
                let name = match &rhs.kind {
                    ExprKind::Atomic(AtomicKind::Identifier(s)) => s.to_string(),
                    _ => {
                        return Err(EvalError::AssignmentError {
                            message: "member name must be an identifier".to_string(),
                            span: rhs.span,
                        })
                    }
                };
                segments.push(PathSegment::Dot(name));
                Ok((base, segments))
            }
            ExprKind::Binary { op: BinOp::Index, lhs, rhs } if !matches!(rhs.kind, ExprKind::Slice { .. }) => {
                let (base, mut segments) = self.collect_path(lhs, env)?;
                let key = self.evaluate(rhs, env)?;
                segments.push(PathSegment::Index(key));
                Ok((base, segments))
            }
            _ => Ok((expr, Vec::new())),
        }
    }

    fn evaluate_compound_assign(&self, op: BinOp, lhs_expr: &Expr, rhs_expr: &Expr, env: &Environment, span: Span) -> EvalResult<ValueAtom> {
        if !matches!(op, BinOp::PlusEq) {
            return Err(EvalError::NotImplementedOperator { op: op.as_str(), span });
        }
        let name = match &lhs_expr.kind {
            ExprKind::Atomic(AtomicKind::Identifier(s)) => *s,
            _ => {
                return Err(EvalError::AssignmentError {
                    message: "left-hand side of '+=' must be an identifier".to_string(),
                    span,
                })
            }
        };
        let lhs = env.get(name).ok_or(EvalError::NameError {
            name: name.to_string(),
            span,
        })?;
        let rhs = self.evaluate(rhs_expr, env)?;
        require_pair(&lhs, &rhs, &["string", "number"], span)?;
        let result = if matches!(lhs, ValueAtom::Str(_)) || matches!(rhs, ValueAtom::Str(_)) {
            ValueAtom::Str(format!("{}{}", stringify_unquoted(&lhs), stringify_unquoted(&rhs)))
        } else {
            ValueAtom::Number(lhs.as_number().unwrap() + rhs.as_number().unwrap())
        };
        env.set(name, result.clone());
        Ok(result)
    }
}

enum PathSegment {
    Dot(String),
    Index(ValueAtom),
}

fn get_member(container: &ValueAtom, seg: &PathSegment, span: Span) -> EvalResult<ValueAtom> {
    match (container, seg) {
        (ValueAtom::Map(m), PathSegment::Dot(name)) => m.borrow().get(name).cloned().ok_or_else(|| EvalError::KeyError {
            key: name.clone(),
            span,
        }),
        (_, PathSegment::Dot(_)) => Err(EvalError::TypeError {
            message: format!("cannot access a member of a {}", container.type_name()),
            span,
        }),
        (_, PathSegment::Index(key)) => index_get(container, key, span),
    }
}

fn set_member(container: &ValueAtom, seg: &PathSegment, value: ValueAtom, span: Span) -> EvalResult<()> {
    match (container, seg) {
        (ValueAtom::Map(m), PathSegment::Dot(name)) => {
            m.borrow_mut().insert(name.clone(), value);
            Ok(())
        }
        (ValueAtom::Tuple(_), _) => Err(EvalError::ImmutableTarget { kind: "tuple", span }),
        (_, PathSegment::Dot(_)) => Err(EvalError::TypeError {
            message: format!("cannot set a member of a {}", container.type_name()),
            span,
        }),
        (ValueAtom::List(l), PathSegment::Index(key)) => {
            let idx = require_index(key, l.borrow().len(), span)?;
            l.borrow_mut()[idx] = value;
            Ok(())
        }
        (ValueAtom::Map(m), PathSegment::Index(key)) => {
            let k = key.as_key_string().ok_or_else(|| EvalError::TypeError {
                message: "map key must be a string, number, or bool".to_string(),
                span,
            })?;
            m.borrow_mut().insert(k, value);
            Ok(())
        }
        (_, PathSegment::Index(_)) => Err(EvalError::TypeError {
            message: format!("cannot set an index of a {}", container.type_name()),
            span,
        }),
    }
}

fn index_get(container: &ValueAtom, key: &ValueAtom, span: Span) -> EvalResult<ValueAtom> {
    match container {
        ValueAtom::List(l) => {
            let idx = require_index(key, l.borrow().len(), span)?;
            Ok(l.borrow()[idx].clone())
        }
        ValueAtom::Tuple(t) => {
            let idx = require_index(key, t.len(), span)?;
            Ok(t[idx].clone())
        }
        ValueAtom::Map(m) => {
            let k = key.as_key_string().ok_or_else(|| EvalError::TypeError {
                message: "map key must be a string, number, or bool".to_string(),
                span,
            })?;
            m.borrow().get(&k).cloned().ok_or(EvalError::KeyError { key: k, span })
        }
        other => Err(EvalError::TypeError {
            message: format!("cannot index into a {}", other.type_name()),
            span,
        }),
    }
}

fn require_index(key: &ValueAtom, len: usize, span: Span) -> EvalResult<usize> {
    let n = key.as_number().ok_or_else(|| EvalError::TypeError {
        message: "index must be a number".to_string(),
        span,
    })?;
    if n.fract() != 0.0 {
        return Err(EvalError::TypeError {
            message: "index must be an integer-valued number".to_string(),
            span,
        });
    }
    let mut idx = n as i64;
    if idx < 0 {
        idx += len as i64;
    }
    if idx < 0 || idx as usize >= len {
        return Err(EvalError::IndexError {
            message: "index out of range".to_string(),
            span,
        });
    }
    Ok(idx as usize)
}

fn require_slice_int(v: &ValueAtom, span: Span) -> EvalResult<i64> {
    let n = v.as_number().ok_or_else(|| EvalError::TypeError {
        message: "slice indices must be numbers".to_string(),
        span,
    })?;
    if n.fract() != 0.0 {
        return Err(EvalError::TypeError {
            message: "slice indices must be integers".to_string(),
            span,
        });
    }
    Ok(n as i64)
}

fn require_int(v: &ValueAtom, span: Span) -> EvalResult<i64> {
    let n = v.as_number().ok_or_else(|| EvalError::TypeError {
        message: "expected a number".to_string(),
        span,
    })?;
    if n.fract() != 0.0 {
        return Err(EvalError::TypeError {
            message: "range bounds must be integers".to_string(),
            span,
        });
    }
    Ok(n as i64)
}

/// CPython's slice-index-adjustment algorithm, specialized to the case
/// where start/end/step are always explicit (this grammar has no
/// `xs[:2]`-style omitted bounds).
fn slice_range(length: i64, start: i64, end: i64, step: i64) -> Vec<i64> {
    let (start, end) = if step > 0 {
        let start = if start < 0 { (length + start).max(0) } else { start.min(length) };
        let end = if end < 0 { (length + end).max(0) } else { end.min(length) };
        (start, end)
    } else {
        let start = if start < 0 { (length + start).max(-1) } else { start.min(length - 1) };
        let end = if end < 0 { (length + end).max(-1) } else { end.min(length - 1) };
        (start, end)
    };
    let mut out = Vec::new();
    let mut i = start;
    if step > 0 {
        while i < end {
            out.push(i);
            i += step;
        }
    } else {
        while i > end {
            out.push(i);
            i += step;
        }
    }
    out
}

fn require_condition(value: ValueAtom, span: Span) -> EvalResult<bool> {
    value.as_bool().ok_or(EvalError::TypeError {
        message: "condition does not evaluate to a bool".to_string(),
        span,
    })
}

fn map_key_string(key_expr: &Expr) -> EvalResult<String> {
    match &key_expr.kind {
        ExprKind::Atomic(AtomicKind::Identifier(s)) => Ok(s.to_string()),
        ExprKind::Atomic(AtomicKind::Str(s)) => Ok(s.clone()),
        ExprKind::Atomic(AtomicKind::Bool(b)) => Ok(b.to_string()),
        ExprKind::Atomic(AtomicKind::Number(n)) if n.fract() == 0.0 => Ok((*n as i64).to_string()),
        _ => Err(EvalError::TypeError {
            message: "map key must be an identifier, string, integer, or bool".to_string(),
            span: key_expr.span,
        }),
    }
}

fn require_kinds(v: &ValueAtom, allowed: &[&str], span: Span) -> EvalResult<()> {
    if allowed.contains(&v.type_name()) {
        Ok(())
    } else {
        Err(EvalError::TypeError {
            message: format!("expected one of {allowed:?} but got {}", v.type_name()),
            span,
        })
    }
}

fn require_pair(lhs: &ValueAtom, rhs: &ValueAtom, allowed: &[&str], span: Span) -> EvalResult<()> {
    require_kinds(lhs, allowed, span)?;
    require_kinds(rhs, allowed, span)?;
    Ok(())
}

fn values_equal(lhs: &ValueAtom, rhs: &ValueAtom) -> bool {
    lhs.type_name() == rhs.type_name() && lhs.structurally_eq(rhs)
}

/// Python's `%`, where the result takes the sign of the divisor rather
/// than Rust's default (sign of the dividend) — matching the reference
/// implementation's host floating-point semantics.
fn py_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn eval_plus(lhs: ValueAtom, rhs: ValueAtom, span: Span) -> EvalResult<ValueAtom> {
    require_pair(&lhs, &rhs, &["string", "number", "bool", "list", "tuple", "map"], span)?;
    if matches!(lhs, ValueAtom::Str(_)) || matches!(rhs, ValueAtom::Str(_)) {
        Ok(ValueAtom::Str(format!("{}{}", stringify_unquoted(&lhs), stringify_unquoted(&rhs))))
    } else if let (ValueAtom::List(a), ValueAtom::List(b)) = (&lhs, &rhs) {
        let mut items = a.borrow().clone();
        items.extend(b.borrow().iter().cloned());
        Ok(ValueAtom::list(items))
    } else if let (ValueAtom::Number(a), ValueAtom::Number(b)) = (&lhs, &rhs) {
        Ok(ValueAtom::Number(a + b))
    } else if let (ValueAtom::Tuple(a), ValueAtom::Tuple(b)) = (&lhs, &rhs) {
        if a.len() != b.len() {
            return Err(EvalError::TypeError {
                message: format!("tuple size mismatch: {} and {}", a.len(), b.len()),
                span,
            });
        }
        let items = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| eval_plus(x.clone(), y.clone(), span))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(ValueAtom::Tuple(items.into()))
    } else if let (ValueAtom::Map(a), ValueAtom::Map(b)) = (&lhs, &rhs) {
        let mut merged = a.borrow().clone();
        for (k, v) in b.borrow().iter() {
            merged.insert(k.clone(), v.clone());
        }
        Ok(ValueAtom::map(merged))
    } else {
        Err(EvalError::TypeError {
            message: format!("cannot add {} and {}", lhs.type_name(), rhs.type_name()),
            span,
        })
    }
}

fn evaluate_value_binary(op: BinOp, lhs: ValueAtom, rhs: ValueAtom, span: Span) -> EvalResult<ValueAtom> {
    match op {
        BinOp::Add => eval_plus(lhs, rhs, span),
        BinOp::Sub => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Number(lhs.as_number().unwrap() - rhs.as_number().unwrap()))
        }
        BinOp::Mul => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Number(lhs.as_number().unwrap() * rhs.as_number().unwrap()))
        }
        BinOp::Div => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Number(lhs.as_number().unwrap() / rhs.as_number().unwrap()))
        }
        BinOp::Mod => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Number(py_mod(lhs.as_number().unwrap(), rhs.as_number().unwrap())))
        }
        BinOp::Pow => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Number(lhs.as_number().unwrap().powf(rhs.as_number().unwrap())))
        }
        BinOp::Eq => {
            require_pair(&lhs, &rhs, &["number", "string", "bool", "unit", "tuple", "list", "map", "function"], span)?;
            Ok(ValueAtom::Bool(values_equal(&lhs, &rhs)))
        }
        BinOp::NotEq => {
            require_pair(&lhs, &rhs, &["number", "string", "bool"], span)?;
            Ok(ValueAtom::Bool(!values_equal(&lhs, &rhs)))
        }
        BinOp::Lt => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Bool(lhs.as_number().unwrap() < rhs.as_number().unwrap()))
        }
        BinOp::Gt => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Bool(lhs.as_number().unwrap() > rhs.as_number().unwrap()))
        }
        BinOp::LtEq => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Bool(lhs.as_number().unwrap() <= rhs.as_number().unwrap()))
        }
        BinOp::GtEq => {
            require_pair(&lhs, &rhs, &["number"], span)?;
            Ok(ValueAtom::Bool(lhs.as_number().unwrap() >= rhs.as_number().unwrap()))
        }
        BinOp::And => {
            require_pair(&lhs, &rhs, &["bool"], span)?;
            Ok(ValueAtom::Bool(lhs.as_bool().unwrap() && rhs.as_bool().unwrap()))
        }
        BinOp::Or => {
            require_pair(&lhs, &rhs, &["bool"], span)?;
            Ok(ValueAtom::Bool(lhs.as_bool().unwrap() || rhs.as_bool().unwrap()))
        }
        BinOp::Not => Err(EvalError::TypeError {
            message: "unknown binary operator '!'".to_string(),
            span,
        }),
        other => unreachable!("structural operator {other:?} is handled in evaluate_binary"),
    }
}
