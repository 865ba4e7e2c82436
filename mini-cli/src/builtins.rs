//! A small demonstration set of built-ins: `print`, `assert`, `len`.
//!
//! `mini-eval`'s registration protocol (`Builtin`/`CallContext`) is the
//! only part of the built-in catalog this crate specifies; the catalog
//! itself (math, file IO, networking, process control) is an explicit
//! Non-goal. These three exist only so the worked examples and the REPL
//! have something to call, mirroring `original_source/src/stdlib.py`'s
//! `addBuiltin`/`expect_args`/`init_util`/`init_io` helpers, trimmed to
//! what doesn't reach outside the process.

use mini_eval::{stringify_unquoted, Builtin, CallContext, EvalError, EvalResult, Environment, ValueAtom};
use mini_util::{Span, Symbol};

fn expect_args(args: &[ValueAtom], allowed: &[usize], name: &str) -> EvalResult<()> {
    if allowed.contains(&args.len()) {
        Ok(())
    } else {
        Err(EvalError::TypeError {
            message: format!("function '{name}' expects {allowed:?} argument(s) but got {}", args.len()),
            span: Span::default(),
        })
    }
}

struct Print;

impl Builtin for Print {
    fn name(&self) -> &str {
        "print"
    }

    fn call(&self, args: Vec<ValueAtom>, _ctx: &mut CallContext) -> EvalResult<ValueAtom> {
        let line = args.iter().map(stringify_unquoted).collect::<Vec<_>>().join(" ");
        println!("{line}");
        Ok(ValueAtom::Unit)
    }
}

struct Assert;

impl Builtin for Assert {
    fn name(&self) -> &str {
        "assert"
    }

    fn call(&self, args: Vec<ValueAtom>, _ctx: &mut CallContext) -> EvalResult<ValueAtom> {
        expect_args(&args, &[1, 2], "assert")?;
        let ok = args[0].as_bool().ok_or_else(|| EvalError::TypeError {
            message: "assert's first argument must be a bool".to_string(),
            span: Span::default(),
        })?;
        if ok {
            Ok(ValueAtom::Unit)
        } else {
            let message = args.get(1).map(stringify_unquoted).unwrap_or_else(|| "assertion failed".to_string());
            Err(EvalError::TypeError {
                message,
                span: Span::default(),
            })
        }
    }
}

struct Len;

impl Builtin for Len {
    fn name(&self) -> &str {
        "len"
    }

    fn call(&self, args: Vec<ValueAtom>, _ctx: &mut CallContext) -> EvalResult<ValueAtom> {
        expect_args(&args, &[1], "len")?;
        let n = match &args[0] {
            ValueAtom::Str(s) => s.chars().count(),
            ValueAtom::List(items) => items.borrow().len(),
            ValueAtom::Tuple(items) => items.len(),
            ValueAtom::Map(entries) => entries.borrow().len(),
            other => {
                return Err(EvalError::TypeError {
                    message: format!("len() is not defined for a {}", other.type_name()),
                    span: Span::default(),
                })
            }
        };
        Ok(ValueAtom::Number(n as f64))
    }
}

/// Registers the demonstration catalog into `env`, which the caller
/// typically constructs with [`Environment::root`].
pub fn register(env: &Environment) {
    for builtin in [
        std::rc::Rc::new(Print) as std::rc::Rc<dyn Builtin>,
        std::rc::Rc::new(Assert),
        std::rc::Rc::new(Len),
    ] {
        let name = Symbol::intern(builtin.name());
        env.set(name, ValueAtom::Function(std::rc::Rc::new(mini_eval::FunctionValue::Builtin(builtin))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_par::Parser;

    fn run(src: &str) -> EvalResult<ValueAtom> {
        let env = Environment::root();
        register(&env);
        let program = Parser::new(src).parse_program().expect("parse failure in test fixture");
        mini_eval::Evaluator::new().evaluate_program(&program, &env)
    }

    #[test]
    fn len_on_list_and_string() {
        assert!(matches!(run("len([1,2,3])").unwrap(), ValueAtom::Number(n) if n == 3.0));
        assert!(matches!(run("len(\"abcd\")").unwrap(), ValueAtom::Number(n) if n == 4.0));
    }

    #[test]
    fn assert_true_is_unit() {
        assert!(matches!(run("assert(1 == 1)").unwrap(), ValueAtom::Unit));
    }

    #[test]
    fn assert_false_fails() {
        assert!(run("assert(1 == 2, \"nope\")").is_err());
    }

    #[test]
    fn print_returns_unit() {
        assert!(matches!(run("print(\"hi\")").unwrap(), ValueAtom::Unit));
    }
}
