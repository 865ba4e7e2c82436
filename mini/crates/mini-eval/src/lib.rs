//! Tree-walking evaluator for the `mini` language.
//!
//! Consumes a [`mini_par::Program`] and a root [`Environment`], and runs
//! it against a recursive `ValueAtom` model: closures capture their
//! defining environment by reference, containers (`list`/`map`) are
//! shared and mutated through `Rc<RefCell<_>>`, and every evaluation step
//! that can fail carries a `Span` back to the offending expression.

mod builtin;
mod environment;
mod error;
mod eval;
mod value;

pub use builtin::{Builtin, CallContext};
pub use environment::Environment;
pub use error::{EvalError, EvalResult};
pub use eval::Evaluator;
pub use value::{stringify_unquoted, FunctionValue, MiniList, MiniMap, ValueAtom};

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use mini_par::Parser;
    use mini_util::Symbol;

    use super::*;

    fn run(src: &str) -> EvalResult<ValueAtom> {
        let mut parser = Parser::new(src);
        let program = parser.parse_program().expect("parse failure in test fixture");
        let env = Environment::root();
        Evaluator::new().evaluate_program(&program, &env)
    }

    #[test]
    fn empty_tuple_collapses_to_unit() {
        assert!(matches!(run("()").unwrap(), ValueAtom::Unit));
    }

    #[test]
    fn single_element_tuple_collapses_to_the_element() {
        assert!(matches!(run("(5)").unwrap(), ValueAtom::Number(n) if n == 5.0));
    }

    #[test]
    fn multi_element_tuple_stays_a_tuple() {
        match run("(1, 2, 3)").unwrap() {
            ValueAtom::Tuple(items) => assert_eq!(items.len(), 3),
            other => panic!("expected tuple, got {other}"),
        }
    }

    #[test]
    fn blocks_introduce_a_fresh_scope() {
        let result = run("x = 1; { x = 2; }; x").unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 1.0));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let result = run("make_adder(n) = { adder(x) = x + n; adder }; add5 = make_adder(5); add5(10)").unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 15.0));
    }

    #[test]
    fn power_is_left_associative() {
        // (2 ^ 3) ^ 2 = 64, not 2 ^ (3 ^ 2) = 512 — the source language's
        // surprising left-associative '^', preserved rather than fixed.
        let result = run("2 ^ 3 ^ 2").unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 64.0));
    }

    #[test]
    fn equality_is_cross_kind_false_but_numeric_coercion_free() {
        assert!(matches!(run("1 == \"1\"").unwrap(), ValueAtom::Bool(false)));
        assert!(matches!(run("1 == 1.0").unwrap(), ValueAtom::Bool(true)));
    }

    #[test]
    fn not_equal_rejects_containers() {
        // A single-element tuple collapses to its element (see
        // `multi_element_tuple_stays_a_tuple`), so this needs two elements
        // to actually produce a `tuple` value for `!=` to reject.
        assert!(run("(1, 2) != (1, 2)").is_err());
    }

    #[test]
    fn string_plus_number_concatenates_unquoted() {
        match run("\"x = \" + 5").unwrap() {
            ValueAtom::Str(s) => assert_eq!(s, "x = 5"),
            other => panic!("expected string, got {other}"),
        }
    }

    #[test]
    fn tuple_plus_requires_equal_arity() {
        assert!(run("(1, 2) + (1, 2, 3)").is_err());
    }

    #[test]
    fn map_merge_right_side_wins() {
        match run("{a: 1} + {a: 2, b: 3}").unwrap() {
            ValueAtom::Map(m) => {
                let m = m.borrow();
                assert_eq!(m.get("a").unwrap().as_number(), Some(2.0));
                assert_eq!(m.get("b").unwrap().as_number(), Some(3.0));
            }
            other => panic!("expected map, got {other}"),
        }
    }

    #[test]
    fn range_produces_a_list() {
        match run("(1..4)").unwrap() {
            ValueAtom::List(l) => {
                let nums: Vec<f64> = l.borrow().iter().map(|v| v.as_number().unwrap()).collect();
                assert_eq!(nums, vec![1.0, 2.0, 3.0]);
            }
            other => panic!("expected list, got {other}"),
        }
    }

    #[test]
    fn empty_range_is_an_empty_list() {
        match run("(4..1)").unwrap() {
            ValueAtom::List(l) => assert!(l.borrow().is_empty()),
            other => panic!("expected list, got {other}"),
        }
    }

    #[test]
    fn dotted_map_assignment_mutates_through_the_shared_binding() {
        let result = run("m = {a: 1}; m.a = 2; m.a").unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 2.0));
    }

    #[test]
    fn indexed_list_assignment_mutates_in_place() {
        let result = run("xs = [1, 2, 3]; xs[1] = 9; xs[1]").unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 9.0));
    }

    #[test]
    fn assigning_through_a_tuple_element_is_rejected() {
        let err = run("t = (1, 2); t[0] = 9;").unwrap_err();
        assert!(matches!(err, EvalError::ImmutableTarget { .. }));
    }

    #[test]
    fn compound_assign_other_than_plus_is_not_implemented() {
        let err = run("x = 1; x -= 1;").unwrap_err();
        assert!(matches!(err, EvalError::NotImplementedOperator { op: "-=", .. }));
    }

    #[test]
    fn slice_clamps_like_python() {
        match run("xs = [1, 2, 3, 4, 5]; xs[1:100]").unwrap() {
            ValueAtom::List(l) => {
                let nums: Vec<f64> = l.borrow().iter().map(|v| v.as_number().unwrap()).collect();
                assert_eq!(nums, vec![2.0, 3.0, 4.0, 5.0]);
            }
            other => panic!("expected list, got {other}"),
        }
    }

    #[test]
    fn calling_a_non_function_is_a_type_error() {
        assert!(run("x = 1; x()").is_err());
    }

    #[test]
    fn wrong_arity_call_is_a_type_error() {
        assert!(run("f(a, b) = a + b; f(1)").is_err());
    }

    #[test]
    fn builtin_round_trips_through_call_context() {
        struct Double;
        impl Builtin for Double {
            fn name(&self) -> &str {
                "double"
            }

            fn call(&self, args: Vec<ValueAtom>, _ctx: &mut CallContext) -> EvalResult<ValueAtom> {
                let n = args.first().and_then(ValueAtom::as_number).unwrap_or(0.0);
                Ok(ValueAtom::Number(n * 2.0))
            }
        }

        let env = Environment::root();
        env.set(Symbol::intern("double"), ValueAtom::Function(Rc::new(FunctionValue::Builtin(Rc::new(Double)))));
        let mut parser = Parser::new("double(21)");
        let program = parser.parse_program().unwrap();
        let result = Evaluator::new().evaluate_program(&program, &env).unwrap();
        assert!(matches!(result, ValueAtom::Number(n) if n == 42.0));
    }
}
