//! `Equal`/`SameQ`/`Less`/`LessEqual`/`Greater`/`GreaterEqual` (spec.md §6).
//!
//! `Equal` is structural and type-discriminating rather than numerically
//! coercing (spec.md §3's data-model invariant that integer `42` and real
//! `42.0` are not equal), so it and `SameQ` share one implementation here.

use trs_diagnostic::{argument_error, type_error};
use trs_ir::Expr;
use trs_registry::Evaluator;

fn as_f64(e: &Expr) -> Option<f64> {
    match e {
        Expr::Integer(n) => Some(*n as f64),
        Expr::Real(x) => Some(*x),
        _ => None,
    }
}

fn numeric_cmp(name: &str, args: &[Expr], op: impl Fn(f64, f64) -> bool) -> Expr {
    if args.len() != 2 {
        return argument_error(name, "2 arguments", args.len());
    }
    let (Some(a), Some(b)) = (as_f64(&args[0]), as_f64(&args[1])) else {
        return type_error(name, "two numbers", &args[0]);
    };
    Expr::boolean(op(a, b))
}

pub fn equal(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("Equal", "2 arguments", args.len());
    }
    Expr::boolean(args[0].structural_eq(&args[1]))
}

pub fn same_q(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("SameQ", "2 arguments", args.len());
    }
    Expr::boolean(args[0].structural_eq(&args[1]))
}

pub fn less(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    numeric_cmp("Less", args, |a, b| a < b)
}

pub fn less_equal(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    numeric_cmp("LessEqual", args, |a, b| a <= b)
}

pub fn greater(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    numeric_cmp("Greater", args, |a, b| a > b)
}

pub fn greater_equal(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    numeric_cmp("GreaterEqual", args, |a, b| a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::NativeInterp;
    use crate::new_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_type_discriminates_integer_and_real() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(equal(&[Expr::integer(42), Expr::real(42.0)], &mut interp), Expr::boolean(false));
    }

    #[test]
    fn same_q_matches_equal_for_atoms() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(same_q(&[Expr::integer(42), Expr::real(42.0)], &mut interp), Expr::boolean(false));
    }

    #[test]
    fn less_compares_mixed_integer_and_real() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(less(&[Expr::integer(1), Expr::real(1.5)], &mut interp), Expr::boolean(true));
    }

    #[test]
    fn greater_equal_holds_when_equal() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(greater_equal(&[Expr::integer(3), Expr::integer(3)], &mut interp), Expr::boolean(true));
    }
}
