//! `Plus`/`Times`/`Divide`/`Power`: numeric native operators (spec.md §6).
//!
//! `Plus`/`Times` are variadic (their `Flat`/`Orderless` attributes have
//! already reduced an arbitrary call down to one flat argument list by the
//! time these run); `Divide`/`Power` are strictly binary, matching the
//! teacher's small closed numeric-tower approach rather than a generic
//! n-ary fold.

use trs_diagnostic::{argument_error, division_by_zero_error, mathematical_error, type_error};
use trs_ir::Expr;
use trs_registry::Evaluator;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn from_expr(e: &Expr) -> Option<Num> {
        match e {
            Expr::Integer(n) => Some(Num::Int(*n)),
            Expr::Real(x) => Some(Num::Real(*x)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Real(x) => x,
        }
    }

    fn to_expr(self) -> Expr {
        match self {
            Num::Int(n) => Expr::integer(n),
            Num::Real(x) => Expr::real(x),
        }
    }
}

fn fold_numeric(name: &str, args: &[Expr], identity: Num, op: impl Fn(Num, Num) -> Num) -> Expr {
    if args.is_empty() {
        return identity.to_expr();
    }
    let mut acc: Option<Num> = None;
    for a in args {
        let Some(n) = Num::from_expr(a) else {
            return type_error(name, "a number", a);
        };
        acc = Some(match acc {
            None => n,
            Some(prev) => op(prev, n),
        });
    }
    acc.unwrap_or(identity).to_expr()
}

pub fn plus(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    fold_numeric("Plus", args, Num::Int(0), |acc, n| match (acc, n) {
        (Num::Int(a), Num::Int(b)) => a
            .checked_add(b)
            .map(Num::Int)
            .unwrap_or_else(|| Num::Real(a as f64 + b as f64)),
        (a, b) => Num::Real(a.as_f64() + b.as_f64()),
    })
}

pub fn times(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    fold_numeric("Times", args, Num::Int(1), |acc, n| match (acc, n) {
        (Num::Int(a), Num::Int(b)) => a
            .checked_mul(b)
            .map(Num::Int)
            .unwrap_or_else(|| Num::Real(a as f64 * b as f64)),
        (a, b) => Num::Real(a.as_f64() * b.as_f64()),
    })
}

/// `Minus(x)`: unary negation. Binary subtraction is ordinary users'
/// business (`Plus(x, Minus(y))`), not a separate native operator.
pub fn minus(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 1 {
        return argument_error("Minus", "1 argument", args.len());
    }
    match Num::from_expr(&args[0]) {
        Some(Num::Int(n)) => n.checked_neg().map(Expr::integer).unwrap_or_else(|| Expr::real(-(n as f64))),
        Some(Num::Real(x)) => Expr::real(-x),
        None => type_error("Minus", "a number", &args[0]),
    }
}

pub fn divide(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("Divide", "2 arguments", args.len());
    }
    let (Some(a), Some(b)) = (Num::from_expr(&args[0]), Num::from_expr(&args[1])) else {
        return type_error("Divide", "two numbers", &args[0]);
    };
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => {
            if y == 0 {
                return division_by_zero_error("Divide");
            }
            if x % y == 0 {
                Expr::integer(x / y)
            } else {
                Expr::real(x as f64 / y as f64)
            }
        }
        _ => {
            let denom = b.as_f64();
            if denom == 0.0 {
                return division_by_zero_error("Divide");
            }
            Expr::real(a.as_f64() / denom)
        }
    }
}

pub fn power(args: &[Expr], _ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("Power", "2 arguments", args.len());
    }
    let (Some(a), Some(b)) = (Num::from_expr(&args[0]), Num::from_expr(&args[1])) else {
        return type_error("Power", "two numbers", &args[0]);
    };
    match (a, b) {
        (Num::Int(0), Num::Int(exp)) if exp < 0 => {
            mathematical_error("Power", "0 cannot be raised to a negative power")
        }
        (Num::Int(base), Num::Int(exp)) if exp >= 0 => {
            match u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)) {
                Some(v) => Expr::integer(v),
                None => Expr::real((base as f64).powf(exp as f64)),
            }
        }
        _ => Expr::real(a.as_f64().powf(b.as_f64())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::NativeInterp;
    use crate::new_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn plus_sums_integers_exactly() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(plus(&[Expr::integer(1), Expr::integer(2)], &mut interp), Expr::integer(3));
    }

    #[test]
    fn plus_promotes_to_real_when_any_operand_is_real() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(plus(&[Expr::integer(1), Expr::real(2.5)], &mut interp), Expr::real(3.5));
    }

    #[test]
    fn times_with_no_arguments_is_the_multiplicative_identity() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(times(&[], &mut interp), Expr::integer(1));
    }

    #[test]
    fn minus_negates_an_integer() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(minus(&[Expr::integer(5)], &mut interp), Expr::integer(-5));
    }

    #[test]
    fn minus_negates_a_real() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(minus(&[Expr::real(2.5)], &mut interp), Expr::real(-2.5));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert!(divide(&[Expr::integer(1), Expr::integer(0)], &mut interp).is_error());
    }

    #[test]
    fn divide_stays_integer_on_exact_division() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(divide(&[Expr::integer(6), Expr::integer(3)], &mut interp), Expr::integer(2));
    }

    #[test]
    fn power_computes_integer_powers_exactly() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(power(&[Expr::integer(2), Expr::integer(10)], &mut interp), Expr::integer(1024));
    }

    #[test]
    fn power_zero_to_negative_is_a_mathematical_error() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert!(power(&[Expr::integer(0), Expr::integer(-1)], &mut interp).is_error());
    }
}
