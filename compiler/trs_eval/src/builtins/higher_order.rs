//! `Map` (spec.md §6): applying a function to every element of a `List`.
//!
//! The function argument is either a plain symbol (`Map(f, list)`, called
//! by name through `ev.eval`) or a pure function wrapped in the `Function`
//! head (`Map(Function(Plus($1, 1)), list)`), whose single parameter is
//! bound to `$1` for the body's evaluation. `Function` is not part of
//! spec.md's literal attribute table; it is an ambient addition this crate
//! introduces so `Map` has something to apply beyond a named symbol — see
//! DESIGN.md.

use trs_diagnostic::{argument_error, type_error};
use trs_ir::Expr;
use trs_registry::Evaluator;

fn apply_function(function: &Expr, item: Expr, ev: &mut dyn Evaluator) -> Expr {
    let function_head = ev.intern("Function");
    if let Some((head, params)) = function.as_application() {
        if head.as_symbol() == Some(function_head) && params.len() == 1 {
            let slot = ev.intern("$1");
            return ev.eval_with_binding(slot, item, params[0].clone());
        }
    }
    if let Some(name) = function.as_symbol() {
        return ev.eval(Expr::call(name, vec![item]));
    }
    type_error("Map", "a function symbol or Function(...)", function)
}

pub fn map(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("Map", "2 arguments", args.len());
    }
    let list_head = ev.intern("List");
    let Some((head, items)) = args[1].as_application() else {
        return type_error("Map", "a List", &args[1]);
    };
    if head.as_symbol() != Some(list_head) {
        return type_error("Map", "a List", &args[1]);
    }
    let mut mapped = Vec::with_capacity(items.len());
    for item in items.to_vec() {
        let result = apply_function(&args[0], item, ev);
        if result.is_error() {
            return result;
        }
        mapped.push(result);
    }
    Expr::call(list_head, mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::NativeInterp;
    use crate::new_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn map_applies_a_named_function_over_a_list() {
        let ctx = new_context();
        let double = ctx.interner().intern("Double");
        let x = ctx.interner().intern("x");
        ctx.registry().define(
            double,
            trs_registry::Rule::user(
                vec![trs_patterns::Pattern::Named(x, Box::new(trs_patterns::Pattern::Blank(None)))],
                Expr::call(ctx.interner().intern("Times"), vec![Expr::symbol(x), Expr::integer(2)]),
            ),
        );
        let list = ctx.interner().intern("List");
        let mut interp = NativeInterp::new(&ctx);
        let result = map(
            &[
                Expr::symbol(double),
                Expr::call(list, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]),
            ],
            &mut interp,
        );
        assert_eq!(
            result,
            Expr::call(list, vec![Expr::integer(2), Expr::integer(4), Expr::integer(6)])
        );
    }

    #[test]
    fn map_applies_a_pure_function_binding_dollar_one() {
        let ctx = new_context();
        let list = ctx.interner().intern("List");
        let function = ctx.interner().intern("Function");
        let plus = ctx.interner().intern("Plus");
        let slot = ctx.interner().intern("$1");
        let mut interp = NativeInterp::new(&ctx);
        let body = Expr::call(function, vec![Expr::call(plus, vec![Expr::symbol(slot), Expr::integer(1)])]);
        let result = map(
            &[body, Expr::call(list, vec![Expr::integer(1), Expr::integer(2)])],
            &mut interp,
        );
        assert_eq!(result, Expr::call(list, vec![Expr::integer(2), Expr::integer(3)]));
    }

    #[test]
    fn map_rejects_a_non_list_second_argument() {
        let ctx = new_context();
        let f = ctx.interner().intern("f");
        let mut interp = NativeInterp::new(&ctx);
        assert!(map(&[Expr::symbol(f), Expr::integer(1)], &mut interp).is_error());
    }
}
