//! Whitebox coverage of spec.md §8's concrete scenarios and invariants,
//! exercised directly against this crate's public `evaluate`/`new_context`
//! rather than through any textual front end.

use pretty_assertions::assert_eq;
use trs_ir::{ErrorKind, Expr};
use trs_patterns::Pattern;
use trs_registry::Rule;

use crate::{evaluate, new_context};

fn pattern_var(ctx: &crate::Context, name: &str) -> Pattern {
    let sym = ctx.interner().intern(name);
    Pattern::Named(sym, Box::new(Pattern::Blank(None)))
}

#[test]
fn scenario_1_plus_sums_three_integers() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let expr = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
    assert_eq!(evaluate(expr, &ctx), Expr::integer(6));
}

#[test]
fn scenario_2_times_distributes_over_an_inner_plus() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let times = ctx.interner().intern("Times");
    let inner = Expr::call(plus, vec![Expr::integer(3), Expr::integer(4)]);
    let expr = Expr::call(times, vec![Expr::integer(2), inner]);
    assert_eq!(evaluate(expr, &ctx), Expr::integer(14));
}

#[test]
fn scenario_3_attributes_round_trips_through_canonical_sorted_order() {
    let ctx = new_context();
    let my_func = ctx.interner().intern("myFunc");
    let list = ctx.interner().intern("List");
    let protected = ctx.interner().intern("Protected");
    let hold_first = ctx.interner().intern("HoldFirst");
    let set_attributes = ctx.interner().intern("SetAttributes");
    let attributes_sym = ctx.interner().intern("Attributes");

    let set_call = Expr::call(
        set_attributes,
        vec![
            Expr::symbol(my_func),
            Expr::call(list, vec![Expr::symbol(protected), Expr::symbol(hold_first)]),
        ],
    );
    evaluate(set_call, &ctx);

    let result = evaluate(Expr::call(attributes_sym, vec![Expr::symbol(my_func)]), &ctx);
    assert_eq!(
        result,
        Expr::call(list, vec![Expr::symbol(hold_first), Expr::symbol(protected)])
    );
}

#[test]
fn scenario_4_assigning_to_a_protected_symbol_is_a_protection_error() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let set = ctx.interner().intern("Set");
    let expr = Expr::call(set, vec![Expr::symbol(plus), Expr::integer(42)]);
    let result = evaluate(expr, &ctx);
    match result {
        Expr::Error(value) => assert_eq!(value.kind, ErrorKind::ProtectionError),
        other => panic!("expected a ProtectionError, got {other:?}"),
    }
}

#[test]
fn scenario_5_and_short_circuits_but_evaluates_far_enough_to_divide_by_zero() {
    let ctx = new_context();
    let and = ctx.interner().intern("And");
    let equal = ctx.interner().intern("Equal");
    let divide = ctx.interner().intern("Divide");
    let expr = Expr::call(
        and,
        vec![
            Expr::boolean(true),
            Expr::call(
                equal,
                vec![Expr::integer(1), Expr::call(divide, vec![Expr::integer(1), Expr::integer(0)])],
            ),
        ],
    );
    let result = evaluate(expr, &ctx);
    match result {
        Expr::Error(value) => assert_eq!(value.kind, ErrorKind::DivisionByZero),
        other => panic!("expected a DivisionByZero error, got {other:?}"),
    }
}

#[test]
fn scenario_6_one_identity_shortcut_fires_before_the_rule_body() {
    let ctx = new_context();
    let f = ctx.interner().intern("f");
    let x = ctx.interner().intern("x");
    let plus = ctx.interner().intern("Plus");

    ctx.registry().define(
        f,
        Rule::user(
            vec![pattern_var(&ctx, "x")],
            Expr::call(plus, vec![Expr::symbol(x), Expr::integer(10)]),
        ),
    );
    ctx.symbols()
        .set_attributes(f, trs_symbols::Attributes::ONE_IDENTITY);

    let result = evaluate(Expr::call(f, vec![Expr::integer(5)]), &ctx);
    assert_eq!(result, Expr::integer(5));
}

#[test]
fn scenario_7_map_applies_a_pure_function_over_a_list() {
    let ctx = new_context();
    let map = ctx.interner().intern("Map");
    let list = ctx.interner().intern("List");
    let function = ctx.interner().intern("Function");
    let plus = ctx.interner().intern("Plus");
    let slot = ctx.interner().intern("$1");

    let body = Expr::call(function, vec![Expr::call(plus, vec![Expr::symbol(slot), Expr::integer(1)])]);
    let items = Expr::call(list, vec![Expr::integer(10), Expr::integer(20), Expr::integer(30)]);
    let result = evaluate(Expr::call(map, vec![body, items]), &ctx);

    assert_eq!(
        result,
        Expr::call(list, vec![Expr::integer(11), Expr::integer(21), Expr::integer(31)])
    );
}

#[test]
fn scenario_8_same_q_type_discriminates_integer_and_real() {
    let ctx = new_context();
    let same_q = ctx.interner().intern("SameQ");
    let expr = Expr::call(same_q, vec![Expr::integer(42), Expr::real(42.0)]);
    assert_eq!(evaluate(expr, &ctx), Expr::boolean(false));
}

#[test]
fn scenario_9_head_of_a_symbolic_application_is_its_head_symbol() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let head = ctx.interner().intern("Head");
    let x = ctx.interner().intern("x");
    let y = ctx.interner().intern("y");

    let call = Expr::call(head, vec![Expr::call(plus, vec![Expr::symbol(x), Expr::symbol(y)])]);
    assert_eq!(evaluate(call, &ctx), Expr::symbol(plus));

    let integer_head = evaluate(Expr::call(head, vec![Expr::integer(3)]), &ctx);
    assert_eq!(integer_head, Expr::symbol(ctx.interner().intern("Integer")));
}

#[test]
fn idempotence_at_the_fixed_point() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let expr = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2)]);
    let once = evaluate(expr.clone(), &ctx);
    let twice = evaluate(once.clone(), &ctx);
    assert_eq!(once, twice);
}

#[test]
fn orderless_evaluation_is_invariant_under_argument_permutation() {
    let ctx = new_context();
    let plus = ctx.interner().intern("Plus");
    let x = ctx.interner().intern("x");
    let y = ctx.interner().intern("y");
    let forward = Expr::call(plus, vec![Expr::symbol(x), Expr::symbol(y), Expr::integer(1)]);
    let backward = Expr::call(plus, vec![Expr::integer(1), Expr::symbol(y), Expr::symbol(x)]);
    assert_eq!(evaluate(forward, &ctx), evaluate(backward, &ctx));
}

#[test]
fn evaluation_that_errors_does_not_overflow_the_native_stack() {
    let ctx = crate::new_context_with_limits(crate::EvalLimits {
        recursion_limit: 50,
        ..crate::EvalLimits::default()
    });
    let f = ctx.interner().intern("f");
    ctx.registry()
        .define(f, Rule::user(vec![pattern_var(&ctx, "x")], Expr::call(f, vec![Expr::integer(0)])));
    let result = evaluate(Expr::call(f, vec![Expr::integer(0)]), &ctx);
    assert!(result.is_error());
}
