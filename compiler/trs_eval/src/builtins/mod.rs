//! Wiring for every native operator and the default attribute table
//! (spec.md §6), applied once to a freshly built root `Context`.

mod arithmetic;
mod comparison;
mod higher_order;
mod reflection;

use trs_patterns::{Pattern, TypeConstraint};
use trs_registry::Rule;
use trs_symbols::Attributes;

use crate::context::Context;

fn blank() -> Pattern {
    Pattern::Blank(None)
}

fn variadic() -> Vec<Pattern> {
    vec![Pattern::BlankSequence(None)]
}

fn binary() -> Vec<Pattern> {
    vec![blank(), blank()]
}

fn unary() -> Vec<Pattern> {
    vec![blank()]
}

/// Numeric operators (`Plus`, `Times`, `Divide`, `Power`, the comparisons)
/// are registered against a `Number`-typed pattern rather than a bare
/// `Blank`, so a call over free symbols (`Plus(x, y)`) finds no matching
/// rule and falls through to spec.md §4.6.1's "return the application with
/// evaluated arguments (unchanged form)" instead of reaching the native
/// operator and failing a numeric type check — this is what lets
/// `Head(Plus(x, y))` report `Plus` rather than a `TypeError`.
fn variadic_numeric() -> Vec<Pattern> {
    vec![Pattern::BlankSequence(Some(TypeConstraint::Number))]
}

fn binary_numeric() -> Vec<Pattern> {
    vec![
        Pattern::Blank(Some(TypeConstraint::Number)),
        Pattern::Blank(Some(TypeConstraint::Number)),
    ]
}

fn unary_numeric() -> Vec<Pattern> {
    vec![Pattern::Blank(Some(TypeConstraint::Number))]
}

/// Populate `ctx`'s shared symbol table and registry with every built-in
/// symbol's default attributes and native rule, per spec.md §6's table.
/// Called exactly once, by `new_context`/`new_context_with_limits`.
pub fn register_defaults(ctx: &Context) {
    let interner = ctx.interner().clone();
    let intern = |s: &str| interner.intern(s);

    let plus = intern("Plus");
    let times = intern("Times");
    let power = intern("Power");
    let hold = intern("Hold");
    let pattern = intern("Pattern");
    let if_ = intern("If");
    let while_ = intern("While");
    let compound = intern("CompoundExpression");
    let module = intern("Module");
    let block = intern("Block");
    let set = intern("Set");
    let set_delayed = intern("SetDelayed");
    let unset = intern("Unset");
    let attributes_sym = intern("Attributes");
    let set_attributes_sym = intern("SetAttributes");
    let clear_attributes_sym = intern("ClearAttributes");
    let clear_all_attributes_sym = intern("ClearAllAttributes");
    let and = intern("And");
    let or = intern("Or");
    let pi = intern("Pi");
    let e = intern("E");
    let true_ = intern("True");
    let false_ = intern("False");
    let blank_sym = intern("Blank");
    let blank_seq = intern("BlankSequence");
    let blank_null_seq = intern("BlankNullSequence");
    let function = intern("Function");
    let divide = intern("Divide");
    let equal = intern("Equal");
    let same_q = intern("SameQ");
    let less = intern("Less");
    let less_equal = intern("LessEqual");
    let greater = intern("Greater");
    let greater_equal = intern("GreaterEqual");
    let map = intern("Map");
    let head = intern("Head");
    let minus = intern("Minus");

    let symbols = ctx.symbols();
    symbols.set_attributes(
        plus,
        Attributes::FLAT
            | Attributes::LISTABLE
            | Attributes::NUMERIC_FUNCTION
            | Attributes::ONE_IDENTITY
            | Attributes::ORDERLESS
            | Attributes::PROTECTED,
    );
    symbols.set_attributes(times, Attributes::FLAT | Attributes::ORDERLESS | Attributes::ONE_IDENTITY);
    symbols.set_attributes(power, Attributes::ONE_IDENTITY);
    symbols.set_attributes(hold, Attributes::HOLD_ALL);
    symbols.set_attributes(pattern, Attributes::HOLD_ALL | Attributes::PROTECTED);
    symbols.set_attributes(if_, Attributes::HOLD_REST);
    symbols.set_attributes(while_, Attributes::HOLD_ALL);
    symbols.set_attributes(compound, Attributes::HOLD_ALL);
    symbols.set_attributes(module, Attributes::HOLD_ALL);
    symbols.set_attributes(block, Attributes::HOLD_ALL);
    symbols.set_attributes(set, Attributes::HOLD_FIRST);
    symbols.set_attributes(set_delayed, Attributes::HOLD_ALL);
    symbols.set_attributes(unset, Attributes::HOLD_FIRST);
    symbols.set_attributes(attributes_sym, Attributes::HOLD_FIRST);
    symbols.set_attributes(set_attributes_sym, Attributes::HOLD_FIRST);
    symbols.set_attributes(clear_attributes_sym, Attributes::HOLD_FIRST);
    symbols.set_attributes(clear_all_attributes_sym, Attributes::HOLD_FIRST);
    symbols.set_attributes(and, Attributes::FLAT | Attributes::ORDERLESS | Attributes::HOLD_ALL);
    symbols.set_attributes(or, Attributes::FLAT | Attributes::ORDERLESS | Attributes::HOLD_ALL);
    symbols.set_attributes(pi, Attributes::CONSTANT | Attributes::PROTECTED);
    symbols.set_attributes(e, Attributes::CONSTANT | Attributes::PROTECTED);
    symbols.set_attributes(true_, Attributes::CONSTANT | Attributes::PROTECTED);
    symbols.set_attributes(false_, Attributes::CONSTANT | Attributes::PROTECTED);
    symbols.set_attributes(blank_sym, Attributes::PROTECTED);
    symbols.set_attributes(blank_seq, Attributes::PROTECTED);
    symbols.set_attributes(blank_null_seq, Attributes::PROTECTED);
    symbols.set_attributes(function, Attributes::HOLD_ALL);
    symbols.set_attributes(minus, Attributes::NUMERIC_FUNCTION);

    let registry = ctx.registry();
    registry.define(plus, Rule::native(variadic_numeric(), arithmetic::plus));
    registry.define(times, Rule::native(variadic_numeric(), arithmetic::times));
    registry.define(minus, Rule::native(unary_numeric(), arithmetic::minus));
    registry.define(divide, Rule::native(binary_numeric(), arithmetic::divide));
    registry.define(power, Rule::native(binary_numeric(), arithmetic::power));

    registry.define(equal, Rule::native(binary(), comparison::equal));
    registry.define(same_q, Rule::native(binary(), comparison::same_q));
    registry.define(less, Rule::native(binary_numeric(), comparison::less));
    registry.define(less_equal, Rule::native(binary_numeric(), comparison::less_equal));
    registry.define(greater, Rule::native(binary_numeric(), comparison::greater));
    registry.define(
        greater_equal,
        Rule::native(binary_numeric(), comparison::greater_equal),
    );

    registry.define(head, Rule::native(unary(), reflection::head));
    registry.define(attributes_sym, Rule::native(unary(), reflection::attributes));
    registry.define(set_attributes_sym, Rule::native(binary(), reflection::set_attributes));
    registry.define(clear_attributes_sym, Rule::native(binary(), reflection::clear_attributes));
    registry.define(
        clear_all_attributes_sym,
        Rule::native(unary(), reflection::clear_all_attributes),
    );

    registry.define(map, Rule::native(binary(), higher_order::map));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_context;
    use pretty_assertions::assert_eq;
    use trs_ir::Expr;

    #[test]
    fn plus_carries_its_default_attributes() {
        let ctx = new_context();
        let plus = ctx.interner().intern("Plus");
        assert!(ctx.symbols().has_attribute(plus, Attributes::FLAT));
        assert!(ctx.symbols().has_attribute(plus, Attributes::ORDERLESS));
        assert!(ctx.symbols().has_attribute(plus, Attributes::PROTECTED));
    }

    #[test]
    fn plus_is_registered_and_dispatches() {
        let ctx = new_context();
        let plus = ctx.interner().intern("Plus");
        let (_, _) = ctx
            .registry()
            .find_match(plus, &[Expr::integer(1), Expr::integer(2)])
            .expect("Plus should be registered");
    }

    #[test]
    fn pi_and_true_are_constant_and_protected() {
        let ctx = new_context();
        let pi = ctx.interner().intern("Pi");
        assert!(ctx.symbols().has_attribute(pi, Attributes::CONSTANT));
        assert!(ctx.symbols().has_attribute(pi, Attributes::PROTECTED));
    }
}
