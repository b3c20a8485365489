//! The core recursive evaluator (spec.md §4.6 "Evaluation algorithm").
//!
//! Grounded on the tree-walking dispatch loop of
//! `ori_eval::interpreter::Interpreter::eval`, generalized from a typed
//! AST over a fixed node enum into one untyped `Expr` that is both program
//! and value. Special forms are checked before the attribute-driven
//! structural transforms (Flat/Orderless/OneIdentity) rather than
//! interleaved with them — an ordering spec.md §4.6.1 leaves implicit and
//! §9 explicitly allows resolving by whichever order is simplest to
//! implement correctly.

use trs_ir::{Expr, Frame, Name};
use trs_patterns::Bindings;
use trs_registry::{Rule, RuleBody};
use trs_stack::ensure_sufficient_stack;
use trs_symbols::Attributes;

use crate::context::Context;
use crate::interpreter::NativeInterp;
use crate::special_forms;

/// Evaluate `expr` to normal form in `ctx`.
///
/// A rule body invoked here is itself evaluated before being returned
/// (`invoke_rule` below), so the ordinary recursive call chain already
/// reaches a fixed point: there is no separate "evaluate the result again"
/// loop at this level. The one explicit bounded loop is the structural
/// attribute transform in `eval_ordinary`, which can touch the same
/// application more than once (e.g. `Flat` exposing more `Flat` children).
pub fn evaluate(expr: Expr, ctx: &Context) -> Expr {
    ensure_sufficient_stack(|| evaluate_step(expr, ctx))
}

fn evaluate_step(expr: Expr, ctx: &Context) -> Expr {
    let frame = Frame {
        function_name: ctx.interner().intern("evaluate"),
        expression: expr.display(ctx.interner()).to_string().into(),
        location: None,
    };
    if let Err(recursion_error) = ctx.stack().borrow_mut().push(frame) {
        return recursion_error;
    }
    let result = dispatch(expr, ctx);
    let result = stamp_if_fresh(result, ctx);
    ctx.stack().borrow_mut().pop();
    result
}

/// Attach the current frame trace to `result` only if it is an error that
/// hasn't been stamped by an inner `evaluate` call yet — stamping happens
/// exactly once, at the innermost frame where the error was produced.
fn stamp_if_fresh(result: Expr, ctx: &Context) -> Expr {
    let needs_stamp = matches!(&result, Expr::Error(value) if value.frames.is_empty());
    if needs_stamp {
        ctx.stack().borrow().stamp(result)
    } else {
        result
    }
}

fn dispatch(expr: Expr, ctx: &Context) -> Expr {
    match expr {
        Expr::Integer(_) | Expr::Real(_) | Expr::Str(_) | Expr::Boolean(_) | Expr::Error(_) => {
            expr
        }
        Expr::Symbol(name) => eval_symbol(name, ctx),
        Expr::Application { head, args } => eval_application((*head).clone(), args.to_vec(), ctx),
    }
}

/// A bound symbol evaluates to its (recursively evaluated) binding; an
/// unbound symbol evaluates to itself, except for the handful of built-in
/// constants that are never explicitly bound (spec.md §6).
fn eval_symbol(name: Name, ctx: &Context) -> Expr {
    if let Some(bound) = ctx.get(name) {
        return evaluate(bound, ctx);
    }
    builtin_constant(name, ctx).unwrap_or(Expr::Symbol(name))
}

fn builtin_constant(name: Name, ctx: &Context) -> Option<Expr> {
    match ctx.interner().lookup(name) {
        "Pi" => Some(Expr::real(std::f64::consts::PI)),
        "E" => Some(Expr::real(std::f64::consts::E)),
        "True" => Some(Expr::boolean(true)),
        "False" => Some(Expr::boolean(false)),
        _ => None,
    }
}

fn eval_application(head: Expr, args: Vec<Expr>, ctx: &Context) -> Expr {
    let head_value = evaluate(head, ctx);
    let Some(head_name) = head_value.as_symbol() else {
        // A non-symbolic head (the result of evaluating a nested
        // application) has no attributes or registered rules to dispatch
        // through; the application simply stays as data.
        return Expr::apply(head_value, args);
    };

    let head_str = ctx.interner().lookup(head_name).to_owned();
    if let Some(result) = special_forms::dispatch(&head_str, head_name, &args, ctx) {
        return result;
    }

    eval_ordinary(head_name, args, ctx)
}

fn eval_ordinary(head_name: Name, args: Vec<Expr>, ctx: &Context) -> Expr {
    let mut current = args;
    let cap = ctx.limits().fixed_point_cap;
    for _ in 0..cap {
        let attrs = ctx.symbols().attributes(head_name);
        let (next, changed) = apply_structural_transforms(head_name, current, ctx, attrs);
        current = next;
        if !changed {
            break;
        }
    }

    let attrs = ctx.symbols().attributes(head_name);
    if attrs.contains(Attributes::ONE_IDENTITY) && current.len() == 1 {
        let only = current.into_iter().next().unwrap_or(Expr::symbol(Name::EMPTY));
        return evaluate(only, ctx);
    }

    let mut dispatch_args = Vec::with_capacity(current.len());
    for (i, arg) in current.into_iter().enumerate() {
        let held = attrs.contains(Attributes::HOLD_ALL)
            || (i == 0 && attrs.contains(Attributes::HOLD_FIRST))
            || (i > 0 && attrs.contains(Attributes::HOLD_REST));
        if held {
            dispatch_args.push(arg);
            continue;
        }
        let value = evaluate(arg, ctx);
        if value.is_error() {
            return value;
        }
        dispatch_args.push(value);
    }

    match ctx.registry().find_match(head_name, &dispatch_args) {
        Some((rule, bindings)) => invoke_rule(&rule, &dispatch_args, bindings, ctx),
        None => Expr::call(head_name, dispatch_args),
    }
}

/// Apply `Flat` splicing and `Orderless` sorting once. Returns whether
/// either pass actually changed the argument list, so the caller can loop
/// until neither applies any more.
fn apply_structural_transforms(
    head_name: Name,
    args: Vec<Expr>,
    ctx: &Context,
    attrs: Attributes,
) -> (Vec<Expr>, bool) {
    let mut args = args;
    let mut changed = false;

    if attrs.contains(Attributes::FLAT) {
        let mut flattened = Vec::with_capacity(args.len());
        for arg in args {
            match arg.as_application() {
                Some((inner_head, inner_args)) if inner_head.as_symbol() == Some(head_name) => {
                    flattened.extend(inner_args.iter().cloned());
                    changed = true;
                }
                _ => flattened.push(arg),
            }
        }
        args = flattened;
    }

    if attrs.contains(Attributes::ORDERLESS) {
        let interner = ctx.interner();
        let mut keyed: Vec<(String, Expr)> = args
            .into_iter()
            .map(|a| (a.display(interner).to_string(), a))
            .collect();
        let already_sorted = keyed.windows(2).all(|w| w[0].0 <= w[1].0);
        if !already_sorted {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            changed = true;
        }
        args = keyed.into_iter().map(|(_, e)| e).collect();
    }

    (args, changed)
}

fn invoke_rule(rule: &Rule, args: &[Expr], bindings: Bindings, ctx: &Context) -> Expr {
    match &rule.body {
        RuleBody::Native(op) => {
            let mut interp = NativeInterp::new(ctx);
            op(args, &mut interp)
        }
        RuleBody::User(body) => {
            let child = ctx.child();
            for (name, value) in bindings {
                child.define_local(name, value);
            }
            evaluate(body.clone(), &child)
        }
    }
}
