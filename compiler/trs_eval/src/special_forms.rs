//! Special forms: heads whose arguments are not uniformly evaluated and
//! dispatched through the registry the way an ordinary function call is
//! (spec.md §4.6.3). Checked before attribute-driven structural transforms
//! and registry dispatch (see `evaluator::eval_application`).

use rustc_hash::FxHashSet;
use trs_diagnostic::{argument_error, definition_error, protection_error, type_error};
use trs_ir::{Expr, Name};
use trs_patterns::{pattern_from_expr, Pattern};
use trs_registry::Rule;
use trs_symbols::Attributes;

use crate::context::Context;
use crate::evaluator::evaluate;
use crate::sliceable;

/// Returns `Some(result)` if `head_str` names a special form, `None` if the
/// caller should fall through to ordinary attribute-transform-then-dispatch
/// evaluation.
pub fn dispatch(head_str: &str, head_name: Name, args: &[Expr], ctx: &Context) -> Option<Expr> {
    match head_str {
        "If" => Some(if_form(args, ctx)),
        "Set" => Some(set_form(args, ctx)),
        "SetDelayed" => Some(set_delayed_form(args, ctx)),
        "Unset" => Some(unset_form(args, ctx)),
        "Hold" | "Pattern" => Some(Expr::call(head_name, args.to_vec())),
        "Evaluate" => Some(evaluate_form(args, ctx)),
        "CompoundExpression" => Some(sequence_form("CompoundExpression", args, ctx)),
        "And" => Some(and_form(args, ctx)),
        "Or" => Some(or_form(args, ctx)),
        "Block" => Some(block_form(args, ctx)),
        "Table" => Some(table_form(args, ctx)),
        "Do" => Some(do_form(args, ctx)),
        "SliceRange" => Some(slice_range_form(args, ctx)),
        "TakeFrom" => Some(take_from_form(args, ctx)),
        "PartSet" => Some(part_set_form(args, ctx)),
        "SliceSet" => Some(slice_set_form(args, ctx)),
        _ => None,
    }
}

fn null(ctx: &Context) -> Expr {
    Expr::symbol(ctx.interner().intern("Null"))
}

fn if_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 && args.len() != 3 {
        return argument_error("If", "2 or 3 arguments", args.len());
    }
    let condition = evaluate(args[0].clone(), ctx);
    if condition.is_error() {
        return condition;
    }
    match condition {
        Expr::Boolean(true) => evaluate(args[1].clone(), ctx),
        Expr::Boolean(false) => {
            if args.len() == 3 {
                evaluate(args[2].clone(), ctx)
            } else {
                null(ctx)
            }
        }
        other => type_error("If", "a Boolean condition", &other),
    }
}

fn set_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("Set", "2 arguments", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("Set", "a symbol left-hand side", &args[0]);
    };
    let value = evaluate(args[1].clone(), ctx);
    if value.is_error() {
        return value;
    }
    match ctx.set(name, value) {
        Ok(v) => v,
        Err(e) => e,
    }
}

fn set_delayed_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("SetDelayed", "2 arguments", args.len());
    }
    let rhs = args[1].clone();
    match &args[0] {
        Expr::Symbol(name) => match ctx.set(*name, rhs) {
            Ok(_) => null(ctx),
            Err(e) => e,
        },
        Expr::Application {
            head,
            args: params,
        } => {
            let Some(head_sym) = head.as_symbol() else {
                return definition_error("SetDelayed", "left-hand side head must be a symbol");
            };
            let symbol_text = ctx.interner().lookup(head_sym).to_owned();
            if symbol_text.starts_with('$')
                || ctx.symbols().has_attribute(head_sym, Attributes::PROTECTED)
            {
                return protection_error(&symbol_text);
            }
            let interner = ctx.interner();
            let pattern_params: Vec<Pattern> =
                params.iter().map(|p| pattern_from_expr(p, interner)).collect();
            ctx.registry().define(head_sym, Rule::user(pattern_params, rhs));
            null(ctx)
        }
        other => definition_error(
            "SetDelayed",
            &format!(
                "left-hand side must be a symbol or application, got {}",
                other.display(ctx.interner())
            ),
        ),
    }
}

fn unset_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 1 {
        return argument_error("Unset", "1 argument", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("Unset", "a symbol", &args[0]);
    };
    ctx.unset(name);
    null(ctx)
}

fn evaluate_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 1 {
        return argument_error("Evaluate", "1 argument", args.len());
    }
    evaluate(args[0].clone(), ctx)
}

fn sequence_form(name: &str, args: &[Expr], ctx: &Context) -> Expr {
    if args.is_empty() {
        return argument_error(name, "at least 1 argument", 0);
    }
    let mut last = null(ctx);
    for a in args {
        last = evaluate(a.clone(), ctx);
        if last.is_error() {
            return last;
        }
    }
    last
}

/// `And`: short-circuits on `False`, drops `True`s, and — per spec.md
/// §4.6.3 — returns the single remaining non-Boolean operand if exactly
/// one remains, `True` if none remain, or the symbolic `And(nonbools…)`
/// otherwise. A non-Boolean operand is not a type error: `And` is
/// Orderless/Flat, so an unresolved operand simply stays in the rebuilt
/// expression for a later rewrite to pick up.
fn and_form(args: &[Expr], ctx: &Context) -> Expr {
    let and_name = ctx.interner().intern("And");
    let mut nonbools = Vec::new();
    for a in args {
        let value = evaluate(a.clone(), ctx);
        if value.is_error() {
            return value;
        }
        match value {
            Expr::Boolean(false) => return Expr::boolean(false),
            Expr::Boolean(true) => continue,
            other => nonbools.push(other),
        }
    }
    match nonbools.len() {
        0 => Expr::boolean(true),
        1 => nonbools.swap_remove(0),
        _ => Expr::call(and_name, nonbools),
    }
}

/// `Or`: dual of `And` — short-circuits on `True`, drops `False`s, returns
/// the single remaining non-Boolean operand, `False` if none remain, or
/// `Or(nonbools…)` otherwise.
fn or_form(args: &[Expr], ctx: &Context) -> Expr {
    let or_name = ctx.interner().intern("Or");
    let mut nonbools = Vec::new();
    for a in args {
        let value = evaluate(a.clone(), ctx);
        if value.is_error() {
            return value;
        }
        match value {
            Expr::Boolean(true) => return Expr::boolean(true),
            Expr::Boolean(false) => continue,
            other => nonbools.push(other),
        }
    }
    match nonbools.len() {
        0 => Expr::boolean(false),
        1 => nonbools.swap_remove(0),
        _ => Expr::call(or_name, nonbools),
    }
}

/// `Block(List(x, y = init, ...), body)`: locals shadow same-named outer
/// bindings for the duration of `body` (spec.md §4.6.3 "Block").
fn block_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("Block", "2 arguments", args.len());
    }
    let list_name = ctx.interner().intern("List");
    let set_name = ctx.interner().intern("Set");
    let Some((head, decls)) = args[0].as_application() else {
        return type_error("Block", "a List of local variable declarations", &args[0]);
    };
    if head.as_symbol() != Some(list_name) {
        return type_error("Block", "a List of local variable declarations", &args[0]);
    }

    let mut scoped = FxHashSet::default();
    let mut inits: Vec<(Name, Option<Expr>)> = Vec::with_capacity(decls.len());
    for decl in decls {
        match decl {
            Expr::Symbol(name) => {
                scoped.insert(*name);
                inits.push((*name, None));
            }
            Expr::Application {
                head,
                args: set_args,
            } if head.as_symbol() == Some(set_name) && set_args.len() == 2 => {
                let Some(name) = set_args[0].as_symbol() else {
                    return type_error(
                        "Block",
                        "a symbol on the left of a local initializer",
                        &set_args[0],
                    );
                };
                scoped.insert(name);
                inits.push((name, Some(set_args[1].clone())));
            }
            other => {
                return type_error(
                    "Block",
                    "a symbol or Set(symbol, value) local declaration",
                    other,
                )
            }
        }
    }

    let child = ctx.block_child(scoped);
    for (name, init) in inits {
        if let Some(expr) = init {
            let value = evaluate(expr, ctx);
            if value.is_error() {
                return value;
            }
            child.define_local(name, value);
        }
    }
    evaluate(args[1].clone(), &child)
}

enum Iter {
    Count(i64),
    Range {
        var: Name,
        start: Expr,
        end: Expr,
        step: Expr,
    },
}

/// Parse a `Table`/`Do` iterator: either a bare integer count, or
/// `List(var, end)` / `List(var, start, end)` / `List(var, start, end, step)`
/// (spec.md §4.6.3). The loop variable slot itself is never pre-evaluated —
/// only `start`/`end`/`step` are, once, before the loop begins.
fn parse_iterator(spec: &Expr, ctx: &Context) -> Result<Iter, Expr> {
    if let Expr::Integer(n) = spec {
        return Ok(Iter::Count(*n));
    }
    let list_name = ctx.interner().intern("List");
    let Some((head, items)) = spec.as_application() else {
        return Err(type_error(
            "Table",
            "an integer count or a List iterator spec",
            spec,
        ));
    };
    if head.as_symbol() != Some(list_name) {
        return Err(type_error(
            "Table",
            "an integer count or a List iterator spec",
            spec,
        ));
    }
    let Some(var) = items.first().and_then(Expr::as_symbol) else {
        return Err(type_error(
            "Table",
            "a loop variable symbol as the iterator's first element",
            spec,
        ));
    };
    let one = Expr::integer(1);
    match items.len() {
        2 => Ok(Iter::Range {
            var,
            start: one.clone(),
            end: items[1].clone(),
            step: one,
        }),
        3 => Ok(Iter::Range {
            var,
            start: items[1].clone(),
            end: items[2].clone(),
            step: one,
        }),
        4 => Ok(Iter::Range {
            var,
            start: items[1].clone(),
            end: items[2].clone(),
            step: items[3].clone(),
        }),
        _ => Err(type_error("Table", "a List iterator of 2 to 4 elements", spec)),
    }
}

fn table_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("Table", "2 arguments", args.len());
    }
    run_iteration("Table", &args[0], &args[1], ctx, true)
}

fn do_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("Do", "2 arguments", args.len());
    }
    run_iteration("Do", &args[0], &args[1], ctx, false)
}

fn run_iteration(name: &str, body: &Expr, iter_spec: &Expr, ctx: &Context, collect: bool) -> Expr {
    let iter = match parse_iterator(iter_spec, ctx) {
        Ok(iter) => iter,
        Err(e) => return e,
    };
    let cap = ctx.limits().table_cap;
    let list_name = ctx.interner().intern("List");

    match iter {
        Iter::Count(n) => {
            let count = usize::try_from(n.max(0)).unwrap_or(0).min(cap);
            let mut results = Vec::with_capacity(if collect { count } else { 0 });
            for _ in 0..count {
                let value = evaluate(body.clone(), ctx);
                if value.is_error() {
                    return value;
                }
                if collect {
                    results.push(value);
                }
            }
            if collect {
                Expr::call(list_name, results)
            } else {
                null(ctx)
            }
        }
        Iter::Range { var, start, end, step } => {
            let child = ctx.child();
            let start_value = evaluate(start, &child);
            if start_value.is_error() {
                return start_value;
            }
            let step_value = evaluate(step, &child);
            if step_value.is_error() {
                return step_value;
            }
            let end_value = evaluate(end, &child);
            if end_value.is_error() {
                return end_value;
            }

            let plus = ctx.interner().intern("Plus");
            let less_equal = ctx.interner().intern("LessEqual");

            let mut current = start_value;
            let mut results = Vec::new();
            let mut iterations = 0usize;
            loop {
                if iterations >= cap {
                    break;
                }
                let continues = evaluate(
                    Expr::call(less_equal, vec![current.clone(), end_value.clone()]),
                    &child,
                );
                match continues {
                    Expr::Boolean(true) => {}
                    Expr::Boolean(false) => break,
                    err @ Expr::Error(_) => return err,
                    other => return type_error(name, "a comparable loop bound", &other),
                }
                child.define_local(var, current.clone());
                let value = evaluate(body.clone(), &child);
                if value.is_error() {
                    return value;
                }
                if collect {
                    results.push(value);
                }
                current = evaluate(Expr::call(plus, vec![current, step_value.clone()]), &child);
                if current.is_error() {
                    return current;
                }
                iterations += 1;
            }
            if collect {
                Expr::call(list_name, results)
            } else {
                null(ctx)
            }
        }
    }
}

fn eval_args(args: &[Expr], ctx: &Context) -> Result<Vec<Expr>, Expr> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        let value = evaluate(a.clone(), ctx);
        if value.is_error() {
            return Err(value);
        }
        out.push(value);
    }
    Ok(out)
}

fn slice_range_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 3 {
        return argument_error("SliceRange", "3 arguments", args.len());
    }
    let evaluated = match eval_args(args, ctx) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let (Some(s), Some(e)) = (evaluated[1].as_integer(), evaluated[2].as_integer()) else {
        return type_error("SliceRange", "integer bounds", &evaluated[1]);
    };
    sliceable::slice_range(ctx, &evaluated[0], s, e)
}

fn take_from_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 2 {
        return argument_error("TakeFrom", "2 arguments", args.len());
    }
    let evaluated = match eval_args(args, ctx) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(s) = evaluated[1].as_integer() else {
        return type_error("TakeFrom", "an integer count", &evaluated[1]);
    };
    sliceable::take_from(ctx, &evaluated[0], s)
}

fn part_set_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 3 {
        return argument_error("PartSet", "3 arguments", args.len());
    }
    let evaluated = match eval_args(args, ctx) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(i) = evaluated[1].as_integer() else {
        return type_error("PartSet", "an integer index", &evaluated[1]);
    };
    sliceable::part_set(ctx, &evaluated[0], i, &evaluated[2])
}

fn slice_set_form(args: &[Expr], ctx: &Context) -> Expr {
    if args.len() != 4 {
        return argument_error("SliceSet", "4 arguments", args.len());
    }
    let evaluated = match eval_args(args, ctx) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let (Some(s), Some(e)) = (evaluated[1].as_integer(), evaluated[2].as_integer()) else {
        return type_error("SliceSet", "integer bounds", &evaluated[1]);
    };
    sliceable::slice_set(ctx, &evaluated[0], s, e, &evaluated[3])
}
