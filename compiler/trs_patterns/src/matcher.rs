//! The structural matcher (spec.md §4.4).
//!
//! Binds an expression (or an argument list) against a pattern, producing
//! variable bindings or failure. **Does not backtrack**: a single argument
//! list may contain at most one sequence pattern (`BlankSequence`/
//! `BlankNullSequence`) whose consumption is unambiguous; if more than one
//! appears, the greedy-with-reservation policy below resolves it without
//! trying alternatives. This mirrors `ori_canon::exhaustiveness`'s
//! non-backtracking decision trees in spirit, not in implementation — the
//! policy here is the one spec.md §4.4/§9 calls for, not exhaustiveness
//! checking.

use rustc_hash::FxHashMap;
use trs_ir::{Expr, Name};

use crate::pattern::Pattern;

/// Bindings accumulated by a successful match.
pub type Bindings = FxHashMap<Name, Expr>;

/// Strip exactly one level of `Named`, returning the bound name (if any)
/// alongside the inner pattern actually doing the matching.
fn strip_named(pattern: &Pattern) -> (Option<Name>, &Pattern) {
    match pattern {
        Pattern::Named(name, inner) => (Some(*name), inner.as_ref()),
        other => (None, other),
    }
}

/// Match a single pattern against a single expression.
///
/// `list_symbol` is the interned `Name` for `"List"`, needed to build the
/// `List(...)` values a sequence binding captures; callers own the
/// interner, so the matcher never interns anything itself.
pub fn try_match(pattern: &Pattern, expr: &Expr, list_symbol: Name, bindings: &mut Bindings) -> bool {
    let (bind_name, inner) = strip_named(pattern);
    let ok = match inner {
        Pattern::Blank(_) => inner.type_matches(expr),
        Pattern::BlankSequence(_) | Pattern::BlankNullSequence(_) => {
            // Standalone (non-argument-list) use: treat as a single-element
            // sequence capture, per the same List(...) wrapping rule as in
            // an argument list.
            if inner.type_matches(expr) {
                if let Some(name) = bind_name {
                    if name != Name::EMPTY {
                        bindings.insert(name, Expr::call(list_symbol, vec![expr.clone()]));
                    }
                }
                return true;
            }
            false
        }
        Pattern::Literal(lit) => lit.structural_eq(expr),
        Pattern::Structural(head, params) => match expr.as_application() {
            Some((head_expr, args)) => {
                head_expr.as_symbol() == Some(*head) && match_sequence(params, args, list_symbol, bindings)
            }
            None => false,
        },
        Pattern::Named(_, _) => unreachable!("strip_named only strips one level"),
    };
    if ok {
        if let Some(name) = bind_name {
            if name != Name::EMPTY {
                bindings.insert(name, expr.clone());
            }
        }
    }
    ok
}

/// Match a list of parameter patterns against a list of argument
/// expressions: the sequence matcher spec.md §4.4 describes.
///
/// Greedy but right-aware: each sequence pattern consumes as many leading
/// expressions as it can while still leaving at least `min_arity()` for
/// every pattern after it. Only one scan over `params`/`args` is made; no
/// alternative split is ever tried if the reserved-count math comes up
/// short, which is the documented non-backtracking limitation.
pub fn match_sequence(params: &[Pattern], args: &[Expr], list_symbol: Name, bindings: &mut Bindings) -> bool {
    let mut ai = 0usize;
    for (idx, param) in params.iter().enumerate() {
        let (bind_name, inner) = strip_named(param);
        if inner.is_sequence() {
            let reserved: usize = params[idx + 1..].iter().map(Pattern::min_arity).sum();
            let available = args.len().saturating_sub(ai);
            if available < reserved {
                return false;
            }
            let take = available - reserved;
            let min_take = usize::from(matches!(inner, Pattern::BlankSequence(_)));
            if take < min_take {
                return false;
            }
            let slice = &args[ai..ai + take];
            if !slice.iter().all(|e| inner.type_matches(e)) {
                return false;
            }
            if let Some(name) = bind_name {
                if name != Name::EMPTY {
                    bindings.insert(name, Expr::call(list_symbol, slice.to_vec()));
                }
            }
            ai += take;
        } else {
            let Some(arg) = args.get(ai) else { return false };
            if !try_match(param, arg, list_symbol, bindings) {
                return false;
            }
            ai += 1;
        }
    }
    ai == args.len()
}
