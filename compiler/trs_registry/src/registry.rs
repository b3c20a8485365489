//! The per-head-symbol rule table (spec.md §4.5).
//!
//! One `FxHashMap<Name, RwLock<Vec<Rule>>>` behind an outer `RwLock`,
//! matching `ori_eval::shared::SharedRegistry`'s `rustc-hash` +
//! `parking_lot` combination for compiler-internal maps. Built-in
//! rules and user rules share this one mechanism, per spec.md §4.5 — the
//! registry never distinguishes them beyond what `RuleBody` variant a
//! `Rule` carries.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use trs_ir::{Expr, Name};
use trs_patterns::{match_sequence, Bindings};

use crate::rule::Rule;

/// Pattern-indexed, specificity-ordered rule table.
pub struct FunctionRegistry {
    rules: RwLock<FxHashMap<Name, RwLock<Vec<Rule>>>>,
    /// Interned `"List"`, needed by the matcher to build sequence-capture
    /// values without interning anything itself.
    list_symbol: Name,
}

impl FunctionRegistry {
    pub fn new(list_symbol: Name) -> Self {
        FunctionRegistry {
            rules: RwLock::new(FxHashMap::default()),
            list_symbol,
        }
    }

    /// Register `rule` under `head`. If an existing rule has a
    /// structurally equal pattern (spec.md §4.3), it is replaced in
    /// place; otherwise `rule` is inserted so the bucket stays sorted by
    /// descending specificity, with ties resolved by insertion order.
    pub fn define(&self, head: Name, rule: Rule) {
        let mut guard = self.rules.write();
        let bucket = guard.entry(head).or_insert_with(|| RwLock::new(Vec::new()));
        Self::insert_into(bucket, rule);
    }

    fn insert_into(bucket: &RwLock<Vec<Rule>>, rule: Rule) {
        let mut bucket = bucket.write();
        if let Some(pos) = bucket.iter().position(|r| r.same_pattern_as(&rule.params)) {
            bucket[pos] = rule;
            return;
        }
        let idx = bucket
            .iter()
            .position(|r| r.specificity < rule.specificity)
            .unwrap_or(bucket.len());
        bucket.insert(idx, rule);
    }

    /// Find the first rule under `head` whose pattern matches `args`,
    /// trying rules in their stored (descending-specificity) order.
    #[tracing::instrument(level = "trace", skip(self, args))]
    pub fn find_match(&self, head: Name, args: &[Expr]) -> Option<(Rule, Bindings)> {
        let guard = self.rules.read();
        let bucket = guard.get(&head)?.read();
        for rule in bucket.iter() {
            let mut bindings = Bindings::default();
            if match_sequence(&rule.params, args, self.list_symbol, &mut bindings) {
                tracing::trace!(specificity = rule.specificity, "rule matched");
                return Some((rule.clone(), bindings));
            }
        }
        None
    }

    /// Number of rules registered under `head`, for tests and diagnostics.
    pub fn rule_count(&self, head: Name) -> usize {
        self.rules
            .read()
            .get(&head)
            .map_or(0, |bucket| bucket.read().len())
    }
}

/// Cheaply-cloned handle to a shared registry, the way `trs_symbols`
/// shares its `SymbolTable`.
#[derive(Clone)]
pub struct SharedFunctionRegistry(Arc<FunctionRegistry>);

impl SharedFunctionRegistry {
    pub fn new(list_symbol: Name) -> Self {
        SharedFunctionRegistry(Arc::new(FunctionRegistry::new(list_symbol)))
    }
}

impl std::ops::Deref for SharedFunctionRegistry {
    type Target = FunctionRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleBody;
    use pretty_assertions::assert_eq;
    use trs_ir::StringInterner;
    use trs_patterns::{Pattern, TypeConstraint};

    fn registry() -> (StringInterner, FunctionRegistry) {
        let interner = StringInterner::new();
        let list = interner.intern("List");
        (interner, FunctionRegistry::new(list))
    }

    #[test]
    fn redefining_the_same_pattern_replaces_in_place() {
        let (interner, registry) = registry();
        let f = interner.intern("f");
        registry.define(f, Rule::user(vec![Pattern::Blank(None)], Expr::integer(1)));
        registry.define(f, Rule::user(vec![Pattern::Blank(None)], Expr::integer(2)));
        assert_eq!(registry.rule_count(f), 1);
        let (rule, _) = registry.find_match(f, &[Expr::integer(5)]).expect("match");
        match rule.body {
            RuleBody::User(e) => assert_eq!(e, Expr::integer(2)),
            RuleBody::Native(_) => panic!("expected user body"),
        }
    }

    #[test]
    fn more_specific_rule_is_tried_first() {
        let (interner, registry) = registry();
        let f = interner.intern("f");
        registry.define(f, Rule::user(vec![Pattern::Blank(None)], Expr::integer(1)));
        registry.define(
            f,
            Rule::user(vec![Pattern::Literal(Expr::integer(42))], Expr::integer(2)),
        );
        let (rule, _) = registry.find_match(f, &[Expr::integer(42)]).expect("match");
        match rule.body {
            RuleBody::User(e) => assert_eq!(e, Expr::integer(2)),
            RuleBody::Native(_) => panic!("expected literal rule to win"),
        }
    }

    #[test]
    fn ties_preserve_insertion_order() {
        let (interner, registry) = registry();
        let f = interner.intern("f");
        registry.define(
            f,
            Rule::user(
                vec![Pattern::Blank(Some(TypeConstraint::Integer))],
                Expr::integer(1),
            ),
        );
        registry.define(
            f,
            Rule::user(
                vec![Pattern::Blank(Some(TypeConstraint::Str))],
                Expr::integer(2),
            ),
        );
        let (rule, _) = registry.find_match(f, &[Expr::integer(7)]).expect("match");
        match rule.body {
            RuleBody::User(e) => assert_eq!(e, Expr::integer(1)),
            RuleBody::Native(_) => panic!("expected the integer-typed rule"),
        }
    }

    #[test]
    fn no_match_returns_none() {
        let (interner, registry) = registry();
        let f = interner.intern("f");
        registry.define(
            f,
            Rule::user(vec![Pattern::Literal(Expr::integer(1))], Expr::integer(1)),
        );
        assert!(registry.find_match(f, &[Expr::integer(2)]).is_none());
    }

    #[test]
    fn sequence_pattern_binds_arguments_on_match() {
        let (interner, registry) = registry();
        let f = interner.intern("f");
        let xs = interner.intern("xs");
        registry.define(
            f,
            Rule::user(
                vec![Pattern::Named(xs, Box::new(Pattern::BlankSequence(None)))],
                Expr::integer(0),
            ),
        );
        let (_, bindings) = registry
            .find_match(f, &[Expr::integer(1), Expr::integer(2)])
            .expect("match");
        let list = interner.intern("List");
        assert_eq!(
            bindings.get(&xs),
            Some(&Expr::call(list, vec![Expr::integer(1), Expr::integer(2)]))
        );
    }
}
