//! A single rule: `(structural_pattern, body)` registered against a head
//! symbol (spec.md §3 "Rule", §4.5).

use trs_ir::{Expr, Name};
use trs_patterns::{rule_specificity, Pattern};
use trs_symbols::Attributes;

/// Seam a native operator uses to recursively evaluate an expression,
/// intern symbol names, bind a pure-function parameter (`Map`'s `$1`),
/// and read/write the symbol attribute table (`SetAttributes` and kin),
/// without `trs_registry` depending on the evaluator crate that implements
/// it. `trs_eval`'s evaluation context is the sole implementer.
pub trait Evaluator {
    fn eval(&mut self, expr: Expr) -> Expr;
    fn intern(&mut self, name: &str) -> Name;
    fn lookup(&self, name: Name) -> String;

    /// Evaluate `body` in a fresh child scope with `name` bound to
    /// `value` — the seam `Map`'s pure-function application uses.
    fn eval_with_binding(&mut self, name: Name, value: Expr, body: Expr) -> Expr;

    fn symbol_attributes(&self, name: Name) -> Attributes;
    fn set_symbol_attributes(&mut self, name: Name, attrs: Attributes) -> Attributes;
    fn clear_symbol_attributes(&mut self, name: Name, attrs: Attributes) -> Attributes;
    fn clear_all_symbol_attributes(&mut self, name: Name);
}

/// A native operator: the bound, already-evaluated arguments and an
/// evaluator seam in, a result `Expr` out.
pub type NativeOp = fn(&[Expr], &mut dyn Evaluator) -> Expr;

/// The two shapes a rule's right-hand side can take (spec.md §3 "Rule").
#[derive(Clone)]
pub enum RuleBody {
    /// A built-in operator implemented in Rust.
    Native(NativeOp),
    /// A user-supplied expression (from `SetDelayed`), whose free symbols
    /// may refer to names the matcher bound.
    User(Expr),
}

/// `(head_symbol, structural_pattern, body)`, with `head_symbol` implicit
/// in which bucket of the registry a `Rule` lives.
#[derive(Clone)]
pub struct Rule {
    pub params: Vec<Pattern>,
    pub specificity: u32,
    pub body: RuleBody,
}

impl Rule {
    pub fn new(params: Vec<Pattern>, body: RuleBody) -> Self {
        let specificity = rule_specificity(&params);
        Rule {
            params,
            specificity,
            body,
        }
    }

    pub fn native(params: Vec<Pattern>, op: NativeOp) -> Self {
        Rule::new(params, RuleBody::Native(op))
    }

    pub fn user(params: Vec<Pattern>, body: Expr) -> Self {
        Rule::new(params, RuleBody::User(body))
    }

    /// Does `other_params` describe the same rule shape as this one, per
    /// spec.md §4.3 `patterns_equal`? Used by the registry's redefinition
    /// check.
    pub fn same_pattern_as(&self, other_params: &[Pattern]) -> bool {
        self.params.len() == other_params.len()
            && self
                .params
                .iter()
                .zip(other_params)
                .all(|(a, b)| trs_patterns::patterns_equal(a, b))
    }
}
