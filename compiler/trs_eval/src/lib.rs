//! Recursive evaluator for term-rewriting expressions (spec.md §4): hold
//! semantics, structural attribute rewrites (`Flat`/`Orderless`/`OneIdentity`),
//! pattern-rule dispatch through `trs_registry`, the built-in special forms
//! (spec.md §4.6.3), and the fixed-point re-evaluation loop that lets a rule
//! body's own result be evaluated again until it stops changing.
//!
//! # Architecture
//!
//! - `context`: variable bindings plus the services (interner, symbol table,
//!   registry, frame stack) every node in a context tree shares by reference.
//! - `evaluator`: `evaluate`/`evaluate_step`, the dispatch at the heart of
//!   this crate — atoms, applications, structural transforms, rule lookup,
//!   and the fixed-point loop.
//! - `special_forms`: `Hold`, `If`, `Module`, `Block`, `Set`/`SetDelayed`,
//!   `CompoundExpression`, `Table`, `Do`, and the rest of spec.md §4.6.3,
//!   each intercepted by head name before ordinary rule dispatch runs.
//! - `sliceable`: `Part`/`Take`/`Drop`-style index and range semantics shared
//!   by several special forms and native operators.
//! - `interpreter`: `NativeInterp`, the `trs_registry::Evaluator` impl that
//!   lets native operators call back into this crate's own `evaluate`.
//! - `builtins`: the default attribute table and native rule registrations
//!   (spec.md §6) applied to every freshly built root context.
//! - `limits`: `EvalLimits`, the recursion/fixed-point/table-size guards.

mod builtins;
mod context;
mod evaluator;
mod interpreter;
mod limits;
mod sliceable;
mod special_forms;

#[cfg(test)]
mod tests;

pub use context::Context;
pub use evaluator::evaluate;
pub use interpreter::NativeInterp;
pub use limits::EvalLimits;

use trs_ir::SharedInterner;
use trs_registry::SharedFunctionRegistry;
use trs_symbols::SharedSymbolTable;

/// Build a fresh root `Context` with the default recursion/fixed-point/
/// table-size limits, seeded with every built-in symbol's default
/// attributes and native rule (spec.md §6).
pub fn new_context() -> Context {
    new_context_with_limits(EvalLimits::default())
}

/// As `new_context`, but with caller-chosen limits — used by tests that
/// need a tighter recursion or fixed-point cap than the default.
pub fn new_context_with_limits(limits: EvalLimits) -> Context {
    let interner = SharedInterner::new();
    let symbols = SharedSymbolTable::new();
    let list = interner.intern("List");
    let registry = SharedFunctionRegistry::new(list);
    let ctx = Context::root(interner, symbols, registry, limits);
    builtins::register_defaults(&ctx);
    ctx
}
