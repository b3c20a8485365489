//! Embedding façade over the evaluator crates (spec.md §6): `parse`/
//! `parse_string`/`evaluate_string` convenience functions and a thin
//! `Evaluator` wrapper pairing a `trs_eval::Context` with the reader that
//! shares its symbol interner.
//!
//! # Re-exports
//!
//! This crate re-exports the evaluator's public surface for convenience:
//! `Context`, `evaluate`, `EvalLimits`.

pub mod reader;
mod tracing_setup;

pub use reader::ReadError;
pub use tracing_setup::init_tracing;
pub use trs_eval::{evaluate, Context, EvalLimits};
pub use trs_symbols::Attributes;

use trs_ir::Expr;

/// A `Context` paired with convenience methods — the façade's
/// `new_evaluator`/`new_evaluator_with_context` surface (spec.md §6).
pub struct Evaluator {
    ctx: Context,
}

impl Evaluator {
    /// A fresh evaluator over a freshly built root context.
    pub fn new() -> Self {
        Evaluator { ctx: trs_eval::new_context() }
    }

    /// Wrap an already-built context (e.g. one seeded with extra
    /// definitions by the caller before handing it here).
    pub fn with_context(ctx: Context) -> Self {
        Evaluator { ctx }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Parse `input` against this evaluator's own interner and evaluate
    /// the result.
    pub fn eval_str(&self, input: &str) -> Result<Expr, ReadError> {
        let parsed = reader::read(input, self.ctx.interner())?;
        Ok(evaluate(parsed, &self.ctx))
    }

    pub fn eval(&self, expr: Expr) -> Expr {
        evaluate(expr, &self.ctx)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh root context, seeded with the default attribute table and
/// native operator catalogue (spec.md §6 `new_context()`).
pub fn new_context() -> Context {
    trs_eval::new_context()
}

/// Wrap an existing context in an `Evaluator` (spec.md §6
/// `new_evaluator_with_context(ctx)`).
pub fn new_evaluator_with_context(ctx: Context) -> Evaluator {
    Evaluator::with_context(ctx)
}

/// Parse `input`, interning symbols through `ctx`'s own interner so the
/// result can be evaluated against that same context.
pub fn parse(input: &str, ctx: &Context) -> Result<Expr, ReadError> {
    reader::read(input, ctx.interner())
}

/// Parse `input` against a throwaway context's interner — useful when the
/// caller only needs the parsed tree's shape (e.g. for display or
/// grammar testing), not a context to evaluate it in.
pub fn parse_string(input: &str) -> Result<Expr, ReadError> {
    let ctx = new_context();
    parse(input, &ctx)
}

/// Parse and evaluate `input` against a fresh context in one call. Keeps
/// the parse-error/evaluation-error channels spec.md §7 requires separate:
/// a malformed `input` surfaces as `Err(ReadError)`, never as an
/// `Expr::Error` — only evaluation failures take that form.
pub fn evaluate_string(input: &str) -> Result<Expr, ReadError> {
    let ctx = new_context();
    let parsed = parse(input, &ctx)?;
    Ok(evaluate(parsed, &ctx))
}

/// The canonical `"{A, B, C}"` rendering of an attribute set (spec.md §6).
pub fn attributes_to_string(attrs: Attributes) -> String {
    attrs.to_canonical_string()
}
