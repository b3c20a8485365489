//! Bridges `trs_registry::Evaluator` — the seam native operators reach the
//! evaluator through — to a live `Context` and this crate's own recursive
//! `evaluate`. `trs_eval` is the sole implementer the seam's doc comment
//! promises (`trs_registry::rule::Evaluator`).

use trs_ir::{Expr, Name};
use trs_registry::Evaluator;
use trs_symbols::Attributes;

use crate::context::Context;
use crate::evaluator::evaluate;

pub struct NativeInterp<'a> {
    ctx: &'a Context,
}

impl<'a> NativeInterp<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        NativeInterp { ctx }
    }
}

impl Evaluator for NativeInterp<'_> {
    fn eval(&mut self, expr: Expr) -> Expr {
        evaluate(expr, self.ctx)
    }

    fn intern(&mut self, name: &str) -> Name {
        self.ctx.interner().intern(name)
    }

    fn lookup(&self, name: Name) -> String {
        self.ctx.interner().lookup(name).to_owned()
    }

    fn eval_with_binding(&mut self, name: Name, value: Expr, body: Expr) -> Expr {
        let child = self.ctx.child();
        child.define_local(name, value);
        evaluate(body, &child)
    }

    fn symbol_attributes(&self, name: Name) -> Attributes {
        self.ctx.symbols().attributes(name)
    }

    fn set_symbol_attributes(&mut self, name: Name, attrs: Attributes) -> Attributes {
        self.ctx.symbols().set_attributes(name, attrs)
    }

    fn clear_symbol_attributes(&mut self, name: Name, attrs: Attributes) -> Attributes {
        self.ctx.symbols().clear_attributes(name, attrs)
    }

    fn clear_all_symbol_attributes(&mut self, name: Name) {
        self.ctx.symbols().clear_all_attributes(name);
    }
}
