//! The evaluation context: variable bindings with a parent chain, plus the
//! shared services every node in a context tree carries by reference
//! (spec.md §3 "Context", §4.8).
//!
//! Grounded on the scope-over-`Rc<RefCell<_>>` design of
//! `ori_eval::environment::{LocalScope, Scope}`, generalized so each
//! node also carries its shared symbol table, registry, and frame stack —
//! `Rc` suffices for the parent chain and frame stack since evaluation is
//! single-threaded per spec.md §5, while the symbol table is `Arc`-backed
//! (via `trs_symbols::SharedSymbolTable`) because spec.md §5 requires it
//! safe under concurrent evaluators sharing a context tree.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use trs_diagnostic::{protection_error, FrameStack};
use trs_ir::{Expr, Name, SharedInterner};
use trs_registry::SharedFunctionRegistry;
use trs_symbols::{Attributes, SharedSymbolTable};

use crate::limits::EvalLimits;

struct ContextNode {
    variables: RefCell<FxHashMap<Name, Expr>>,
    /// `Some` marks this node as a `Block` frame: a lookup of one of these
    /// names that reaches this node without finding a binding stops here,
    /// even if an ancestor has the name (spec.md §4.8).
    scoped: Option<FxHashSet<Name>>,
    parent: Option<Context>,
    interner: SharedInterner,
    symbols: SharedSymbolTable,
    registry: SharedFunctionRegistry,
    stack: Rc<RefCell<FrameStack>>,
    limits: EvalLimits,
}

/// Cheaply-cloned handle to a context node (spec.md §3: "Child contexts
/// share the symbol table, registry, and stack by reference; only
/// `variables` and `parent` differ").
#[derive(Clone)]
pub struct Context(Rc<ContextNode>);

impl Context {
    /// Build a fresh root context with no bindings and no parent.
    pub fn root(
        interner: SharedInterner,
        symbols: SharedSymbolTable,
        registry: SharedFunctionRegistry,
        limits: EvalLimits,
    ) -> Context {
        Context(Rc::new(ContextNode {
            variables: RefCell::new(FxHashMap::default()),
            scoped: None,
            parent: None,
            interner,
            symbols,
            registry,
            stack: Rc::new(RefCell::new(FrameStack::new(limits.recursion_limit))),
            limits,
        }))
    }

    /// An ordinary child context: a fresh binding frame for pattern
    /// variables or a rule body, sharing every other service.
    #[must_use]
    pub fn child(&self) -> Context {
        Context(Rc::new(ContextNode {
            variables: RefCell::new(FxHashMap::default()),
            scoped: None,
            parent: Some(self.clone()),
            interner: self.0.interner.clone(),
            symbols: self.0.symbols.clone(),
            registry: self.0.registry.clone(),
            stack: Rc::clone(&self.0.stack),
            limits: self.0.limits,
        }))
    }

    /// A `Block` child: `scoped` names are looked up only within this
    /// subtree, shadowing any same-named outer binding for the block's
    /// duration (spec.md §4.6.3 "Block").
    #[must_use]
    pub fn block_child(&self, scoped: FxHashSet<Name>) -> Context {
        Context(Rc::new(ContextNode {
            variables: RefCell::new(FxHashMap::default()),
            scoped: Some(scoped),
            parent: Some(self.clone()),
            interner: self.0.interner.clone(),
            symbols: self.0.symbols.clone(),
            registry: self.0.registry.clone(),
            stack: Rc::clone(&self.0.stack),
            limits: self.0.limits,
        }))
    }

    /// Walk the parent chain for `name`, stopping at any `Block` frame
    /// that scopes it without a binding present.
    pub fn get(&self, name: Name) -> Option<Expr> {
        if let Some(v) = self.0.variables.borrow().get(&name) {
            return Some(v.clone());
        }
        if let Some(scoped) = &self.0.scoped {
            if scoped.contains(&name) {
                return None;
            }
        }
        self.0.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Bind `name` in the current frame without any protection check —
    /// used for local bindings a special form introduces itself (`Block`
    /// locals, `Table`/`Do` loop variables, pattern-variable binding),
    /// which are not subject to `Set`'s `Protected`/`$`-prefix rules.
    pub fn define_local(&self, name: Name, value: Expr) {
        self.0.variables.borrow_mut().insert(name, value);
    }

    /// `Set`'s write path: rejects `$`-prefixed and `Protected` symbols
    /// (spec.md §4.6.3 "Set", §4.8), then assigns at whichever frame
    /// already owns `name` — an existing binding, or a `Block` frame that
    /// declared it as local — walking out to the root if no frame owns it
    /// yet. This is what lets a `Table`/`Do` loop body (which runs in its
    /// own child frame so the loop variable doesn't leak) still mutate an
    /// outer variable through an ordinary `Set`.
    pub fn set(&self, name: Name, value: Expr) -> Result<Expr, Expr> {
        let symbol_text = self.0.interner.lookup(name).to_owned();
        if symbol_text.starts_with('$') {
            return Err(protection_error(&symbol_text));
        }
        if self.0.symbols.has_attribute(name, Attributes::PROTECTED) {
            return Err(protection_error(&symbol_text));
        }
        self.assign_existing_or_root(name, value.clone());
        Ok(value)
    }

    fn assign_existing_or_root(&self, name: Name, value: Expr) {
        let owns_binding = self.0.variables.borrow().contains_key(&name);
        let owns_as_local = self.0.scoped.as_ref().is_some_and(|s| s.contains(&name));
        if owns_binding || owns_as_local {
            self.0.variables.borrow_mut().insert(name, value);
            return;
        }
        match &self.0.parent {
            Some(parent) => parent.assign_existing_or_root(name, value),
            None => {
                self.0.variables.borrow_mut().insert(name, value);
            }
        }
    }

    pub fn unset(&self, name: Name) {
        self.0.variables.borrow_mut().remove(&name);
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.0.interner
    }

    pub fn symbols(&self) -> &SharedSymbolTable {
        &self.0.symbols
    }

    pub fn registry(&self) -> &SharedFunctionRegistry {
        &self.0.registry
    }

    pub fn stack(&self) -> &Rc<RefCell<FrameStack>> {
        &self.0.stack
    }

    pub fn limits(&self) -> EvalLimits {
        self.0.limits
    }
}
