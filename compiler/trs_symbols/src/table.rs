//! The symbol attribute table: which attributes are set on which symbol.
//!
//! Shared across every context in an evaluation session (spec.md §3), so
//! it's one `RwLock`-guarded map behind an `Arc`, matching the
//! `rustc-hash` + `parking_lot` combination other compiler-internal maps
//! in this workspace use.

use crate::attributes::Attributes;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use trs_ir::{Name, StringLookup};

/// Maps symbols to their attribute bitsets.
pub struct SymbolTable {
    entries: RwLock<FxHashMap<Name, Attributes>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Union `attrs` into the symbol's existing attribute set, returning
    /// the resulting set.
    pub fn set_attributes(&self, symbol: Name, attrs: Attributes) -> Attributes {
        let mut guard = self.entries.write();
        let entry = guard.entry(symbol).or_insert(Attributes::empty());
        *entry |= attrs;
        *entry
    }

    /// Remove `attrs` from the symbol's attribute set, returning the
    /// resulting set.
    pub fn clear_attributes(&self, symbol: Name, attrs: Attributes) -> Attributes {
        let mut guard = self.entries.write();
        let entry = guard.entry(symbol).or_insert(Attributes::empty());
        entry.remove(attrs);
        *entry
    }

    /// Remove every attribute from a symbol.
    pub fn clear_all_attributes(&self, symbol: Name) {
        self.entries.write().insert(symbol, Attributes::empty());
    }

    pub fn has_attribute(&self, symbol: Name, attr: Attributes) -> bool {
        self.entries
            .read()
            .get(&symbol)
            .is_some_and(|a| a.contains(attr))
    }

    pub fn attributes(&self, symbol: Name) -> Attributes {
        self.entries
            .read()
            .get(&symbol)
            .copied()
            .unwrap_or_else(Attributes::empty)
    }

    /// Every symbol carrying at least one attribute, sorted by name.
    pub fn all_symbols_with_attributes<L: StringLookup>(
        &self,
        interner: &L,
    ) -> Vec<(Name, Attributes)> {
        let guard = self.entries.read();
        let mut out: Vec<(Name, Attributes)> = guard
            .iter()
            .filter(|(_, attrs)| !attrs.is_empty())
            .map(|(name, attrs)| (*name, *attrs))
            .collect();
        out.sort_by(|(a, _), (b, _)| interner.lookup(*a).cmp(interner.lookup(*b)));
        out
    }

    /// Drop every recorded attribute for every symbol.
    pub fn reset(&self) {
        self.entries.write().clear();
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

/// Cheaply-cloned handle to a shared symbol table.
#[derive(Clone)]
pub struct SharedSymbolTable(Arc<SymbolTable>);

impl SharedSymbolTable {
    pub fn new() -> Self {
        SharedSymbolTable(Arc::new(SymbolTable::new()))
    }
}

impl Default for SharedSymbolTable {
    fn default() -> Self {
        SharedSymbolTable::new()
    }
}

impl std::ops::Deref for SharedSymbolTable {
    type Target = SymbolTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
