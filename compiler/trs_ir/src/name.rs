//! Interned symbol names.
//!
//! Every `Symbol` and application head in the evaluator is looked up by
//! name constantly (attribute checks, registry dispatch, variable binding),
//! so names are interned once into a compact, `Copy` handle instead of being
//! carried around as owned `String`s.
//!
//! Unlike a full compiler's identifier table, a single evaluation session
//! never accumulates enough distinct names to need sharded concurrent
//! interning, so this is one `RwLock` around one map rather than the
//! sharded design larger interners use.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Interned identifier. Cheap to copy and compare.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

struct Inner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// String interner shared by a symbol table, context tree, and registry.
pub struct StringInterner {
    inner: RwLock<Inner>,
    count: AtomicU32,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut inner = Inner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        inner.map.insert("", 0);
        inner.strings.push("");
        let interner = StringInterner {
            inner: RwLock::new(inner),
            count: AtomicU32::new(1),
        };
        for kw in BUILTIN_CONSTANTS {
            interner.intern(kw);
        }
        interner
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name(idx);
            }
        }
        let mut guard = self.inner.write();
        if let Some(&idx) = guard.map.get(s) {
            return Name(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        #[allow(clippy::expect_used)] // table index fits u32 long before memory runs out
        let idx = u32::try_from(guard.strings.len()).expect("name table overflow");
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        self.count.fetch_add(1, Ordering::Relaxed);
        Name(idx)
    }

    /// Look up the string for a previously interned `Name`.
    pub fn lookup(&self, name: Name) -> &str {
        let guard = self.inner.read();
        guard.strings[name.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned names without depending on the concrete
/// interner type — lets `Expr`'s `Display` impl stay generic.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Shared handle to an interner, cloned cheaply across a context tree.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(&self.0, name)
    }
}

const BUILTIN_CONSTANTS: &[&str] = &[
    "Pi", "E", "True", "False", "Null", "List", "Plus", "Times", "Power", "Hold", "If", "While",
    "CompoundExpression", "Module", "Block", "Set", "SetDelayed", "Unset", "And", "Or", "Pattern",
    "Blank", "BlankSequence", "BlankNullSequence", "Attributes", "SetAttributes",
    "ClearAttributes",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_lookup_round_trips() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "foo");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("x"), interner.intern("y"));
    }

    #[test]
    fn empty_string_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
    }

    #[test]
    fn shared_interner_clones_share_state() {
        let interner = SharedInterner::new();
        let clone = interner.clone();
        assert_eq!(interner.intern("shared"), clone.intern("shared"));
    }
}
