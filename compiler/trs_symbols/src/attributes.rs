//! The per-symbol attribute bitset.
//!
//! A `HashSet<String>` per symbol would work but costs an allocation and a
//! hash per membership test on every evaluation step; attributes are a
//! closed, small set known at compile time, so they're a `bitflags` bitset
//! instead, representing closed flag sets directly rather than going
//! through open string sets.

use bitflags::bitflags;

bitflags! {
    /// The thirteen attributes a symbol can carry. Declared in the
    /// alphabetical order `Attributes()` enumerates them in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attributes: u16 {
        const CONSTANT         = 1 << 0;
        const FLAT             = 1 << 1;
        const HOLD_ALL         = 1 << 2;
        const HOLD_FIRST       = 1 << 3;
        const HOLD_REST        = 1 << 4;
        const LISTABLE         = 1 << 5;
        const LOCKED           = 1 << 6;
        const NUMERIC_FUNCTION = 1 << 7;
        const ONE_IDENTITY     = 1 << 8;
        const ORDERLESS        = 1 << 9;
        const PROTECTED        = 1 << 10;
        const READ_PROTECTED   = 1 << 11;
        const TEMPORARY        = 1 << 12;
    }
}

/// `(flag, canonical name)` pairs in the declared alphabetical order,
/// shared by `Attributes()` enumeration and parsing attribute names back
/// from source.
const NAMED_FLAGS: &[(Attributes, &str)] = &[
    (Attributes::CONSTANT, "Constant"),
    (Attributes::FLAT, "Flat"),
    (Attributes::HOLD_ALL, "HoldAll"),
    (Attributes::HOLD_FIRST, "HoldFirst"),
    (Attributes::HOLD_REST, "HoldRest"),
    (Attributes::LISTABLE, "Listable"),
    (Attributes::LOCKED, "Locked"),
    (Attributes::NUMERIC_FUNCTION, "NumericFunction"),
    (Attributes::ONE_IDENTITY, "OneIdentity"),
    (Attributes::ORDERLESS, "Orderless"),
    (Attributes::PROTECTED, "Protected"),
    (Attributes::READ_PROTECTED, "ReadProtected"),
    (Attributes::TEMPORARY, "Temporary"),
];

impl Attributes {
    /// Attribute names set in `self`, alphabetical order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMED_FLAGS
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }

    /// Parse a single attribute name, e.g. from a `SetAttributes` call.
    pub fn from_name(name: &str) -> Option<Attributes> {
        NAMED_FLAGS
            .iter()
            .find(|(_, candidate)| *candidate == name)
            .map(|(flag, _)| *flag)
    }

    /// The `"{A, B, C}"` canonical rendering `attributes_to_string` exposes.
    pub fn to_canonical_string(self) -> String {
        format!("{{{}}}", self.names().collect::<Vec<_>>().join(", "))
    }
}
