//! The pattern language: what a rule's left-hand side is built from.
//!
//! A `Pattern` is a separate tree from `Expr` rather than reusing `Expr`
//! with a handful of magic head names, so the matcher and specificity
//! ranking can be exhaustive `match`es instead of re-deriving "is this
//! actually a pattern" from an arbitrary expression at every step. The
//! only conversion seam between the two is `Pattern::from_expr`, used by
//! both the reader's legacy-sugar path and `SetDelayed` at rule-definition
//! time.

use trs_ir::{Expr, Name};

/// A built-in type a `Blank` can be constrained to, or a custom type named
/// by the head symbol of the value it should match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeConstraint {
    Integer,
    Real,
    Number,
    Str,
    Boolean,
    Symbol,
    Atom,
    Custom(Name),
}

impl TypeConstraint {
    /// Does `expr` satisfy this constraint? `Custom` compares the
    /// expression's application head against the named symbol directly —
    /// interned `Name`s compare as plain integers, so no string lookup is
    /// needed here.
    pub fn matches(self, expr: &Expr) -> bool {
        match self {
            TypeConstraint::Integer => matches!(expr, Expr::Integer(_)),
            TypeConstraint::Real => matches!(expr, Expr::Real(_)),
            TypeConstraint::Number => matches!(expr, Expr::Integer(_) | Expr::Real(_)),
            TypeConstraint::Str => matches!(expr, Expr::Str(_)),
            TypeConstraint::Boolean => matches!(expr, Expr::Boolean(_)),
            TypeConstraint::Symbol => matches!(expr, Expr::Symbol(_)),
            TypeConstraint::Atom => expr.is_atom(),
            TypeConstraint::Custom(name) => match expr.as_application() {
                Some((head, _)) => head.as_symbol() == Some(name),
                None => false,
            },
        }
    }
}

/// A pattern, the left-hand side vocabulary rules are written in.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `_` or `_Type`: matches exactly one expression.
    Blank(Option<TypeConstraint>),
    /// `__` or `__Type`: matches one or more consecutive arguments.
    BlankSequence(Option<TypeConstraint>),
    /// `___` or `___Type`: matches zero or more consecutive arguments.
    BlankNullSequence(Option<TypeConstraint>),
    /// `name_pattern`: binds whatever the inner pattern matches to `name`.
    Named(Name, Box<Pattern>),
    /// An exact expression a candidate must be structurally equal to.
    Literal(Expr),
    /// `head(pat, pat, ...)`: matches an application with this exact head
    /// whose arguments match the subpatterns.
    Structural(Name, Vec<Pattern>),
}

impl Pattern {
    /// The minimum number of argument slots this pattern can consume when
    /// matched inside an argument list: zero for `___`, one for anything
    /// else (delegating through `Named`).
    pub fn min_arity(&self) -> usize {
        match self {
            Pattern::BlankNullSequence(_) => 0,
            Pattern::Named(_, inner) => inner.min_arity(),
            _ => 1,
        }
    }

    /// True for `__`/`___` (and a `Named` wrapping one): patterns that can
    /// consume more than one argument slot.
    pub fn is_sequence(&self) -> bool {
        match self {
            Pattern::BlankSequence(_) | Pattern::BlankNullSequence(_) => true,
            Pattern::Named(_, inner) => inner.is_sequence(),
            _ => false,
        }
    }

    pub(crate) fn type_constraint(&self) -> Option<TypeConstraint> {
        match self {
            Pattern::Blank(c) | Pattern::BlankSequence(c) | Pattern::BlankNullSequence(c) => *c,
            Pattern::Named(_, inner) => inner.type_constraint(),
            Pattern::Literal(_) | Pattern::Structural(_, _) => None,
        }
    }

    /// Does a single candidate expression satisfy this pattern's type
    /// constraint (ignoring sequence arity — the caller has already
    /// decided how many expressions this pattern applies to)?
    pub(crate) fn type_matches(&self, expr: &Expr) -> bool {
        match self.type_constraint() {
            Some(c) => c.matches(expr),
            None => true,
        }
    }
}
