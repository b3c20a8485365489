//! Structural equality over patterns, used to decide whether a newly
//! defined rule replaces an existing one in place rather than adding a
//! second entry for "the same" left-hand side.
//!
//! Two `Named` patterns are equivalent whenever their inner kind and type
//! constraint match, regardless of the bound variable's name — `f(x_)` and
//! `f(y_)` are the same rule shape.

use crate::pattern::Pattern;

pub fn patterns_equal(a: &Pattern, b: &Pattern) -> bool {
    match (a, b) {
        (Pattern::Blank(c1), Pattern::Blank(c2))
        | (Pattern::BlankSequence(c1), Pattern::BlankSequence(c2))
        | (Pattern::BlankNullSequence(c1), Pattern::BlankNullSequence(c2)) => c1 == c2,
        (Pattern::Named(_, inner1), Pattern::Named(_, inner2)) => patterns_equal(inner1, inner2),
        // A named pattern and a bare one of the same kind bind the same
        // shape; only the presence of a binding differs structurally.
        (Pattern::Named(_, inner), other) | (other, Pattern::Named(_, inner)) => {
            patterns_equal(inner, other)
        }
        (Pattern::Literal(x), Pattern::Literal(y)) => x.structural_eq(y),
        (Pattern::Structural(h1, args1), Pattern::Structural(h2, args2)) => {
            h1 == h2
                && args1.len() == args2.len()
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(p1, p2)| patterns_equal(p1, p2))
        }
        _ => false,
    }
}
