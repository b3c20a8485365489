//! The pattern language, specificity ranking, and structural matcher
//! (spec.md §3 "Pattern (P)", §4.3, §4.4).

mod equal;
mod from_expr;
mod matcher;
mod pattern;
mod specificity;

pub use equal::patterns_equal;
pub use from_expr::pattern_from_expr;
pub use matcher::{match_sequence, try_match, Bindings};
pub use pattern::{Pattern, TypeConstraint};
pub use specificity::{rule_specificity, specificity};
