//! Expression algebra and symbol interning.
//!
//! This is the bottom of the workspace: the `Expr` type every other crate
//! rewrites, matches against, or stores in a registry, plus the `Name`
//! interner every other crate looks identifiers up through.

mod expr;
mod name;
mod shared;

pub use expr::{ErrorKind, ErrorValue, Expr, ExprDisplay, ExprFullForm, Frame, Location};
pub use name::{Name, SharedInterner, StringInterner, StringLookup};
pub use shared::Shared;
