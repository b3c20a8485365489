//! Error-value constructors.
//!
//! One `#[cold]` function per error-producing situation, each returning a
//! ready-to-propagate `Expr::Error`. Grouping the message text here (rather
//! than inline at every call site) keeps wording consistent and gives each
//! failure mode one place to test.

use trs_ir::{ErrorKind, Expr};

#[cold]
pub fn argument_error(function: &str, expected: &str, got: usize) -> Expr {
    Expr::error(
        ErrorKind::ArgumentError,
        format!("{function} expected {expected}, got {got} argument(s)"),
        vec![],
    )
}

#[cold]
pub fn type_error(function: &str, expected_type: &str, got: &Expr) -> Expr {
    Expr::error(
        ErrorKind::TypeError,
        format!("{function} expected {expected_type}"),
        vec![got.clone()],
    )
}

#[cold]
pub fn protection_error(symbol: &str) -> Expr {
    Expr::error(
        ErrorKind::ProtectionError,
        format!("{symbol} is protected and cannot be redefined"),
        vec![],
    )
}

#[cold]
pub fn definition_error(symbol: &str, reason: &str) -> Expr {
    Expr::error(
        ErrorKind::DefinitionError,
        format!("{symbol}: {reason}"),
        vec![],
    )
}

#[cold]
pub fn division_by_zero_error(function: &str) -> Expr {
    Expr::error(
        ErrorKind::DivisionByZero,
        format!("{function} attempted to divide by zero"),
        vec![],
    )
}

#[cold]
pub fn mathematical_error(function: &str, reason: &str) -> Expr {
    Expr::error(
        ErrorKind::MathematicalError,
        format!("{function}: {reason}"),
        vec![],
    )
}

#[cold]
pub fn part_error(function: &str, index: i64, len: usize) -> Expr {
    Expr::error(
        ErrorKind::PartError,
        format!("{function}: part {index} is out of range for length {len}"),
        vec![],
    )
}

#[cold]
pub fn recursion_error(limit: usize) -> Expr {
    Expr::error(
        ErrorKind::RecursionError,
        format!("recursion depth exceeded the limit of {limit}"),
        vec![],
    )
}
