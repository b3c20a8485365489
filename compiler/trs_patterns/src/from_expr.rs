//! Conversion from an already-structural `Expr` into a `Pattern` (spec.md
//! §6 "the core accepts either form on entry and converts legacy to
//! structural on first use").
//!
//! The legacy surface sugar (`x_`, `x__`, `x___`, `x_Type`) is the
//! reader's job to desugar into `Pattern(name, Blank[Type])`-shaped
//! expressions before this ever sees them; this function only has to
//! recognise the structural vocabulary itself (`Blank`, `BlankSequence`,
//! `BlankNullSequence`, `Pattern`) among ordinary application heads, and
//! fall back to treating everything else as a literal or a nested
//! structural pattern.

use trs_ir::{Expr, Name, StringLookup};

use crate::pattern::{Pattern, TypeConstraint};

/// Convert a rule's left-hand-side argument expression into a `Pattern`.
pub fn pattern_from_expr<L: StringLookup>(expr: &Expr, interner: &L) -> Pattern {
    let Some((head, args)) = expr.as_application() else {
        return Pattern::Literal(expr.clone());
    };
    let Some(head_name) = head.as_symbol() else {
        return Pattern::Literal(expr.clone());
    };
    match interner.lookup(head_name) {
        "Blank" => Pattern::Blank(type_constraint_from_args(args, interner)),
        "BlankSequence" => Pattern::BlankSequence(type_constraint_from_args(args, interner)),
        "BlankNullSequence" => {
            Pattern::BlankNullSequence(type_constraint_from_args(args, interner))
        }
        "Pattern" if args.len() == 2 => {
            let bind_name = args[0].as_symbol().unwrap_or(Name::EMPTY);
            let inner = pattern_from_expr(&args[1], interner);
            Pattern::Named(bind_name, Box::new(inner))
        }
        _ => Pattern::Structural(
            head_name,
            args.iter().map(|a| pattern_from_expr(a, interner)).collect(),
        ),
    }
}

/// `Blank`/`BlankSequence`/`BlankNullSequence` take at most one argument:
/// the type-constraint symbol. Built-in type names recognised per spec.md
/// §4.4; anything else names a custom type matched by head symbol.
fn type_constraint_from_args<L: StringLookup>(
    args: &[Expr],
    interner: &L,
) -> Option<TypeConstraint> {
    let sym = args.first()?.as_symbol()?;
    Some(match interner.lookup(sym) {
        "Integer" => TypeConstraint::Integer,
        "Real" | "Float" => TypeConstraint::Real,
        "Number" | "Numeric" => TypeConstraint::Number,
        "String" => TypeConstraint::Str,
        "Boolean" | "Bool" => TypeConstraint::Boolean,
        "Symbol" => TypeConstraint::Symbol,
        "Atom" => TypeConstraint::Atom,
        // Covers "List" and any other custom head name: matched by
        // comparing an application's head symbol against `sym` directly.
        _ => TypeConstraint::Custom(sym),
    })
}
