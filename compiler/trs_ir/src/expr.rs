//! The expression algebra: the single type that is both program and value.
//!
//! There is no separate `Value` type the way a typed scripting language
//! needs one (contrast `ori_patterns::value::Value`). An unevaluated
//! expression and the result of evaluating it are both `Expr` — evaluation
//! rewrites an `Expr` into another `Expr`, never into something else.

use crate::name::{Name, StringLookup};
use crate::shared::Shared;
use std::fmt;

/// A source location a `Frame` may optionally carry.
///
/// No reader in this workspace currently populates this — the field exists
/// so a future parser can attach real positions without changing `Frame`'s
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// The eight error categories a failed evaluation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RecursionError,
    ArgumentError,
    TypeError,
    ProtectionError,
    DefinitionError,
    DivisionByZero,
    MathematicalError,
    PartError,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::RecursionError => "RecursionError",
            ErrorKind::ArgumentError => "ArgumentError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ProtectionError => "ProtectionError",
            ErrorKind::DefinitionError => "DefinitionError",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::MathematicalError => "MathematicalError",
            ErrorKind::PartError => "PartError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry in the call-frame trace an error carries back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub function_name: Name,
    pub expression: Shared<str>,
    pub location: Option<Location>,
}

/// The body of an `Expr::Error`, boxed behind `Shared` so that cloning an
/// error value (common once it starts propagating) never copies its
/// argument list or frame trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub kind: ErrorKind,
    pub message: Shared<str>,
    pub args: Shared<[Expr]>,
    pub frames: Vec<Frame>,
}

/// An expression: an atom, an application of a head to arguments, or an
/// error value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Real(f64),
    Str(Shared<str>),
    Boolean(bool),
    Symbol(Name),
    Application {
        head: Shared<Expr>,
        args: Shared<[Expr]>,
    },
    Error(Shared<ErrorValue>),
}

impl Expr {
    pub fn integer(value: i64) -> Self {
        Expr::Integer(value)
    }

    pub fn real(value: f64) -> Self {
        Expr::Real(value)
    }

    pub fn string(value: impl Into<Shared<str>>) -> Self {
        Expr::Str(value.into())
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Boolean(value)
    }

    pub fn symbol(name: Name) -> Self {
        Expr::Symbol(name)
    }

    /// Build `head(args...)`. `head` is itself an `Expr` so non-symbol
    /// heads (an application whose head is the result of another
    /// application) are representable, per the data model.
    pub fn apply(head: Expr, args: Vec<Expr>) -> Self {
        Expr::Application {
            head: Shared::new(head),
            args: args.into(),
        }
    }

    /// Build `name(args...)` for the common case of a symbol head.
    pub fn call(name: Name, args: Vec<Expr>) -> Self {
        Expr::apply(Expr::Symbol(name), args)
    }

    pub fn error(kind: ErrorKind, message: impl Into<Shared<str>>, args: Vec<Expr>) -> Self {
        Expr::Error(Shared::new(ErrorValue {
            kind,
            message: message.into(),
            args: args.into(),
            frames: Vec::new(),
        }))
    }

    /// Returns a copy of this error with `frame` appended to its trace.
    /// No-op (clones unchanged) on non-error expressions.
    #[must_use]
    pub fn with_frame(self, frame: Frame) -> Self {
        match self {
            Expr::Error(value) => {
                let mut frames = value.frames.clone();
                frames.push(frame);
                Expr::Error(Shared::new(ErrorValue {
                    kind: value.kind,
                    message: value.message.clone(),
                    args: value.args.clone(),
                    frames,
                }))
            }
            other => other,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error(_))
    }

    /// An atom is a leaf value with no substructure: everything except
    /// `Application` and `Error`.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Expr::Application { .. } | Expr::Error(_))
    }

    pub fn as_application(&self) -> Option<(&Expr, &[Expr])> {
        match self {
            Expr::Application { head, args } => Some((head, args)),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Expr::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Expr::Real(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Name> {
        match self {
            Expr::Symbol(n) => Some(*n),
            _ => None,
        }
    }

    /// The head-name of `Head(self)`: a fixed type tag for atoms and
    /// errors, or the symbol name of the application's head when the head
    /// is itself a symbol.
    pub fn head_name<L: StringLookup>(&self, interner: &L) -> String {
        match self {
            Expr::Integer(_) => "Integer".to_owned(),
            Expr::Real(_) => "Real".to_owned(),
            Expr::Str(_) => "String".to_owned(),
            Expr::Boolean(_) => "Boolean".to_owned(),
            Expr::Symbol(_) => "Symbol".to_owned(),
            Expr::Error(_) => "error".to_owned(),
            Expr::Application { head, .. } => match &**head {
                Expr::Symbol(name) => interner.lookup(*name).to_owned(),
                other => other.display(interner).to_string(),
            },
        }
    }

    /// Structural equality: same shape, same atoms, recursively over
    /// arguments. Errors compare equal only if kind, message, and args all
    /// match (frame traces are diagnostic and excluded).
    pub fn structural_eq(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Integer(a), Expr::Integer(b)) => a == b,
            (Expr::Real(a), Expr::Real(b)) => a == b,
            (Expr::Str(a), Expr::Str(b)) => **a == **b,
            (Expr::Boolean(a), Expr::Boolean(b)) => a == b,
            (Expr::Symbol(a), Expr::Symbol(b)) => a == b,
            (
                Expr::Application { head: h1, args: a1 },
                Expr::Application { head: h2, args: a2 },
            ) => {
                h1.structural_eq(h2)
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(x, y)| x.structural_eq(y))
            }
            (Expr::Error(a), Expr::Error(b)) => {
                a.kind == b.kind
                    && *a.message == *b.message
                    && a.args.len() == b.args.len()
                    && a.args
                        .iter()
                        .zip(b.args.iter())
                        .all(|(x, y)| x.structural_eq(y))
            }
            _ => false,
        }
    }

    /// Wrap this expression with an interner for `Display`, since symbols
    /// and error bodies can't render themselves without one.
    pub fn display<'a, L: StringLookup>(&'a self, interner: &'a L) -> ExprDisplay<'a, L> {
        ExprDisplay { expr: self, interner }
    }

    /// `FullForm` rendering (spec.md §6): like `display`, except an error
    /// prints its kind and message (`Error[Kind,Msg]`) rather than being
    /// collapsed to `$Failed(Kind)`.
    pub fn full_form<'a, L: StringLookup>(&'a self, interner: &'a L) -> ExprFullForm<'a, L> {
        ExprFullForm { expr: self, interner }
    }
}

/// `Display` adapter produced by `Expr::display`.
pub struct ExprDisplay<'a, L: StringLookup> {
    expr: &'a Expr,
    interner: &'a L,
}

impl<'a, L: StringLookup> fmt::Display for ExprDisplay<'a, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.expr, self.interner, f, false)
    }
}

/// `FullForm` adapter produced by `Expr::full_form`: renders an error's
/// kind and message instead of collapsing it to `$Failed(Kind)`.
pub struct ExprFullForm<'a, L: StringLookup> {
    expr: &'a Expr,
    interner: &'a L,
}

impl<'a, L: StringLookup> fmt::Display for ExprFullForm<'a, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.expr, self.interner, f, true)
    }
}

fn write_expr<L: StringLookup>(
    expr: &Expr,
    interner: &L,
    f: &mut fmt::Formatter<'_>,
    full_form: bool,
) -> fmt::Result {
    match expr {
        Expr::Integer(n) => write!(f, "{n}"),
        Expr::Real(x) => write!(f, "{x}"),
        Expr::Str(s) => write!(f, "{s:?}"),
        Expr::Boolean(true) => f.write_str("True"),
        Expr::Boolean(false) => f.write_str("False"),
        Expr::Symbol(name) => f.write_str(interner.lookup(*name)),
        Expr::Application { head, args } => {
            write_expr(head, interner, f, full_form)?;
            f.write_str("(")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(arg, interner, f, full_form)?;
            }
            f.write_str(")")
        }
        Expr::Error(value) if full_form => write!(f, "Error[{},{}]", value.kind, value.message),
        Expr::Error(value) => write!(f, "$Failed({})", value.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn atoms_are_atoms_and_applications_are_not() {
        assert!(Expr::integer(1).is_atom());
        assert!(Expr::boolean(true).is_atom());
        let interner = StringInterner::new();
        let plus = interner.intern("Plus");
        assert!(!Expr::call(plus, vec![Expr::integer(1)]).is_atom());
    }

    #[test]
    fn structural_eq_distinguishes_integer_and_real() {
        assert!(!Expr::integer(42).structural_eq(&Expr::real(42.0)));
        assert!(Expr::integer(42).structural_eq(&Expr::integer(42)));
    }

    #[test]
    fn structural_eq_recurses_into_applications() {
        let interner = StringInterner::new();
        let plus = interner.intern("Plus");
        let a = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2)]);
        let b = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2)]);
        let c = Expr::call(plus, vec![Expr::integer(1), Expr::integer(3)]);
        assert!(a.structural_eq(&b));
        assert!(!a.structural_eq(&c));
    }

    #[test]
    fn head_name_reports_type_tags_for_atoms() {
        let interner = StringInterner::new();
        assert_eq!(Expr::integer(3).head_name(&interner), "Integer");
        assert_eq!(Expr::boolean(false).head_name(&interner), "Boolean");
    }

    #[test]
    fn head_name_reports_the_symbol_for_applications() {
        let interner = StringInterner::new();
        let plus = interner.intern("Plus");
        let x = interner.intern("x");
        let y = interner.intern("y");
        let expr = Expr::call(plus, vec![Expr::symbol(x), Expr::symbol(y)]);
        assert_eq!(expr.head_name(&interner), "Plus");
    }

    #[test]
    fn display_renders_application_syntax() {
        let interner = StringInterner::new();
        let plus = interner.intern("Plus");
        let expr = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2)]);
        assert_eq!(expr.display(&interner).to_string(), "Plus(1, 2)");
    }

    #[test]
    fn display_collapses_an_error_to_dollar_failed_of_its_kind() {
        let interner = StringInterner::new();
        let err = Expr::error(ErrorKind::DivisionByZero, "division by zero", vec![]);
        assert_eq!(err.display(&interner).to_string(), "$Failed(DivisionByZero)");
    }

    #[test]
    fn full_form_shows_kind_and_message() {
        let interner = StringInterner::new();
        let err = Expr::error(ErrorKind::TypeError, "expected a number", vec![]);
        assert_eq!(err.full_form(&interner).to_string(), "Error[TypeError,expected a number]");
    }

    #[test]
    fn with_frame_appends_without_mutating_original() {
        let err = Expr::error(ErrorKind::DivisionByZero, "division by zero", vec![]);
        let interner = StringInterner::new();
        let f = interner.intern("Divide");
        let framed = err.clone().with_frame(Frame {
            function_name: f,
            expression: "Divide(1, 0)".into(),
            location: None,
        });
        match framed {
            Expr::Error(value) => assert_eq!(value.frames.len(), 1),
            _ => panic!("expected error"),
        }
        match err {
            Expr::Error(value) => assert!(value.frames.is_empty()),
            _ => panic!("expected error"),
        }
    }
}
