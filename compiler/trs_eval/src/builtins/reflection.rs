//! `Head`/`Attributes`/`SetAttributes`/`ClearAttributes`/`ClearAllAttributes`
//! (spec.md §6): introspecting and mutating the symbol attribute table from
//! ordinary rule dispatch, through the `Evaluator` seam rather than direct
//! access to `trs_symbols` (which `trs_registry` cannot depend on).

use trs_diagnostic::{argument_error, type_error};
use trs_ir::Expr;
use trs_registry::Evaluator;
use trs_symbols::Attributes;

/// `Head(expr)`: the type tag for an atom, or the application's head
/// symbol. `Error` deliberately reports the symbol `Error`, not the
/// lowercase `"error"` tag `Expr::head_name` uses for display purposes
/// (spec.md §7: "operators that deliberately inspect errors... return the
/// symbol `Error`").
pub fn head(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 1 {
        return argument_error("Head", "1 argument", args.len());
    }
    match &args[0] {
        Expr::Integer(_) => Expr::symbol(ev.intern("Integer")),
        Expr::Real(_) => Expr::symbol(ev.intern("Real")),
        Expr::Str(_) => Expr::symbol(ev.intern("String")),
        Expr::Boolean(_) => Expr::symbol(ev.intern("Boolean")),
        Expr::Symbol(_) => Expr::symbol(ev.intern("Symbol")),
        Expr::Error(_) => Expr::symbol(ev.intern("Error")),
        Expr::Application { head, .. } => match head.as_symbol() {
            Some(sym) => Expr::symbol(sym),
            None => ev.eval((**head).clone()),
        },
    }
}

fn list_items<'a>(expr: &'a Expr, ev: &mut dyn Evaluator) -> Option<&'a [Expr]> {
    let list = ev.intern("List");
    match expr.as_application() {
        Some((head, items)) if head.as_symbol() == Some(list) => Some(items),
        _ => None,
    }
}

fn attrs_from_list(items: &[Expr], function: &str, ev: &mut dyn Evaluator) -> Result<Attributes, Expr> {
    let mut attrs = Attributes::empty();
    for item in items {
        let Some(sym) = item.as_symbol() else {
            return Err(type_error(function, "an attribute symbol", item));
        };
        let text = ev.lookup(sym);
        let Some(flag) = Attributes::from_name(&text) else {
            return Err(type_error(function, "a known attribute name", item));
        };
        attrs |= flag;
    }
    Ok(attrs)
}

pub fn set_attributes(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("SetAttributes", "2 arguments", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("SetAttributes", "a symbol", &args[0]);
    };
    let Some(items) = list_items(&args[1], ev) else {
        return type_error("SetAttributes", "a List of attribute names", &args[1]);
    };
    let items = items.to_vec();
    match attrs_from_list(&items, "SetAttributes", ev) {
        Ok(attrs) => {
            ev.set_symbol_attributes(name, attrs);
            Expr::symbol(ev.intern("Null"))
        }
        Err(e) => e,
    }
}

pub fn clear_attributes(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 2 {
        return argument_error("ClearAttributes", "2 arguments", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("ClearAttributes", "a symbol", &args[0]);
    };
    let Some(items) = list_items(&args[1], ev) else {
        return type_error("ClearAttributes", "a List of attribute names", &args[1]);
    };
    let items = items.to_vec();
    match attrs_from_list(&items, "ClearAttributes", ev) {
        Ok(attrs) => {
            ev.clear_symbol_attributes(name, attrs);
            Expr::symbol(ev.intern("Null"))
        }
        Err(e) => e,
    }
}

pub fn clear_all_attributes(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 1 {
        return argument_error("ClearAllAttributes", "1 argument", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("ClearAllAttributes", "a symbol", &args[0]);
    };
    ev.clear_all_symbol_attributes(name);
    Expr::symbol(ev.intern("Null"))
}

pub fn attributes(args: &[Expr], ev: &mut dyn Evaluator) -> Expr {
    if args.len() != 1 {
        return argument_error("Attributes", "1 argument", args.len());
    }
    let Some(name) = args[0].as_symbol() else {
        return type_error("Attributes", "a symbol", &args[0]);
    };
    let attrs = ev.symbol_attributes(name);
    let list_name = ev.intern("List");
    let items: Vec<Expr> = attrs.names().map(|n| Expr::symbol(ev.intern(n))).collect();
    Expr::call(list_name, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::NativeInterp;
    use crate::new_context;
    use pretty_assertions::assert_eq;

    #[test]
    fn head_reports_atom_type_tags() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        assert_eq!(head(&[Expr::integer(1)], &mut interp), Expr::symbol(ctx.interner().intern("Integer")));
    }

    #[test]
    fn head_of_an_error_is_the_symbol_error() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        let err = trs_diagnostic::division_by_zero_error("Divide");
        assert_eq!(head(&[err], &mut interp), Expr::symbol(ctx.interner().intern("Error")));
    }

    #[test]
    fn head_of_an_application_is_its_head_symbol() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        let plus = ctx.interner().intern("Plus");
        let expr = Expr::call(plus, vec![Expr::integer(1)]);
        assert_eq!(head(&[expr], &mut interp), Expr::symbol(plus));
    }

    #[test]
    fn set_attributes_then_attributes_round_trips() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        let f = ctx.interner().intern("f");
        let list = ctx.interner().intern("List");
        let flat = ctx.interner().intern("Flat");
        set_attributes(
            &[Expr::symbol(f), Expr::call(list, vec![Expr::symbol(flat)])],
            &mut interp,
        );
        assert_eq!(attributes(&[Expr::symbol(f)], &mut interp), Expr::call(list, vec![Expr::symbol(flat)]));
    }

    #[test]
    fn clear_attributes_removes_only_named_flags() {
        let ctx = new_context();
        let mut interp = NativeInterp::new(&ctx);
        let f = ctx.interner().intern("f");
        let list = ctx.interner().intern("List");
        let flat = ctx.interner().intern("Flat");
        let orderless = ctx.interner().intern("Orderless");
        set_attributes(
            &[Expr::symbol(f), Expr::call(list, vec![Expr::symbol(flat), Expr::symbol(orderless)])],
            &mut interp,
        );
        clear_attributes(&[Expr::symbol(f), Expr::call(list, vec![Expr::symbol(flat)])], &mut interp);
        assert_eq!(attributes(&[Expr::symbol(f)], &mut interp), Expr::call(list, vec![Expr::symbol(orderless)]));
    }
}
