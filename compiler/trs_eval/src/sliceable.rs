//! `SliceRange`/`TakeFrom`/`PartSet`/`SliceSet`: the sequence-slicing
//! family spec.md §4.6.3 names but leaves index semantics underspecified
//! for ("Open Questions", spec.md §9). Resolved here, for both `List` and
//! `String` targets:
//!
//! - `SliceRange(seq, start, end)`: 0-based, end-exclusive, negative
//!   indices count from the end (`-1` is the last element).
//! - `TakeFrom(seq, s)`: `s < 0` takes the last `|s|` elements; `s >= 0`
//!   drops the first `s - 1` (spec.md's own wording for this operator).
//! - `PartSet(seq, i, value)`: 1-based; `i == -1` means the last position.
//! - `SliceSet(seq, start, end, replacement)`: 1-based inclusive range;
//!   `end == -1` means the sequence's length.

use trs_diagnostic::{part_error, type_error};
use trs_ir::Expr;

use crate::context::Context;

enum Seq {
    List(Vec<Expr>),
    Str(String),
}

impl Seq {
    fn from_expr(expr: &Expr, ctx: &Context) -> Option<Seq> {
        match expr {
            Expr::Str(s) => Some(Seq::Str(s.to_string())),
            Expr::Application { head, args }
                if head.as_symbol() == Some(ctx.interner().intern("List")) =>
            {
                Some(Seq::List(args.to_vec()))
            }
            _ => None,
        }
    }

    fn len(&self) -> usize {
        match self {
            Seq::List(v) => v.len(),
            Seq::Str(s) => s.chars().count(),
        }
    }

    fn into_expr(self, ctx: &Context) -> Expr {
        match self {
            Seq::List(v) => Expr::call(ctx.interner().intern("List"), v),
            Seq::Str(s) => Expr::string(s),
        }
    }

    fn slice(&self, lo: usize, hi: usize) -> Seq {
        match self {
            Seq::List(v) => Seq::List(v[lo..hi].to_vec()),
            Seq::Str(s) => Seq::Str(s.chars().skip(lo).take(hi - lo).collect()),
        }
    }

    fn with_replaced(&self, idx: usize, value: &Expr) -> Option<Seq> {
        match self {
            Seq::List(v) => {
                let mut out = v.clone();
                out[idx] = value.clone();
                Some(Seq::List(out))
            }
            Seq::Str(s) => {
                let Expr::Str(replacement) = value else {
                    return None;
                };
                let mut chars: Vec<char> = s.chars().collect();
                chars[idx] = replacement.chars().next()?;
                Some(Seq::Str(chars.into_iter().collect()))
            }
        }
    }

    fn spliced(&self, lo: usize, hi: usize, replacement: &Seq) -> Seq {
        match (self, replacement) {
            (Seq::List(v), Seq::List(r)) => {
                let mut out = v[..lo].to_vec();
                out.extend(r.iter().cloned());
                out.extend(v[hi..].iter().cloned());
                Seq::List(out)
            }
            (Seq::Str(s), Seq::Str(r)) => {
                let chars: Vec<char> = s.chars().collect();
                let mut out: String = chars[..lo].iter().collect();
                out.push_str(r);
                out.extend(chars[hi..].iter());
                Seq::Str(out)
            }
            (Seq::List(v), Seq::Str(_)) => Seq::List(v.clone()),
            (Seq::Str(s), Seq::List(_)) => Seq::Str(s.clone()),
        }
    }
}

fn resolve_zero_based(i: i64, len: usize) -> Option<usize> {
    let pos = if i < 0 { i + len as i64 } else { i };
    if pos >= 0 && (pos as usize) <= len {
        Some(pos as usize)
    } else {
        None
    }
}

fn resolve_one_based(i: i64, len: usize) -> Option<usize> {
    let pos = if i == -1 { len as i64 } else { i };
    if pos >= 1 && (pos as usize) <= len {
        Some((pos - 1) as usize)
    } else {
        None
    }
}

fn resolve_one_based_start(i: i64, len: usize) -> Option<usize> {
    if i >= 1 && (i as usize) <= len + 1 {
        Some((i - 1) as usize)
    } else {
        None
    }
}

fn resolve_end_one_based(i: i64, len: usize) -> Option<usize> {
    if i == -1 {
        Some(len)
    } else if i >= 1 && (i as usize) <= len {
        Some(i as usize)
    } else {
        None
    }
}

pub fn slice_range(ctx: &Context, expr: &Expr, start: i64, end: i64) -> Expr {
    let Some(seq) = Seq::from_expr(expr, ctx) else {
        return type_error("SliceRange", "a List or String", expr);
    };
    let len = seq.len();
    let (Some(lo), Some(hi)) = (resolve_zero_based(start, len), resolve_zero_based(end, len))
    else {
        return part_error("SliceRange", start, len);
    };
    if lo > hi {
        return part_error("SliceRange", start, len);
    }
    seq.slice(lo, hi).into_expr(ctx)
}

pub fn take_from(ctx: &Context, expr: &Expr, s: i64) -> Expr {
    let Some(seq) = Seq::from_expr(expr, ctx) else {
        return type_error("TakeFrom", "a List or String", expr);
    };
    let len = seq.len();
    let (lo, hi) = if s < 0 {
        let take = (-s) as usize;
        if take > len {
            return part_error("TakeFrom", s, len);
        }
        (len - take, len)
    } else {
        let drop = usize::try_from((s - 1).max(0)).unwrap_or(0);
        if drop > len {
            return part_error("TakeFrom", s, len);
        }
        (drop, len)
    };
    seq.slice(lo, hi).into_expr(ctx)
}

pub fn part_set(ctx: &Context, expr: &Expr, index: i64, value: &Expr) -> Expr {
    let Some(seq) = Seq::from_expr(expr, ctx) else {
        return type_error("PartSet", "a List or String", expr);
    };
    let len = seq.len();
    let Some(idx) = resolve_one_based(index, len) else {
        return part_error("PartSet", index, len);
    };
    match seq.with_replaced(idx, value) {
        Some(updated) => updated.into_expr(ctx),
        None => type_error(
            "PartSet",
            "a replacement matching the sequence's element type",
            value,
        ),
    }
}

pub fn slice_set(ctx: &Context, expr: &Expr, start: i64, end: i64, replacement: &Expr) -> Expr {
    let Some(seq) = Seq::from_expr(expr, ctx) else {
        return type_error("SliceSet", "a List or String", expr);
    };
    let Some(rep_seq) = Seq::from_expr(replacement, ctx) else {
        return type_error("SliceSet", "a List or String replacement", replacement);
    };
    let len = seq.len();
    let Some(lo) = resolve_one_based_start(start, len) else {
        return part_error("SliceSet", start, len);
    };
    let Some(hi) = resolve_end_one_based(end, len) else {
        return part_error("SliceSet", end, len);
    };
    if lo > hi {
        return part_error("SliceSet", start, len);
    }
    match (&seq, &rep_seq) {
        (Seq::List(_), Seq::List(_)) | (Seq::Str(_), Seq::Str(_)) => {
            seq.spliced(lo, hi, &rep_seq).into_expr(ctx)
        }
        _ => type_error(
            "SliceSet",
            "a replacement of the same kind as the target",
            replacement,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_context;
    use pretty_assertions::assert_eq;

    fn list(ctx: &Context, items: Vec<Expr>) -> Expr {
        Expr::call(ctx.interner().intern("List"), items)
    }

    #[test]
    fn slice_range_is_end_exclusive() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(
            slice_range(&ctx, &seq, 0, 2),
            list(&ctx, vec![Expr::integer(1), Expr::integer(2)])
        );
    }

    #[test]
    fn slice_range_supports_negative_end() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(
            slice_range(&ctx, &seq, 0, -1),
            list(&ctx, vec![Expr::integer(1), Expr::integer(2)])
        );
    }

    #[test]
    fn take_from_negative_takes_last_n() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(take_from(&ctx, &seq, -2), list(&ctx, vec![Expr::integer(2), Expr::integer(3)]));
    }

    #[test]
    fn take_from_positive_drops_s_minus_one() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(take_from(&ctx, &seq, 2), list(&ctx, vec![Expr::integer(2), Expr::integer(3)]));
    }

    #[test]
    fn part_set_replaces_one_based_index() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(
            part_set(&ctx, &seq, 2, &Expr::integer(99)),
            list(&ctx, vec![Expr::integer(1), Expr::integer(99), Expr::integer(3)])
        );
    }

    #[test]
    fn part_set_minus_one_targets_last_element() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2)]);
        assert_eq!(
            part_set(&ctx, &seq, -1, &Expr::integer(9)),
            list(&ctx, vec![Expr::integer(1), Expr::integer(9)])
        );
    }

    #[test]
    fn part_set_out_of_range_is_a_part_error() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1)]);
        assert!(part_set(&ctx, &seq, 5, &Expr::integer(9)).is_error());
    }

    #[test]
    fn slice_set_splices_a_replacement_range() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        let replacement = list(&ctx, vec![Expr::integer(8), Expr::integer(9)]);
        assert_eq!(
            slice_set(&ctx, &seq, 2, 3, &replacement),
            list(&ctx, vec![Expr::integer(1), Expr::integer(8), Expr::integer(9)])
        );
    }

    #[test]
    fn slice_set_minus_one_end_means_length() {
        let ctx = new_context();
        let seq = list(&ctx, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        let replacement = list(&ctx, vec![Expr::integer(7)]);
        assert_eq!(
            slice_set(&ctx, &seq, 2, -1, &replacement),
            list(&ctx, vec![Expr::integer(1), Expr::integer(7)])
        );
    }

    #[test]
    fn string_slice_range_counts_characters() {
        let ctx = new_context();
        let seq = Expr::string("hello");
        assert_eq!(slice_range(&ctx, &seq, 1, 4), Expr::string("ell"));
    }
}
