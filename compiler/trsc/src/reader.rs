//! A thin tokenizer and recursive-descent reader for the surface syntax:
//! atoms, `head(arg, ...)` application, infix `=`/`:=` sugar for
//! `Set`/`SetDelayed`, and the legacy pattern suffixes (`x_`, `x__`,
//! `x___`, `x_Type`). Grounded on `ori_lexer_core::{RawTag, tokenize}`'s
//! raw-tag-then-cook lexer shape, collapsed into one token enum and one
//! pass since this surface has no keywords, no spans-for-IDE concerns, and
//! no cooking stage of its own.
//!
//! Deliberately not a parser generator: this is as much grammar as spec.md
//! §8's concrete scenarios need to be expressible as source text, not a
//! general-purpose language front end.

use std::fmt;

use trs_ir::{Expr, SharedInterner};

/// A parse failure, reported alongside the byte offset it was found at —
/// the out-of-band channel spec.md §7 keeps separate from evaluation
/// errors (those are `Expr::Error` values; this never is).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub message: String,
    pub position: usize,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for ReadError {}

fn err(message: impl Into<String>, position: usize) -> ReadError {
    ReadError {
        message: message.into(),
        position,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Integer(i64),
    Real(f64),
    Str(String),
    Ident(String),
    LParen,
    RParen,
    Comma,
    Equal,
    ColonEqual,
    Eof,
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src: src.as_bytes(), pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Result<(Token, usize), ReadError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(b) = self.peek_byte() else {
            return Ok((Token::Eof, start));
        };

        match b {
            b'(' => {
                self.pos += 1;
                Ok((Token::LParen, start))
            }
            b')' => {
                self.pos += 1;
                Ok((Token::RParen, start))
            }
            b',' => {
                self.pos += 1;
                Ok((Token::Comma, start))
            }
            b':' if self.src.get(self.pos + 1) == Some(&b'=') => {
                self.pos += 2;
                Ok((Token::ColonEqual, start))
            }
            b'=' => {
                self.pos += 1;
                Ok((Token::Equal, start))
            }
            b'"' => self.scan_string(start),
            b'-' if self.src.get(self.pos + 1).is_some_and(u8::is_ascii_digit) => {
                self.scan_number(start)
            }
            b if b.is_ascii_digit() => self.scan_number(start),
            b if is_ident_start(b) => Ok(self.scan_ident(start)),
            other => Err(err(format!("unexpected character '{}'", other as char), start)),
        }
    }

    fn scan_string(&mut self, start: usize) -> Result<(Token, usize), ReadError> {
        self.pos += 1; // opening quote
        let mut text = String::new();
        loop {
            match self.peek_byte() {
                None => return Err(err("unterminated string literal", start)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek_byte() {
                        Some(b'"') => {
                            text.push('"');
                            self.pos += 1;
                        }
                        Some(b'\\') => {
                            text.push('\\');
                            self.pos += 1;
                        }
                        Some(b'n') => {
                            text.push('\n');
                            self.pos += 1;
                        }
                        _ => return Err(err("invalid escape sequence", self.pos)),
                    }
                }
                Some(_) => {
                    let rest = std::str::from_utf8(&self.src[self.pos..])
                        .map_err(|_| err("invalid UTF-8 in string literal", self.pos))?;
                    let ch = rest.chars().next().unwrap_or('\0');
                    text.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        Ok((Token::Str(text), start))
    }

    fn scan_number(&mut self, start: usize) -> Result<(Token, usize), ReadError> {
        if self.peek_byte() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        let mut is_real = false;
        if self.peek_byte() == Some(b'.')
            && self.src.get(self.pos + 1).is_some_and(u8::is_ascii_digit)
        {
            is_real = true;
            self.pos += 1;
            while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| err("invalid UTF-8 in numeric literal", start))?;
        if is_real {
            let value: f64 = text.parse().map_err(|_| err("malformed real literal", start))?;
            Ok((Token::Real(value), start))
        } else {
            let value: i64 = text.parse().map_err(|_| err("malformed integer literal", start))?;
            Ok((Token::Integer(value), start))
        }
    }

    fn scan_ident(&mut self, start: usize) -> (Token, usize) {
        while matches!(self.peek_byte(), Some(b) if is_ident_continue(b)) {
            self.pos += 1;
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        (Token::Ident(text), start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// How many trailing underscores an identifier's pattern suffix carries,
/// and the optional type name following them (`x_Integer` → `(1, Some
/// ("Integer"))`).
fn split_pattern_suffix(name: &str) -> Option<(&str, usize, Option<&str>)> {
    let underscore_start = name.find('_')?;
    let var_part = &name[..underscore_start];
    let rest = &name[underscore_start..];
    let run = rest.bytes().take_while(|&b| b == b'_').count();
    if run == 0 || run > 3 {
        return None;
    }
    let type_part = &rest[run..];
    let type_name = if type_part.is_empty() { None } else { Some(type_part) };
    Some((var_part, run, type_name))
}

fn blank_head_for(run: usize) -> &'static str {
    match run {
        1 => "Blank",
        2 => "BlankSequence",
        _ => "BlankNullSequence",
    }
}

/// Desugar an identifier token into its structural form: a plain symbol,
/// or — if it carries a legacy pattern suffix — a `Pattern(name,
/// Blank[Type])`/bare `Blank[Type]` application (spec.md §6 ADDED).
fn ident_to_expr(name: &str, interner: &SharedInterner) -> Expr {
    if let Some((var_part, run, type_name)) = split_pattern_suffix(name) {
        let blank_head = interner.intern(blank_head_for(run));
        let type_args = match type_name {
            Some(t) => vec![Expr::symbol(interner.intern(t))],
            None => vec![],
        };
        let blank = Expr::call(blank_head, type_args);
        if var_part.is_empty() {
            return blank;
        }
        let pattern_head = interner.intern("Pattern");
        let var = interner.intern(var_part);
        return Expr::call(pattern_head, vec![Expr::symbol(var), blank]);
    }

    match name {
        "True" => Expr::boolean(true),
        "False" => Expr::boolean(false),
        _ => Expr::symbol(interner.intern(name)),
    }
}

/// A single-expression reader over one input string, sharing `interner`
/// with the context the parsed expression will be evaluated against.
pub struct Reader<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<(Token, usize)>,
    interner: SharedInterner,
}

impl<'a> Reader<'a> {
    pub fn new(src: &'a str, interner: SharedInterner) -> Self {
        Reader { lexer: Lexer::new(src), lookahead: None, interner }
    }

    fn peek(&mut self) -> Result<&Token, ReadError> {
        if self.lookahead.is_none() {
            let tok = self.lexer.next_token()?;
            self.lookahead = Some(tok);
        }
        let Some((tok, _)) = &self.lookahead else {
            return Err(err("internal reader state error", self.lexer.pos));
        };
        Ok(tok)
    }

    fn advance(&mut self) -> Result<(Token, usize), ReadError> {
        if let Some(tok) = self.lookahead.take() {
            return Ok(tok);
        }
        self.lexer.next_token()
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ReadError> {
        let (tok, pos) = self.advance()?;
        if &tok == expected {
            Ok(())
        } else {
            Err(err(format!("expected {expected:?}, found {tok:?}"), pos))
        }
    }

    /// Parse exactly one expression, optionally followed by `= rhs` or
    /// `:= rhs` assignment sugar, and require end of input afterward.
    pub fn read(&mut self) -> Result<Expr, ReadError> {
        let expr = self.parse_assignment()?;
        let (tok, pos) = self.advance()?;
        if tok != Token::Eof {
            return Err(err(format!("unexpected trailing input: {tok:?}"), pos));
        }
        Ok(expr)
    }

    fn parse_assignment(&mut self) -> Result<Expr, ReadError> {
        let lhs = self.parse_application()?;
        match self.peek()? {
            Token::Equal => {
                self.advance()?;
                let rhs = self.parse_assignment()?;
                let set = self.interner.intern("Set");
                Ok(Expr::call(set, vec![lhs, rhs]))
            }
            Token::ColonEqual => {
                self.advance()?;
                let rhs = self.parse_assignment()?;
                let set_delayed = self.interner.intern("SetDelayed");
                Ok(Expr::call(set_delayed, vec![lhs, rhs]))
            }
            _ => Ok(lhs),
        }
    }

    fn parse_application(&mut self) -> Result<Expr, ReadError> {
        let atom = self.parse_atom()?;
        if self.peek()? != &Token::LParen {
            return Ok(atom);
        }
        self.advance()?;
        let mut args = Vec::new();
        if self.peek()? != &Token::RParen {
            loop {
                args.push(self.parse_assignment()?);
                if self.peek()? == &Token::Comma {
                    self.advance()?;
                    continue;
                }
                break;
            }
        }
        self.expect(&Token::RParen)?;
        let Some(head_name) = atom.as_symbol() else {
            return Err(err("only a bare symbol can be applied as a head", 0));
        };
        Ok(Expr::call(head_name, args))
    }

    fn parse_atom(&mut self) -> Result<Expr, ReadError> {
        let (tok, pos) = self.advance()?;
        match tok {
            Token::Integer(n) => Ok(Expr::integer(n)),
            Token::Real(x) => Ok(Expr::real(x)),
            Token::Str(s) => Ok(Expr::string(s)),
            Token::Ident(name) => Ok(ident_to_expr(&name, &self.interner)),
            Token::LParen => {
                let inner = self.parse_assignment()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(err(format!("expected an expression, found {other:?}"), pos)),
        }
    }
}

/// Read a single expression from `src`, sharing symbol identity with
/// `interner` so the result can be evaluated against a context built from
/// the same interner.
pub fn read(src: &str, interner: &SharedInterner) -> Result<Expr, ReadError> {
    Reader::new(src, interner.clone()).read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_an_integer() {
        let interner = SharedInterner::new();
        assert_eq!(read("42", &interner), Ok(Expr::integer(42)));
    }

    #[test]
    fn reads_a_negative_real() {
        let interner = SharedInterner::new();
        assert_eq!(read("-3.5", &interner), Ok(Expr::real(-3.5)));
    }

    #[test]
    fn reads_a_string_with_escapes() {
        let interner = SharedInterner::new();
        assert_eq!(read(r#""a\"b\nc""#, &interner), Ok(Expr::string("a\"b\nc")));
    }

    #[test]
    fn reads_true_and_false_as_boolean_literals() {
        let interner = SharedInterner::new();
        assert_eq!(read("True", &interner), Ok(Expr::boolean(true)));
        assert_eq!(read("False", &interner), Ok(Expr::boolean(false)));
    }

    #[test]
    fn reads_nested_applications() {
        let interner = SharedInterner::new();
        let plus = interner.intern("Plus");
        let times = interner.intern("Times");
        let expr = read("Plus(1, Times(2, 3))", &interner).expect("should parse");
        assert_eq!(
            expr,
            Expr::call(plus, vec![Expr::integer(1), Expr::call(times, vec![Expr::integer(2), Expr::integer(3)])])
        );
    }

    #[test]
    fn desugars_equal_to_set() {
        let interner = SharedInterner::new();
        let set = interner.intern("Set");
        let x = interner.intern("x");
        assert_eq!(read("x = 5", &interner), Ok(Expr::call(set, vec![Expr::symbol(x), Expr::integer(5)])));
    }

    #[test]
    fn desugars_colon_equal_to_set_delayed_with_pattern_params() {
        let interner = SharedInterner::new();
        let set_delayed = interner.intern("SetDelayed");
        let f = interner.intern("f");
        let x = interner.intern("x");
        let pattern = interner.intern("Pattern");
        let blank = interner.intern("Blank");
        let plus = interner.intern("Plus");

        let expr = read("f(x_) := Plus(x, 10)", &interner).expect("should parse");
        let lhs = Expr::call(f, vec![Expr::call(pattern, vec![Expr::symbol(x), Expr::call(blank, vec![])])]);
        let rhs = Expr::call(plus, vec![Expr::symbol(x), Expr::integer(10)]);
        assert_eq!(expr, Expr::call(set_delayed, vec![lhs, rhs]));
    }

    #[test]
    fn desugars_typed_blank_suffix() {
        let interner = SharedInterner::new();
        let blank = interner.intern("Blank");
        let integer_ty = interner.intern("Integer");
        let pattern = interner.intern("Pattern");
        let x = interner.intern("x");
        let expr = read("x_Integer", &interner).expect("should parse");
        assert_eq!(
            expr,
            Expr::call(pattern, vec![Expr::symbol(x), Expr::call(blank, vec![Expr::symbol(integer_ty)])])
        );
    }

    #[test]
    fn desugars_double_and_triple_underscore_suffixes() {
        let interner = SharedInterner::new();
        let blank_seq = interner.intern("BlankSequence");
        let blank_null_seq = interner.intern("BlankNullSequence");
        let pattern = interner.intern("Pattern");
        let x = interner.intern("x");
        assert_eq!(
            read("x__", &interner),
            Ok(Expr::call(pattern, vec![Expr::symbol(x), Expr::call(blank_seq, vec![])]))
        );
        assert_eq!(
            read("x___", &interner),
            Ok(Expr::call(pattern, vec![Expr::symbol(x), Expr::call(blank_null_seq, vec![])]))
        );
    }

    #[test]
    fn rejects_unterminated_strings() {
        let interner = SharedInterner::new();
        assert!(read("\"unterminated", &interner).is_err());
    }
}
