//! Generic S-expression grammar for EDIF documents.
//!
//! The token forms follow Rivest's canonical S-expression note
//! (<http://theory.lcs.mit.edu/~rivest/sexp.txt>) with the EDIF extensions:
//! `&`-prefixed positional pin references and the extended token
//! punctuation set. Alternatives are tried in a fixed order and the first
//! match wins; a length-prefixed token whose payload disagrees with its
//! prefix is a fatal error, not a backtrack point.

use crate::atom::Atom;
use crate::error::ParseError;
use combine::error::StreamError;
use combine::stream::state::SourcePosition;
use combine::*;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    List(Vec<Expr>),
    Symbol(Atom),
    Str(String),
    Num(i64),
    Bytes(Vec<u8>),
}

#[derive(Clone, Copy, PartialEq)]
pub struct Pos(pub i32, pub i32);

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

impl Expr {
    pub fn list(&self) -> Option<&[Expr]> {
        match &self.kind {
            ExprKind::List(es) => Some(&es),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<Atom> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn num(&self) -> Option<i64> {
        match self.kind {
            ExprKind::Num(n) => Some(n),
            _ => None,
        }
    }

    pub fn str(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Str(n) => Some(&*n),
            _ => None,
        }
    }

    /// Textual value of a leaf atom. Lists and raw byte blobs have none.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(Cow::Borrowed(s.as_ref())),
            ExprKind::Str(s) => Some(Cow::Borrowed(&*s)),
            ExprKind::Num(n) => Some(Cow::Owned(n.to_string())),
            ExprKind::List(_) | ExprKind::Bytes(_) => None,
        }
    }
}

type StreamErrorOf<I> = <<I as StreamOnce>::Error as combine::error::ParseError<
    <I as StreamOnce>::Item,
    <I as StreamOnce>::Range,
    <I as StreamOnce>::Position,
>>::StreamError;

fn stream_msg<I: StreamOnce>(msg: String) -> StreamErrorOf<I> {
    StreamError::message_message(msg)
}

fn int_from<I: StreamOnce>(digits: &str, radix: u32) -> Result<i64, StreamErrorOf<I>> {
    i64::from_str_radix(digits, radix)
        .map_err(|_| stream_msg::<I>(format!("integer `{}` out of range", digits)))
}

// Message format is load-bearing: ParseError::from_easy recovers the two
// lengths from it.
fn verify_len<I: StreamOnce>(expected: usize, actual: usize) -> Result<(), StreamErrorOf<I>> {
    if expected == actual {
        Ok(())
    } else {
        Err(stream_msg::<I>(format!(
            "invalid data of length {}, expected {}",
            actual, expected
        )))
    }
}

parser! {
    fn simple_string['a, I]()(I) -> ExprKind
    where [I: combine::Stream<Item=char> +
        combine::RangeStream +
        combine::StreamOnce<Range = &'a str, Position = SourcePosition>]
    {
        use combine::parser::char::char as cmb_char;
        use combine::parser::range;

        // <len>:<bytes>, exactly <len> printable non-whitespace characters
        let raw = attempt((
            range::take_while1(|c: char| c.is_ascii_digit()),
            cmb_char(':'),
        ))
        .and(range::take_while1(|c: char| c.is_ascii_graphic()))
        .and_then(|((len, _), payload): ((&str, char), &str)| {
            let expected = int_from::<I>(len, 10)? as usize;
            verify_len::<I>(expected, payload.len())?;
            Ok::<_, StreamErrorOf<I>>(ExprKind::Str(payload.to_string()))
        });

        // &?<digits>, positional pin references keep their textual form
        let pinref = attempt((
            optional(cmb_char('&')),
            range::take_while1(|c: char| c.is_ascii_digit()),
        ))
        .map(|(amp, digits): (Option<char>, &str)| {
            let mut s = String::with_capacity(digits.len() + 1);
            if amp.is_some() {
                s.push('&');
            }
            s.push_str(digits);
            ExprKind::Symbol(Atom::from(s))
        });

        // decimals carry no unnecessary leading zeros; anything else falls
        // through to the token alternative
        let num = attempt(
            (
                optional(cmb_char('-')),
                range::take_while1(|c: char| c.is_ascii_digit()),
            )
                .and_then(|(sign, digits): (Option<char>, &str)| {
                    if digits.len() > 1 && digits.starts_with('0') {
                        return Err(stream_msg::<I>("leading zeros".to_string()));
                    }
                    let n = int_from::<I>(digits, 10)?;
                    Ok(ExprKind::Num(if sign.is_some() { -n } else { n }))
                }),
        );

        // #<hex digits and whitespace>#, decoded as one integer
        let hex = cmb_char('#')
            .with(range::take_while1(|c: char| {
                c.is_ascii_hexdigit() || c.is_ascii_whitespace()
            }))
            .skip(cmb_char('#'))
            .and_then(|body: &str| {
                let digits: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                Ok::<_, StreamErrorOf<I>>(ExprKind::Num(int_from::<I>(&digits, 16)?))
            });

        // <len>?|<base64>|, length checked against the decoded byte count
        let base64_blob = attempt((
            optional(range::take_while1(|c: char| c.is_ascii_digit())),
            cmb_char('|'),
        ))
        .and(range::take_while(|c: char| {
            c.is_ascii_alphanumeric()
                || c == '+'
                || c == '/'
                || c == '='
                || c.is_ascii_whitespace()
        }))
        .skip(cmb_char('|'))
        .and_then(|((len, _), body): ((Option<&str>, char), &str)| {
            let encoded: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            let bytes = base64::decode(&encoded)
                .map_err(|e| stream_msg::<I>(format!("invalid base64 payload: {}", e)))?;
            if let Some(len) = len {
                let expected = int_from::<I>(len, 10)? as usize;
                verify_len::<I>(expected, bytes.len())?;
            }
            Ok::<_, StreamErrorOf<I>>(ExprKind::Bytes(bytes))
        });

        // <len>?"...", quotes stripped
        let quoted = optional(attempt(
            range::take_while1(|c: char| c.is_ascii_digit()).skip(look_ahead(cmb_char('"'))),
        ))
        .and(
            cmb_char('"')
                .with(range::take_while(|c: char| c != '"'))
                .skip(cmb_char('"')),
        )
        .and_then(|(len, body): (Option<&str>, &str)| {
            if let Some(len) = len {
                let expected = int_from::<I>(len, 10)? as usize;
                verify_len::<I>(expected, body.len())?;
            }
            Ok::<_, StreamErrorOf<I>>(ExprKind::Str(body.to_string()))
        });

        let token = range::take_while1(|c: char| {
            c.is_ascii_alphanumeric() || "-./_:*+=!<>".contains(c)
        })
        .map(|s: &str| ExprKind::Symbol(Atom::from(s)));

        choice!(raw, pinref, num, hex, base64_blob, quoted, token)
    }
}

parser! {
    pub fn sexpr_parser['a, I]()(I) -> Expr
    where [I: combine::Stream<Item=char> +
        combine::RangeStream +
        combine::StreamOnce<Range = &'a str, Position = SourcePosition>]
    {
        use combine::parser::char::{char as cmb_char, spaces};

        // a bracketed display hint is parsed and dropped
        let display = between(
            cmb_char('['),
            cmb_char(']'),
            spaces().with(simple_string()).skip(spaces()),
        );
        let atom = optional(display.skip(spaces())).with(simple_string());
        let list = between(
            cmb_char('('),
            cmb_char(')'),
            many(sexpr_parser()),
        )
        .map(|es| ExprKind::List(es));

        spaces()
            .with(position())
            .and(choice!(atom, list))
            .map(|(pos, kind): (SourcePosition, ExprKind)| {
                Expr {
                    kind,
                    pos: Pos(pos.line, pos.column),
                }
            })
            .skip(spaces())
    }
}

/// Parse one EDIF file in full. Anything short of exactly one well-formed
/// S-expression covering the whole input is an error.
pub fn parse_document(s: &str) -> Result<Expr, ParseError> {
    let (expr, _rest) = sexpr_parser()
        .skip(eof())
        .easy_parse(combine::stream::state::State::new(s))
        .map_err(ParseError::from_easy)?;
    Ok(expr)
}
