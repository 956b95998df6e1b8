//! A `nom`-based recursive-descent parser for the hq query language.
//!
//! ```text
//! Filter := Comma ("," Comma)*
//! Comma  := Pipe ("|" Pipe)*
//! Pipe   := Atomic Suffix?
//! Atomic := "[" Filter "]" | "find(" String ")" | "attr(" String ")" | "html" | "text"
//! Suffix := "[" "]" | "[" "-"? Int "]"
//! ```
use super::ast::{Atomic, Comma, Filter, Pipe, Suffix};
use crate::error::QueryError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, multispace0, one_of, satisfy},
    combinator::{cut, map, not, opt},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};

// --- Main Public Parser ---

pub fn parse_query(input: &str) -> Result<Filter, QueryError> {
    match terminated(filter, multispace0).parse(input) {
        Ok(("", query)) => {
            log::debug!(
                "Parsed query '{}' into {} branch(es)",
                input,
                query.branches.len()
            );
            Ok(query)
        }
        Ok((rest, _)) => {
            Err(SyntaxError::new(rest, "`,`, `|` or end of input").into_query_error(input))
        }
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.into_query_error(input)),
        Err(nom::Err::Incomplete(_)) => {
            Err(SyntaxError::new("", "more input").into_query_error(input))
        }
    }
}

// --- Error Type ---

/// Tracks the furthest position the parser failed at and what it would have
/// accepted there.
#[derive(Debug, Clone, PartialEq)]
struct SyntaxError<'a> {
    input: &'a str,
    expected: Vec<&'static str>,
}

impl<'a> SyntaxError<'a> {
    fn new(input: &'a str, expected: &'static str) -> Self {
        Self {
            input,
            expected: vec![expected],
        }
    }

    fn into_query_error(self, source: &str) -> QueryError {
        let offset = source.len() - self.input.len();
        let expected = match self.expected.as_slice() {
            [] => "a valid query".to_string(),
            [only] => only.to_string(),
            [init @ .., last] => format!("one of {} or {}", init.join(", "), last),
        };
        QueryError::Parse {
            offset,
            found: describe_token(self.input),
            expected,
        }
    }
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self {
            input,
            expected: vec![],
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(mut self, other: Self) -> Self {
        // Prefer whichever alternative got further; merge expectations on a tie.
        match self.input.len().cmp(&other.input.len()) {
            std::cmp::Ordering::Greater => other,
            std::cmp::Ordering::Less => self,
            std::cmp::Ordering::Equal => {
                for e in other.expected {
                    if !self.expected.contains(&e) {
                        self.expected.push(e);
                    }
                }
                self
            }
        }
    }
}

/// The token at the start of `rest`, quoted, for error messages.
fn describe_token(rest: &str) -> String {
    let rest = rest.trim_start();
    let Some(first) = rest.chars().next() else {
        return "end of input".to_string();
    };
    if first.is_alphanumeric() || first == '_' {
        let word: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        format!("'{}'", word)
    } else {
        format!("'{}'", first)
    }
}

type PResult<'a, O> = IResult<&'a str, O, SyntaxError<'a>>;

// --- Combinators & Helpers ---

/// Replaces whatever `inner` reports on failure with a single expectation.
fn expect<'a, O, F>(
    expected: &'static str,
    mut inner: F,
) -> impl Parser<&'a str, Output = O, Error = SyntaxError<'a>>
where
    F: Parser<&'a str, Output = O, Error = SyntaxError<'a>>,
{
    move |input: &'a str| {
        inner
            .parse(input)
            .map_err(|e| e.map(|_| SyntaxError::new(input, expected)))
    }
}

/// A literal token, with any leading whitespace skipped.
fn token<'a>(
    t: &'static str,
    label: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = SyntaxError<'a>> {
    preceded(multispace0, expect(label, tag(t)))
}

/// A keyword that must not run on into further identifier characters.
fn keyword<'a>(
    word: &'static str,
    label: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = SyntaxError<'a>> {
    preceded(
        multispace0,
        expect(
            label,
            terminated(tag(word), not(satisfy(|c: char| c.is_alphanumeric() || c == '_'))),
        ),
    )
}

// --- Grammar ---

fn filter(input: &str) -> PResult<'_, Filter> {
    map(
        pair(comma, many0(preceded(token(",", "`,`"), cut(comma)))),
        |(first, rest)| {
            let mut branches = vec![first];
            branches.extend(rest);
            Filter { branches }
        },
    )
    .parse(input)
}

fn comma(input: &str) -> PResult<'_, Comma> {
    map(
        pair(pipe, many0(preceded(token("|", "`|`"), cut(pipe)))),
        |(first, rest)| {
            let mut stages = vec![first];
            stages.extend(rest);
            Comma { stages }
        },
    )
    .parse(input)
}

fn pipe(input: &str) -> PResult<'_, Pipe> {
    map(pair(atomic, opt(suffix)), |(atomic, suffix)| Pipe { atomic, suffix }).parse(input)
}

fn atomic(input: &str) -> PResult<'_, Atomic> {
    alt((array_literal, find, attr, html, text)).parse(input)
}

fn array_literal(input: &str) -> PResult<'_, Atomic> {
    map(
        preceded(token("[", "`[`"), cut(terminated(filter, token("]", "`]`")))),
        |inner| Atomic::Array(Box::new(inner)),
    )
    .parse(input)
}

fn find(input: &str) -> PResult<'_, Atomic> {
    map(preceded(keyword("find", "`find`"), cut(call_argument)), Atomic::Find).parse(input)
}

fn attr(input: &str) -> PResult<'_, Atomic> {
    map(preceded(keyword("attr", "`attr`"), cut(call_argument)), Atomic::Attr).parse(input)
}

fn html(input: &str) -> PResult<'_, Atomic> {
    map(keyword("html", "`html`"), |_| Atomic::Html).parse(input)
}

fn text(input: &str) -> PResult<'_, Atomic> {
    map(keyword("text", "`text`"), |_| Atomic::Text).parse(input)
}

fn call_argument(input: &str) -> PResult<'_, String> {
    delimited(token("(", "`(`"), string_literal, token(")", "`)`")).parse(input)
}

fn suffix(input: &str) -> PResult<'_, Suffix> {
    preceded(
        token("[", "`[`"),
        cut(alt((
            map(token("]", "`]`"), |_| Suffix::Iterate),
            map(terminated(index, token("]", "`]`")), Suffix::Index),
        ))),
    )
    .parse(input)
}

fn index(input: &str) -> PResult<'_, i64> {
    let (rest, negative) = opt(token("-", "`-`")).parse(input)?;
    let (at_digits, _) = multispace0::<&str, SyntaxError<'_>>(rest)?;
    let (rest, digits) = expect("an integer", digit1).parse(at_digits)?;
    // The sign is parsed with the digits so that i64::MIN is representable.
    let literal = if negative.is_some() {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    let value = literal.parse::<i64>().map_err(|_| {
        nom::Err::Failure(SyntaxError::new(at_digits, "an integer that fits in 64 bits"))
    })?;
    Ok((rest, value))
}

/// Reads the four hex digits of a `\u` escape.
fn hex_code_unit(chars: &mut std::str::CharIndices<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).map(|(_, h)| h).collect();
    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// Decodes a `\u` escape whose `\u` prefix has been consumed, combining a
/// UTF-16 surrogate pair into one character.
fn unicode_escape(chars: &mut std::str::CharIndices<'_>) -> Option<char> {
    let unit = hex_code_unit(chars)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit);
    }
    match (chars.next(), chars.next()) {
        (Some((_, '\\')), Some((_, 'u'))) => {}
        _ => return None,
    }
    let low = hex_code_unit(chars).filter(|low| (0xDC00..0xE000).contains(low))?;
    char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
}

/// A single- or double-quoted string with JSON-style escapes.
fn string_literal(input: &str) -> PResult<'_, String> {
    let (body, quote) =
        preceded(multispace0, expect("a quoted string", one_of("\"'"))).parse(input)?;
    let mut out = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => return Ok((&body[i + 1..], out)),
            '\\' => {
                let bad_escape =
                    || nom::Err::Failure(SyntaxError::new(&body[i..], "a valid escape sequence"));
                let (_, escaped) = chars.next().ok_or_else(bad_escape)?;
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0c}'),
                    '0' => out.push('\0'),
                    '\\' | '/' | '"' | '\'' => out.push(escaped),
                    'u' => out.push(unicode_escape(&mut chars).ok_or_else(bad_escape)?),
                    _ => return Err(bad_escape()),
                }
            }
            c => out.push(c),
        }
    }

    Err(nom::Err::Failure(SyntaxError::new(
        &body[body.len()..],
        "a closing quote",
    )))
}
