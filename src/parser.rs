//! TOML Path parser.
//!
//! A path is split on `.` and every non-empty segment must be either a TOML
//! key or a TOML key followed by a bracketed integer, like `servers[0]`.
//! Whether a segment is a key is decided by the TOML grammar itself.

use std::str::FromStr;
use std::sync::OnceLock;

use nom::{
    branch::alt,
    character::complete::{anychar, char, i64 as integer, none_of},
    combinator::{all_consuming, value},
    error::Error as NomError,
    multi::many0,
    sequence::{delimited, preceded},
    Finish, IResult,
};
use regex::Regex;

use crate::ast::{Step, TomlPath, PATH_SEPARATOR};

/// The value assigned to a segment when checking it against the key grammar.
const PROBE_VALUE: &str = "test";

impl TomlPath {
    /// Compiles a new TOML Path from a string.
    pub fn new(s: &str) -> Result<Self, Error> {
        Self::from_str(s)
    }
}

impl FromStr for TomlPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = vec![];
        let mut position = 0;
        for segment in s.split(PATH_SEPARATOR) {
            let start = position;
            position += segment.len() + PATH_SEPARATOR.len_utf8();
            if segment.is_empty() {
                continue;
            }
            if let Some(key) = decode_key(segment) {
                steps.push(Step::Key(key));
                continue;
            }
            let (key, index) = key_with_index(segment).ok_or_else(|| Error {
                position: start,
                segment: segment.into(),
                message: "not a valid TOML key".into(),
            })?;
            let index = parse_index(index).map_err(|message| Error {
                position: start,
                segment: segment.into(),
                message: message.into(),
            })?;
            steps.push(Step::Key(key));
            steps.push(Step::Index(index));
        }
        let path = TomlPath { steps };
        tracing::trace!(input = s, path = %path, "parsed path");
        Ok(path)
    }
}

/// The error type returned when parsing a TOML path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid key in path at position {position}, {segment:?}: {message}")]
pub struct Error {
    position: usize,
    segment: Box<str>,
    message: Box<str>,
}

impl Error {
    /// Returns the byte offset of the offending segment in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the offending segment.
    pub fn segment(&self) -> &str {
        &self.segment
    }
}

/// Checks `segment` against the TOML key grammar and returns the decoded key.
///
/// The segment is accepted only if `<segment>='test'` decodes to a table with
/// exactly that one assignment, and the segment holds no comment that could
/// hide text following it.
fn decode_key(segment: &str) -> Option<String> {
    if segment.contains(['\n', '\r']) || all_consuming(no_comment)(segment).is_err() {
        return None;
    }
    let table: toml::Table = format!("{segment}='{PROBE_VALUE}'").parse().ok()?;
    if table.len() != 1 {
        return None;
    }
    let (key, value) = table.into_iter().next()?;
    match value {
        toml::Value::String(s) if s == PROBE_VALUE => Some(key),
        _ => None,
    }
}

/// Consumes text with no `#` outside of single-line quoted strings.
fn no_comment(input: &str) -> IResult<&str, ()> {
    let basic = delimited(
        char('"'),
        many0(alt((preceded(char('\\'), anychar), none_of("\\\"")))),
        char('"'),
    );
    let literal = delimited(char('\''), many0(none_of("'")), char('\''));
    value(
        (),
        many0(alt((
            value((), basic),
            value((), literal),
            value((), none_of("\"'#")),
        ))),
    )(input)
}

/// Splits `<key>[<index>]` into the decoded key and the raw index text.
fn key_with_index(segment: &str) -> Option<(String, &str)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(.+)\[([^\[\]]*)\]$").expect("key with index pattern must compile")
    });
    let captures = pattern.captures(segment)?;
    let key = decode_key(captures.get(1)?.as_str())?;
    Some((key, captures.get(2)?.as_str()))
}

/// Parses the text between brackets: an optional sign and decimal digits.
fn parse_index(input: &str) -> Result<i64, &'static str> {
    if input.is_empty() {
        return Err("empty array index");
    }
    match all_consuming(integer::<_, NomError<&str>>)(input).finish() {
        Ok((_, index)) => Ok(index),
        // the digits were read but do not fit
        Err(_) if is_integer_literal(input) => Err("array index is out of integer range"),
        Err(_) => Err("array index is not an integer"),
    }
}

fn is_integer_literal(input: &str) -> bool {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
