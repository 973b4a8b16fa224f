use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::utilities::constants::MAX_QUANTITY;

const COMMENT_MARKER: &str = "//";

/// One card reference from a decklist, e.g. `3 [MIR#71] Kukemssa Pirates`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecklistLineRequest {
    pub quantity: u32,
    pub set_code: Option<String>,
    pub collector_number: Option<String>,
    pub name: String,
}

impl fmt::Display for DecklistLineRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.quantity)?;
        match (&self.set_code, &self.collector_number) {
            (Some(set), Some(number)) => write!(f, "[{}#{}] ", set, number)?,
            (Some(set), None) => write!(f, "[{}] ", set)?,
            _ => {}
        }
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LineParseError {
    ControlCharacter(char),
    EmptyName,
    QuantityOutOfRange(String),
}

impl fmt::Display for LineParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LineParseError::ControlCharacter(c) => {
                write!(f, "line contains control character {:?}", c)
            }
            LineParseError::EmptyName => write!(f, "line has no card name"),
            LineParseError::QuantityOutOfRange(raw) => {
                write!(f, "quantity '{}' is out of range", raw)
            }
        }
    }
}

impl std::error::Error for LineParseError {}

/// A decklist line that did not match the grammar.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RejectedLine {
    /// 1-based position in the submitted text.
    pub line_number: usize,
    pub line: String,
    pub error: LineParseError,
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ParsedDecklist {
    pub requests: Vec<DecklistLineRequest>,
    pub rejected: Vec<RejectedLine>,
}

/// Everything from the first `//` onwards is a comment.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(index) => &line[..index],
        None => line,
    }
}

pub fn parse_line(line: &str) -> Result<DecklistLineRequest, LineParseError> {
    let line = strip_comment(line).trim();

    if let Some(c) = line.chars().find(|c| c.is_control() && *c != '\t') {
        return Err(LineParseError::ControlCharacter(c));
    }

    let (quantity, rest) = take_quantity(line)?;
    let (set_token, rest) = match take_set_token(rest) {
        Some((token, rest)) => (Some(token), rest),
        None => (None, rest),
    };

    let name = rest.trim();
    if name.is_empty() {
        return Err(LineParseError::EmptyName);
    }

    let (set_code, collector_number) = match set_token {
        Some(SetToken { code, number }) => (Some(code), number),
        None => (None, None),
    };

    Ok(DecklistLineRequest {
        quantity,
        set_code,
        collector_number,
        name: name.to_string(),
    })
}

/// Parses a whole decklist. Blank lines, comment-only lines and lines without a
/// name are dropped; lines that break the grammar are collected in `rejected`.
pub fn parse_decklist(decklist: &str) -> ParsedDecklist {
    let mut parsed = ParsedDecklist::default();

    for (index, raw_line) in decklist.lines().enumerate() {
        if strip_comment(raw_line).trim().is_empty() {
            continue;
        }

        match parse_line(raw_line) {
            Ok(request) => parsed.requests.push(request),
            Err(LineParseError::EmptyName) => {
                debug!("Dropping line {} without a card name: '{}'", index + 1, raw_line);
            }
            Err(error) => {
                warn!("Rejected decklist line {}: {}", index + 1, error);
                parsed.rejected.push(RejectedLine {
                    line_number: index + 1,
                    line: raw_line.to_string(),
                    error,
                });
            }
        }
    }

    parsed
}

/// A leading run of digits followed by whitespace is the quantity. Anything
/// else leaves the line untouched with a quantity of 1. Quantities above
/// `MAX_QUANTITY` are rejected.
fn take_quantity(line: &str) -> Result<(u32, &str), LineParseError> {
    let digits_end = line
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    if digits_end == 0 {
        return Ok((1, line));
    }

    let rest = &line[digits_end..];
    if !rest.starts_with(char::is_whitespace) {
        return Ok((1, line));
    }

    let digits = &line[..digits_end];
    let quantity: u32 = digits
        .parse()
        .map_err(|_| LineParseError::QuantityOutOfRange(digits.to_string()))?;
    if quantity > MAX_QUANTITY {
        return Err(LineParseError::QuantityOutOfRange(digits.to_string()));
    }

    Ok((quantity.max(1), rest.trim_start()))
}

#[derive(Debug, PartialEq)]
struct SetToken {
    code: String,
    number: Option<String>,
}

/// Matches `[SET]` or `[SET#NUMBER]` followed by whitespace or the end of the line.
fn take_set_token(line: &str) -> Option<(SetToken, &str)> {
    let inner_and_rest = line.strip_prefix('[')?;
    let close = inner_and_rest.find(']')?;
    let inner = &inner_and_rest[..close];
    let rest = &inner_and_rest[close + 1..];

    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }

    let (code, number) = match inner.split_once('#') {
        Some((code, number)) => (code, Some(number)),
        None => (inner, None),
    };

    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    if let Some(number) = number {
        if number.is_empty() || !number.chars().all(is_collector_number_char) {
            return None;
        }
    }

    Some((
        SetToken {
            code: code.to_ascii_uppercase(),
            number: number.map(str::to_string),
        },
        rest,
    ))
}

fn is_collector_number_char(c: char) -> bool {
    c.is_alphanumeric() || c == '★' || c == '-'
}
