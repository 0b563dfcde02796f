#![deny(missing_docs)]

//! # Media Type Identifiers
//!
//! Parses `type/subtype; name=value` identifiers following the RFC 2045
//! token grammar. Type and parameter names are case-insensitive and come back
//! lower-cased.

use derive_more::Display;
use std::collections::BTreeMap;

/// Why an identifier is not a valid media type.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MediaTypeError {
    /// Nothing before the first `;`.
    #[display("no media type")]
    Empty,
    /// The first token is followed by something other than `/`.
    #[display("expected slash after first token")]
    MissingSlash,
    /// Nothing follows the `/`.
    #[display("expected token after slash")]
    MissingSubtype,
    /// Junk after the subtype.
    #[display("unexpected content after media subtype")]
    TrailingContent,
    /// A parameter that is not `token=token` or `token="quoted"`.
    #[display("invalid media parameter")]
    InvalidParameter,
    /// The same parameter given twice.
    #[display("duplicate parameter name {_0:?}")]
    DuplicateParameter(String),
}

impl std::error::Error for MediaTypeError {}

/// A parsed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// Lower-cased `type/subtype`.
    pub essence: String,
    /// Parameters by lower-cased name.
    pub params: BTreeMap<String, String>,
}

fn is_tspecial(c: char) -> bool {
    "()<>@,;:\\\"/[]?=".contains(c)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii() && c > ' ' && c != '\x7f' && !is_tspecial(c)
}

fn consume_token(v: &str) -> (&str, &str) {
    let end = v.find(|c| !is_token_char(c)).unwrap_or(v.len());
    v.split_at(end)
}

/// Consumes a token or a quoted string, returning the unescaped value.
fn consume_value(v: &str) -> Option<(String, &str)> {
    let Some(quoted) = v.strip_prefix('"') else {
        let (token, rest) = consume_token(v);
        return (!token.is_empty()).then(|| (token.to_string(), rest));
    };
    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &quoted[i + 1..])),
            '\\' => value.push(chars.next()?.1),
            '\r' | '\n' => return None,
            c => value.push(c),
        }
    }
    None
}

/// Consumes `; name=value`, returning the lower-cased name and the value.
fn consume_param(v: &str) -> Option<(String, String, &str)> {
    let rest = v.trim_start().strip_prefix(';')?.trim_start();
    let (name, rest) = consume_token(rest);
    if name.is_empty() {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let (value, rest) = consume_value(rest)?;
    Some((name.to_ascii_lowercase(), value, rest))
}

fn check_essence(essence: &str) -> Result<(), MediaTypeError> {
    let (ty, rest) = consume_token(essence);
    if ty.is_empty() {
        return Err(MediaTypeError::Empty);
    }
    if rest.is_empty() {
        return Ok(());
    }
    let rest = rest.strip_prefix('/').ok_or(MediaTypeError::MissingSlash)?;
    let (subtype, rest) = consume_token(rest);
    if subtype.is_empty() {
        return Err(MediaTypeError::MissingSubtype);
    }
    if !rest.is_empty() {
        return Err(MediaTypeError::TrailingContent);
    }
    Ok(())
}

/// Parses a media type identifier.
///
/// A bare type without a subtype (`text`) is accepted, as is a single
/// trailing semicolon.
pub fn parse_media_type(identifier: &str) -> Result<MediaType, MediaTypeError> {
    let (head, mut rest) = match identifier.find(';') {
        Some(i) => identifier.split_at(i),
        None => (identifier, ""),
    };
    let essence = head.trim().to_ascii_lowercase();
    check_essence(&essence)?;

    let mut params = BTreeMap::new();
    while !rest.is_empty() {
        match consume_param(rest) {
            Some((name, value, remaining)) => {
                if params.contains_key(&name) {
                    return Err(MediaTypeError::DuplicateParameter(name));
                }
                params.insert(name, value);
                rest = remaining;
            }
            None => {
                let tail = rest.trim();
                if tail.is_empty() || tail == ";" {
                    break;
                }
                return Err(MediaTypeError::InvalidParameter);
            }
        }
    }

    Ok(MediaType { essence, params })
}
