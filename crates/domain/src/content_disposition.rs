//! `Content-Disposition` header parsing.
//!
//! Follows the media-type parameter grammar of RFC 2045 / RFC 2183:
//! a leading token (optionally `type/subtype`) followed by `; name=value`
//! pairs, where values are tokens or quoted strings. Extended values
//! (`name*=utf-8''percent%20encoded`, RFC 2231) replace the plain value
//! of the same name.

use std::collections::BTreeMap;

use crate::error::{DomainError, DomainResult};

/// A parsed `Content-Disposition` (or media-type) header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    disposition: String,
    params: BTreeMap<String, String>,
}

impl ContentDisposition {
    /// Parses a header value such as `attachment; filename="app.zip"`.
    ///
    /// The disposition and parameter names are lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the leading token is missing, a parameter is
    /// malformed, or a parameter name repeats.
    pub fn parse(value: &str) -> DomainResult<Self> {
        // `rest` keeps its leading `;` so every parameter reads as `; name=value`.
        let (base, mut rest) = value
            .find(';')
            .map_or((value, ""), |index| value.split_at(index));

        let disposition = base.trim().to_ascii_lowercase();
        check_disposition(&disposition)?;

        let mut params = BTreeMap::new();
        let mut extended = BTreeMap::new();

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let Some((key, value, remaining)) = consume_param(rest) else {
                if rest.trim() == ";" {
                    // Tolerate a single trailing semicolon.
                    break;
                }
                return Err(DomainError::InvalidMediaParameter);
            };

            let target = if key.ends_with('*') {
                &mut extended
            } else {
                &mut params
            };
            if target.contains_key(&key) {
                return Err(DomainError::DuplicateParameter(key));
            }
            target.insert(key, value);
            rest = remaining;
        }

        for (key, raw) in extended {
            let base_name = key.trim_end_matches('*');
            match decode_extended_value(&raw) {
                Some(decoded) => {
                    params.insert(base_name.to_string(), decoded);
                }
                None => {
                    params.insert(key, raw);
                }
            }
        }

        Ok(Self {
            disposition,
            params,
        })
    }

    /// Returns the disposition type (e.g. `attachment`).
    #[must_use]
    pub fn disposition(&self) -> &str {
        &self.disposition
    }

    /// Returns the value of a parameter. Names are matched case-insensitively.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the `filename` parameter if present and non-empty.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.param("filename").filter(|name| !name.is_empty())
    }
}

fn check_disposition(disposition: &str) -> DomainResult<()> {
    let (token, rest) = consume_token(disposition);
    if token.is_empty() {
        return Err(DomainError::NoMediaType);
    }
    if rest.is_empty() {
        return Ok(());
    }
    let Some(subtype) = rest.strip_prefix('/') else {
        return Err(DomainError::ExpectedSlash);
    };
    let (subtype, rest) = consume_token(subtype);
    if subtype.is_empty() || !rest.is_empty() {
        return Err(DomainError::ExpectedToken);
    }
    Ok(())
}

const fn is_tspecial(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
    )
}

const fn is_token_char(c: char) -> bool {
    c.is_ascii() && c > ' ' && c != '\u{7f}' && !is_tspecial(c)
}

/// Splits off the longest leading run of token characters.
fn consume_token(v: &str) -> (&str, &str) {
    let end = v.find(|c| !is_token_char(c)).unwrap_or(v.len());
    v.split_at(end)
}

/// Consumes a token or a quoted string.
///
/// Returns `None` if the value is empty or the quoted string is
/// unterminated.
fn consume_value(v: &str) -> Option<(String, &str)> {
    let Some(quoted) = v.strip_prefix('"') else {
        let (token, rest) = consume_token(v);
        return (!token.is_empty()).then(|| (token.to_string(), rest));
    };

    let mut buffer = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((buffer, &quoted[i + 1..])),
            '\\' => {
                let next = quoted[i + 1..].chars().next();
                match next {
                    Some(escaped) if is_tspecial(escaped) => {
                        buffer.push(escaped);
                        chars.next();
                    }
                    _ => buffer.push(c),
                }
            }
            '\r' | '\n' => return None,
            _ => buffer.push(c),
        }
    }
    None
}

/// Consumes `; name=value`, returning the lowercased name, the value and
/// the remaining input.
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

/// Decodes an RFC 2231 extended value: `charset'language'percent-encoded`.
fn decode_extended_value(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;

    if !charset.eq_ignore_ascii_case("utf-8") && !charset.eq_ignore_ascii_case("us-ascii") {
        return None;
    }

    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
