//! URL parser for absolute URLs and the localhost shorthand.
//!
//! Two grammars are tried in order:
//!
//! - absolute: `<scheme>://<host>[:<port>][<path>][?<query>]`
//! - shorthand: `[:<port>]<path>[?<query>]`, implying `http://localhost`
//!
//! Hosts are letters, digits, and dots. Absolute paths may also contain dots;
//! shorthand paths may not. Both grammars must consume the whole input.

use std::fmt;
use std::str::FromStr;

use crate::error::PurlError;
use crate::http::Protocol;

/// Host used by the shorthand form.
pub const LOCALHOST: &str = "localhost";

/// Structured form of a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    /// Starts with `/` when present.
    pub path: Option<String>,
    /// Raw query including the leading `?`.
    pub query_params: Option<String>,
}

impl ParsedUrl {
    /// Build a `ParsedUrl`, falling back to the protocol's default port.
    pub fn new(
        protocol: Protocol,
        host: impl Into<String>,
        port: Option<u16>,
        path: Option<String>,
        query_params: Option<String>,
    ) -> Self {
        let port = port.unwrap_or_else(|| protocol.default_port());
        Self {
            protocol,
            host: host.into(),
            port,
            path,
            query_params,
        }
    }
}

/// Prints `protocol://host:port`, then the path and query verbatim.
impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)?;
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query_params {
            f.write_str(query)?;
        }
        Ok(())
    }
}

impl FromStr for ParsedUrl {
    type Err = PurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_url(s)
    }
}

/// Parse a raw URL, trying the absolute form first and the localhost
/// shorthand second.
pub fn parse_url(raw: &str) -> Result<ParsedUrl, PurlError> {
    let parsed = parse_absolute(raw)
        .or_else(|| parse_shorthand(raw))
        .ok_or_else(|| PurlError::InvalidUrl(raw.to_string()))?;
    log::debug!("parsed URL {raw:?} as {parsed}");
    Ok(parsed)
}

fn parse_absolute(raw: &str) -> Option<ParsedUrl> {
    let (scheme, rest) = raw.split_once("://")?;
    if !is_scheme(scheme) {
        return None;
    }

    let mut cursor = Cursor::new(rest);
    let host = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '.');
    if host.is_empty() {
        return None;
    }
    let port = cursor.port()?;
    let path = cursor.rest().starts_with('/').then(|| {
        cursor
            .take_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '/')
            .to_string()
    });
    let query = cursor.query(0)?;
    if !cursor.is_done() {
        return None;
    }

    Some(ParsedUrl::new(
        Protocol::from_scheme(scheme),
        host,
        port,
        path,
        query,
    ))
}

fn parse_shorthand(raw: &str) -> Option<ParsedUrl> {
    let mut cursor = Cursor::new(raw);
    let port = cursor.port()?;
    if !cursor.rest().starts_with('/') {
        return None;
    }
    let path = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '/');
    let query = cursor.query(1)?;
    if !cursor.is_done() {
        return None;
    }

    Some(ParsedUrl::new(
        Protocol::Http,
        LOCALHOST,
        port,
        Some(path.to_string()),
        query,
    ))
}

fn is_scheme(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Forward-only scanner over the unconsumed part of the input.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn rest(&self) -> &'a str {
        self.rest
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    /// Optional `:<digits>`. The outer `None` means a colon was present but
    /// not followed by a valid port.
    fn port(&mut self) -> Option<Option<u16>> {
        let Some(after_colon) = self.rest.strip_prefix(':') else {
            return Some(None);
        };
        self.rest = after_colon;
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits.parse::<u16>().ok().map(Some)
    }

    /// Optional `?` followed by at least `min_len` characters, captured
    /// verbatim with the `?`.
    fn query(&mut self, min_len: usize) -> Option<Option<String>> {
        if !self.rest.starts_with('?') {
            return Some(None);
        }
        if self.rest.len() - 1 < min_len {
            return None;
        }
        let query = self.rest.to_string();
        self.rest = "";
        Some(Some(query))
    }
}
