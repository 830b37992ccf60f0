//! Terminal rendering of outgoing requests and incoming responses.
//!
//! The response body formatter follows the response content-type: JSON is
//! pretty-printed, HTML is syntax highlighted, and everything else is
//! written as received. Request and status lines carry `<PROTOCOL>/1.1`,
//! where the protocol comes from the request URL.

use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;
use purl_core::{ContentType, HttpRequest, HttpResponse, Presenter, Protocol, PurlError};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use ureq::http::StatusCode;

const HTML_THEME: &str = "base16-ocean.dark";

/// Writes human-readable requests and responses to `out`.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn headers(&mut self, headers: &[(String, String)]) -> Result<(), PurlError> {
        for (name, value) in headers {
            writeln!(self.out, "{}: {value}", name.green().bold())?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn outgoing(&mut self, request: &HttpRequest) -> Result<(), PurlError> {
        writeln!(
            self.out,
            "{} {} {}",
            request.method.as_str().bright_green().bold(),
            request.path,
            version(&request.protocol)
        )?;
        self.headers(&request.headers)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", data_json(&request.data)?)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn incoming(&mut self, request: &HttpRequest, response: &HttpResponse) -> Result<(), PurlError> {
        let status = status_line(&request.protocol, response.status);
        writeln!(self.out, "{}", status.blue().bold())?;
        self.headers(&response.headers)?;
        writeln!(self.out)?;

        let body = match response.content_type().and_then(ContentType::classify) {
            Some(ContentType::Json) => pretty_json(&response.body),
            Some(ContentType::Html) => highlight_html(&response.body),
            _ => response.body.clone(),
        };
        writeln!(self.out, "{body}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// `HTTP/1.1` for http URLs, `HTTPS/1.1` for https ones.
fn version(protocol: &Protocol) -> String {
    format!("{}/1.1", protocol.to_string().to_ascii_uppercase())
}

fn status_line(protocol: &Protocol, status: u16) -> String {
    let version = version(protocol);
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("{version} {status} {reason}"),
        None => format!("{version} {status}"),
    }
}

fn data_json(data: &BTreeMap<String, String>) -> Result<String, PurlError> {
    serde_json::to_string_pretty(data).map_err(|e| PurlError::SerializationError(e.to_string()))
}

/// Pretty-print a JSON body, or return it untouched if it does not parse.
fn pretty_json(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

/// Highlight an HTML body for a 24-bit terminal. Returns the body untouched
/// when colour is off or the highlighter fails.
fn highlight_html(body: &str) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return body.to_string();
    }
    match try_highlight_html(body) {
        Ok(highlighted) => highlighted,
        Err(e) => {
            log::debug!("html highlighting failed: {e}");
            body.to_string()
        }
    }
}

fn try_highlight_html(body: &str) -> Result<String, syntect::Error> {
    let syntaxes = SyntaxSet::load_defaults_newlines();
    let themes = ThemeSet::load_defaults();
    let syntax = syntaxes
        .find_syntax_by_extension("html")
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, &themes.themes[HTML_THEME]);

    let mut out = String::with_capacity(body.len() * 2);
    for line in LinesWithEndings::from(body) {
        let ranges = highlighter.highlight_line(line, &syntaxes)?;
        out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
    }
    out.push_str("\x1b[0m");
    Ok(out)
}
