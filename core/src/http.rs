//! HTTP types shared by the parsers, the request builder, and the host.
//!
//! # Design
//! Requests and responses are plain data. The core builds an `HttpRequest`
//! and hands it to a `Transport`; the host turns the wire reply back into an
//! `HttpResponse`. Methods, protocols, and content-types are closed enums
//! converted to wire strings only at the boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PurlError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(PurlError::UnknownMethod(s.to_string())),
        }
    }
}

/// URL scheme recognised by the URL parser.
///
/// `Unsupported` keeps the scheme token as written so a parsed URL prints
/// back to something the parser accepts again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
    Unsupported(String),
}

impl Protocol {
    /// Port used when the URL does not name one.
    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            _ => 443,
        }
    }

    pub fn from_scheme(scheme: &str) -> Self {
        if scheme.eq_ignore_ascii_case("http") {
            Protocol::Http
        } else if scheme.eq_ignore_ascii_case("https") {
            Protocol::Https
        } else {
            Protocol::Unsupported(scheme.to_string())
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Https => f.write_str("https"),
            Protocol::Unsupported(scheme) => f.write_str(scheme),
        }
    }
}

/// The content-types purl knows how to encode or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Text,
    Html,
    Form,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Text => "text/plain",
            ContentType::Html => "text/html",
            ContentType::Form => "application/x-www-form-urlencoded",
        }
    }

    /// Classify a `Content-Type` header value by containment, so parameters
    /// such as `; charset=utf-8` do not defeat the match.
    pub fn classify(value: &str) -> Option<ContentType> {
        let value = value.to_ascii_lowercase();
        if value.contains(ContentType::Json.as_str()) || value.contains("+json") {
            Some(ContentType::Json)
        } else if value.contains(ContentType::Form.as_str()) {
            Some(ContentType::Form)
        } else if value.contains(ContentType::Html.as_str()) {
            Some(ContentType::Html)
        } else if value.contains(ContentType::Text.as_str()) {
            Some(ContentType::Text)
        } else {
            None
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn content(&self) -> &str {
        match self {
            RequestBody::Json(body) | RequestBody::Form(body) => body,
        }
    }
}

/// A fully resolved request, ready for a `Transport`.
///
/// Built by `RequestBuilder::build`. `path` is the request target shown in
/// the rendered request line; `data` keeps the unencoded fields for display.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub protocol: Protocol,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub data: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Case-insensitive header lookup; the first match wins.
fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
