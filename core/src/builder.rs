//! Request construction and the offline / verbose / silent execution flow.
//!
//! # Design
//! `RequestBuilder::build` turns the parsed URL and items into an
//! `HttpRequest` without touching the network. `execute` then drives the
//! mode state machine, calling out to a `Transport` for the round-trip and a
//! `Presenter` for output. Both collaborators are traits so the host picks
//! the HTTP stack and the terminal formatting.

use std::collections::BTreeMap;

use crate::error::PurlError;
use crate::http::{ContentType, HttpMethod, HttpRequest, HttpResponse, Protocol, RequestBody};
use crate::items::{parse_items, RequestItems};
use crate::url::{parse_url, ParsedUrl};

/// Header key written when the builder sets the content-type itself.
pub const CONTENT_TYPE: &str = "Content-type";

/// Sends a built request and returns the reply as data.
///
/// Implementations must not retry and must treat every status code as a
/// successful exchange; only send/receive failures are errors.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, PurlError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, PurlError>,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, PurlError> {
        self(request)
    }
}

/// Formats requests and responses for the user. No business logic.
///
/// `incoming` also receives the request that produced the response.
pub trait Presenter {
    fn outgoing(&mut self, request: &HttpRequest) -> Result<(), PurlError>;
    fn incoming(&mut self, request: &HttpRequest, response: &HttpResponse) -> Result<(), PurlError>;
}

/// How an invocation treats the network and its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Send, render only the response.
    Silent,
    /// Render the request, send, render the response.
    Verbose,
    /// Render the request and stop.
    Offline,
}

impl Mode {
    /// `offline` wins over `verbose`.
    pub fn from_flags(verbose: bool, offline: bool) -> Self {
        match (verbose, offline) {
            (_, true) => Mode::Offline,
            (true, false) => Mode::Verbose,
            (false, false) => Mode::Silent,
        }
    }

    pub fn renders_request(&self) -> bool {
        !matches!(self, Mode::Silent)
    }
}

/// Composes a parsed URL, a method, and parsed items into an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    parsed_url: ParsedUrl,
    method: HttpMethod,
    items: RequestItems,
}

impl RequestBuilder {
    pub fn new(parsed_url: ParsedUrl, method: HttpMethod, items: RequestItems) -> Self {
        Self {
            parsed_url,
            method,
            items,
        }
    }

    /// `protocol://host:port` followed by the path and query, unencoded.
    pub fn request_url(&self) -> String {
        self.parsed_url.to_string()
    }

    /// Resolve headers and body. With `form` set, the content-type is forced
    /// to the form-url-encoded constant regardless of what the user passed.
    pub fn build(self, form: bool) -> Result<HttpRequest, PurlError> {
        let url = self.request_url();
        let RequestBuilder {
            parsed_url,
            method,
            items: RequestItems { mut headers, data },
        } = self;

        if form {
            headers.retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE));
            headers.insert(CONTENT_TYPE.to_string(), ContentType::Form.as_str().to_string());
        }

        for (name, value) in &headers {
            validate_header(name, value)?;
        }

        let content_type = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
            .and_then(|(_, value)| ContentType::classify(value));
        let body = encode_body(&data, content_type, form)?;

        Ok(HttpRequest {
            method,
            url,
            path: parsed_url.path.unwrap_or_else(|| "/".to_string()),
            protocol: parsed_url.protocol,
            headers: headers.into_iter().collect(),
            data,
            body,
        })
    }
}

fn encode_body(
    data: &BTreeMap<String, String>,
    content_type: Option<ContentType>,
    form: bool,
) -> Result<Option<RequestBody>, PurlError> {
    // A JSON content-type always carries an object, `{}` included.
    if content_type == Some(ContentType::Json) {
        let body = serde_json::to_string(data)
            .map_err(|e| PurlError::SerializationError(e.to_string()))?;
        return Ok(Some(RequestBody::Json(body)));
    }
    if form && !data.is_empty() {
        let body = ::url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(data)
            .finish();
        return Ok(Some(RequestBody::Form(body)));
    }
    Ok(None)
}

/// Names must be RFC 7230 tokens; values must not break the header line.
fn validate_header(name: &str, value: &str) -> Result<(), PurlError> {
    let invalid = |reason| PurlError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("empty name"));
    }
    if !name.chars().all(is_token_char) {
        return Err(invalid("name is not a valid token"));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(invalid("value contains a line break or NUL"));
    }
    Ok(())
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// Run a built request through `mode`. Returns the response unless the mode
/// is `Offline`, in which case the transport is never called.
pub fn execute<T, P>(
    request: &HttpRequest,
    mode: Mode,
    transport: &T,
    presenter: &mut P,
) -> Result<Option<HttpResponse>, PurlError>
where
    T: Transport + ?Sized,
    P: Presenter + ?Sized,
{
    log::debug!("executing {} {} in {mode:?} mode", request.method, request.url);

    if mode.renders_request() {
        presenter.outgoing(request)?;
    }
    if mode == Mode::Offline {
        return Ok(None);
    }
    if let Protocol::Unsupported(scheme) = &request.protocol {
        return Err(PurlError::UnsupportedProtocol(scheme.clone()));
    }

    log::info!("sending {} {}", request.method, request.url);
    let response = transport.send(request)?;
    log::debug!("received status {}", response.status);

    presenter.incoming(request, &response)?;
    Ok(Some(response))
}

/// Everything a single command-line invocation supplies.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub url: String,
    pub method: HttpMethod,
    pub items: Option<Vec<String>>,
    pub verbose: bool,
    pub offline: bool,
    pub form: bool,
}

impl Invocation {
    /// Parse and build without executing. Every input error surfaces here.
    pub fn prepare(&self) -> Result<HttpRequest, PurlError> {
        let parsed_url = parse_url(&self.url)?;
        let items = parse_items(self.items.as_ref());
        RequestBuilder::new(parsed_url, self.method, items).build(self.form)
    }

    pub fn mode(&self) -> Mode {
        Mode::from_flags(self.verbose, self.offline)
    }

    pub fn run<T, P>(&self, transport: &T, presenter: &mut P) -> Result<Option<HttpResponse>, PurlError>
    where
        T: Transport + ?Sized,
        P: Presenter + ?Sized,
    {
        let request = self.prepare()?;
        execute(&request, self.mode(), transport, presenter)
    }
}
