//! Blocking HTTP transport backed by ureq.

use std::time::Duration;

use purl_core::{HttpMethod, HttpRequest, HttpResponse, PurlError, Transport};
use ureq::{Agent, RequestBuilder};

/// Sends `HttpRequest`s with a single ureq agent. Every status code comes
/// back as data; only connection and I/O failures are errors.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, PurlError> {
        let url = request.url.as_str();
        let body = request.body.as_ref().map(|b| b.content().as_bytes());
        let agent = &self.agent;

        let result = match (request.method, body) {
            (HttpMethod::Get, None) => with_headers(agent.get(url), request).call(),
            (HttpMethod::Get, Some(body)) => with_headers(agent.get(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => with_headers(agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), request).send(body),
            (HttpMethod::Post, None) => with_headers(agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), request).send(body),
            (HttpMethod::Put, None) => with_headers(agent.put(url), request).send_empty(),
        };
        let mut response = result.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    builder
}

fn transport_error(err: ureq::Error) -> PurlError {
    PurlError::Transport(err.to_string())
}
