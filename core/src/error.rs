//! Error types for the purl request pipeline.
//!
//! # Design
//! Parse-time failures (`InvalidUrl`, `InvalidHeader`, `UnknownMethod`) are
//! raised before anything is rendered or sent. `Transport` carries the
//! collaborator's message verbatim; a non-2xx status is never an error.

use std::fmt;

/// Errors returned while parsing, building, or executing a request.
#[derive(Debug)]
pub enum PurlError {
    /// Neither the absolute nor the localhost shorthand grammar matched.
    InvalidUrl(String),

    /// A header name or value cannot be put on the wire.
    InvalidHeader { name: String, reason: &'static str },

    /// The method string is not one of GET, POST, PUT, DELETE.
    UnknownMethod(String),

    /// The URL scheme is neither http nor https and the request was going
    /// to be sent.
    UnsupportedProtocol(String),

    /// The data fields could not be encoded into a body.
    SerializationError(String),

    /// The transport failed to send the request or receive the response.
    Transport(String),

    /// The presenter failed to write its output.
    Render(String),
}

impl fmt::Display for PurlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurlError::InvalidUrl(input) => write!(f, "invalid URL format: {input}"),
            PurlError::InvalidHeader { name, reason } => {
                write!(f, "invalid header {name:?}: {reason}")
            }
            PurlError::UnknownMethod(method) => write!(f, "unknown HTTP method: {method}"),
            PurlError::UnsupportedProtocol(scheme) => {
                write!(f, "unsupported protocol: {scheme}")
            }
            PurlError::SerializationError(msg) => write!(f, "serialization failed: {msg}"),
            PurlError::Transport(msg) => write!(f, "{msg}"),
            PurlError::Render(msg) => write!(f, "output failed: {msg}"),
        }
    }
}

impl std::error::Error for PurlError {}

impl From<std::io::Error> for PurlError {
    fn from(err: std::io::Error) -> Self {
        PurlError::Render(err.to_string())
    }
}
