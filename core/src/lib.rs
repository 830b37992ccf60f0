//! Request-construction core for the purl command-line HTTP client.
//!
//! # Overview
//! Turns a raw URL, a method, and a list of `name:value` / `name=value` items
//! into an `HttpRequest`, then drives the offline / verbose / silent flow
//! against host-supplied `Transport` and `Presenter` implementations. The
//! core performs no I/O of its own.
//!
//! # Design
//! - `url` and `items` are pure parsers; every input error surfaces from
//!   them or from header validation in `builder`, before anything is sent.
//! - The default header table is a constant copied into each request.
//! - Methods, protocols, and content-types are closed enums.

pub mod builder;
pub mod error;
pub mod http;
pub mod items;
pub mod url;

pub use builder::{execute, Invocation, Mode, Presenter, RequestBuilder, Transport};
pub use error::PurlError;
pub use http::{ContentType, HttpMethod, HttpRequest, HttpResponse, Protocol, RequestBody};
pub use items::{parse_items, RequestItems, DEFAULT_HEADERS};
pub use crate::url::{parse_url, ParsedUrl};
