//! Transport seam between the dispatch client and whatever actually talks HTTP.
//!
//! The client assembles a complete [`WireRequest`] (method, URL, headers and
//! serialized body) and hands it to a [`Transport`]. Connection pooling,
//! timeouts, TLS and retries of transient failures all live behind this trait.

use std::fmt;

use crate::error::Result;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-formed outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: Method,
    /// Resource path relative to the API root, including any query string.
    pub path: String,
    /// Absolute URL: base URL joined with `path`.
    pub url: String,
    /// Header name/value pairs in the order they were added.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, if the call has one.
    pub body: Option<String>,
}

impl WireRequest {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers requests and returns responses.
///
/// Implementations report delivery failures as [`crate::WireError::Transport`];
/// any HTTP status, including errors, is a successful delivery.
pub trait Transport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        (**self).send(request)
    }
}
