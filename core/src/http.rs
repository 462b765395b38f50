//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `PocketClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` (or the caller)
//! executes the round-trip in between.

use std::time::Duration;

/// HTTP method for a request. The Pocket API only accepts `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Deadline for this request alone. `None` leaves the transport's own
    /// timeout in charge.
    pub timeout: Option<Duration>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 400,
            headers: vec![("x-error-code".to_string(), "138".to_string())],
            body: String::new(),
        };
        assert_eq!(response.header("X-Error-Code"), Some("138"));
        assert_eq!(response.header("X-Error"), None);
    }
}
