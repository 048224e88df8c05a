//! HTTP/1.1 request serialization.
//!
//! Header order on the wire is fixed:
//!
//! ```text
//! {METHOD} {path} HTTP/1.1
//! Host
//! User-Agent
//! Accept: */*
//! Accept-Encoding: gzip, deflate
//! Connection: close
//! Cookie                         (only when the jar has something)
//! <caller header lines>          (verbatim)
//! Content-Type / Content-Length  (only for POST with a non-empty body)
//! ```
//!
//! followed by an empty line and the body bytes.

use crate::urlrequest::parsedurl::ParsedUrl;
use bytes::{BufMut, Bytes, BytesMut};
use http::Method;

pub const DEFAULT_USER_AGENT: &str = concat!("curlnet/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A serialized request: header lines plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    lines: Vec<String>,
    body: Bytes,
}

impl WireRequest {
    /// Request line and header lines, without CRLFs or the terminating blank line.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn request_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Bytes to write to the socket.
    pub fn to_bytes(&self) -> Bytes {
        let head_len: usize = self.lines.iter().map(|l| l.len() + 2).sum();
        let mut buf = BytesMut::with_capacity(head_len + 2 + self.body.len());
        for line in &self.lines {
            buf.put_slice(line.as_bytes());
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"\r\n");
        buf.put_slice(&self.body);
        buf.freeze()
    }
}

/// Builder for a [`WireRequest`].
pub struct RequestBuilder<'a> {
    method: &'a Method,
    url: &'a ParsedUrl,
    user_agent: &'a str,
    cookie_header: Option<&'a str>,
    extra_headers: &'a [String],
    body: Option<&'a str>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(method: &'a Method, url: &'a ParsedUrl) -> Self {
        Self {
            method,
            url,
            user_agent: DEFAULT_USER_AGENT,
            cookie_header: None,
            extra_headers: &[],
            body: None,
        }
    }

    pub fn user_agent(mut self, user_agent: &'a str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// `Cookie` header value; an empty string adds no header.
    pub fn cookie_header(mut self, cookies: &'a str) -> Self {
        self.cookie_header = Some(cookies);
        self
    }

    /// Raw `Name: Value` lines appended without validation.
    pub fn extra_headers(mut self, lines: &'a [String]) -> Self {
        self.extra_headers = lines;
        self
    }

    /// Body data. Only sent for POST, and only when non-empty.
    pub fn body(mut self, body: Option<&'a str>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> WireRequest {
        let mut lines = vec![
            format!("{} {} HTTP/1.1", self.method, self.url.path),
            format!("Host: {}", self.url.authority()),
            format!("User-Agent: {}", self.user_agent),
            "Accept: */*".to_string(),
            "Accept-Encoding: gzip, deflate".to_string(),
            "Connection: close".to_string(),
        ];

        if let Some(cookies) = self.cookie_header.filter(|c| !c.is_empty()) {
            lines.push(format!("Cookie: {}", cookies));
        }

        lines.extend(
            self.extra_headers
                .iter()
                .filter(|line| !line.is_empty())
                .cloned(),
        );

        let mut body = Bytes::new();
        if *self.method == Method::POST {
            if let Some(data) = self.body.filter(|d| !d.is_empty()) {
                body = Bytes::copy_from_slice(data.as_bytes());
                lines.push(format!("Content-Type: {}", FORM_CONTENT_TYPE));
                lines.push(format!("Content-Length: {}", body.len()));
            }
        }

        WireRequest { lines, body }
    }
}
