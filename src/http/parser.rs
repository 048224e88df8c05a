//! Raw HTTP/1.1 response parsing.

use crate::base::neterror::NetError;
use crate::http::headers::ResponseHeaders;
use bytes::Bytes;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// A response split into its three parts, before any content decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// First response line, verbatim.
    pub status_line: String,
    pub headers: ResponseHeaders,
    pub body: Bytes,
}

impl RawResponse {
    /// Numeric status code from the status line (`HTTP/1.1 200 OK` -> 200).
    pub fn status_code(&self) -> Result<u16, NetError> {
        parse_status_code(&self.status_line)
    }
}

/// Extract the status code from a status line.
pub fn parse_status_code(status_line: &str) -> Result<u16, NetError> {
    status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or(NetError::InvalidResponse)
}

/// Split a complete response buffer at the first CRLFCRLF.
///
/// Header lines without a `:` are skipped rather than rejected.
pub fn parse_response(raw: &[u8]) -> Result<RawResponse, NetError> {
    if raw.is_empty() {
        return Err(NetError::EmptyResponse);
    }

    let split = raw
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
        .ok_or(NetError::InvalidResponse)?;

    let header_block = String::from_utf8_lossy(&raw[..split]);
    let body = Bytes::copy_from_slice(&raw[split + HEADER_TERMINATOR.len()..]);

    let mut lines = header_block.split("\r\n");
    let status_line = lines.next().unwrap_or_default().to_string();

    let mut headers = ResponseHeaders::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        match line.split_once(':') {
            Some((name, value)) => headers.insert(name, value),
            None => tracing::debug!(line = %line, "skipping header line without ':'"),
        }
    }

    Ok(RawResponse {
        status_line,
        headers,
        body,
    })
}
