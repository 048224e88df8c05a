//! Final HTTP response returned by the engine.

use crate::base::neterror::NetError;
use crate::http::headers::ResponseHeaders;
use crate::http::parser::parse_status_code;
use bytes::Bytes;

/// Status line, headers and decoded body of the last hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status_line: String,
    headers: ResponseHeaders,
    body: Bytes,
    url: String,
    redirect_count: usize,
    warnings: Vec<NetError>,
}

impl HttpResponse {
    pub(crate) fn new(
        status_line: String,
        headers: ResponseHeaders,
        body: Bytes,
        url: String,
        redirect_count: usize,
        warnings: Vec<NetError>,
    ) -> Self {
        Self {
            status_line,
            headers,
            body,
            url,
            redirect_count,
            warnings,
        }
    }

    /// The status line exactly as received.
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Numeric status code. Always parseable: the engine rejects responses
    /// whose status line has none.
    pub fn status(&self) -> u16 {
        parse_status_code(&self.status_line).unwrap_or_default()
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// Body after content decoding.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// URL of the hop that produced this response.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of redirects followed to reach this response.
    pub fn redirect_count(&self) -> usize {
        self.redirect_count
    }

    /// Non-fatal problems encountered while producing the response.
    pub fn warnings(&self) -> &[NetError] {
        &self.warnings
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
