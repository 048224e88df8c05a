//! Verbose transcript of a request, curl style.
//!
//! ```text
//! > GET / HTTP/1.1
//! > Host: example.com
//! >
//! < HTTP/1.1 200 OK
//! < Content-Type: text/plain
//! <
//! ```
//!
//! This is a diagnostic side channel. Write errors are ignored.

use crate::http::parser::RawResponse;
use crate::http::requestbuilder::WireRequest;
use std::fmt;
use std::io::{self, Write};

pub struct Tracer {
    sink: Option<Box<dyn Write + Send>>,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Tracer {
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn stderr() -> Self {
        Self::to_writer(io::stderr())
    }

    pub fn to_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Some(Box::new(writer)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.write_fmt(args);
            let _ = sink.write_all(b"\n");
        }
    }

    pub fn request(&mut self, request: &WireRequest) {
        if !self.is_enabled() {
            return;
        }
        for line in request.lines() {
            self.line(format_args!("> {}", line));
        }
        let body = request.body();
        if !body.is_empty() {
            self.line(format_args!(">"));
            match std::str::from_utf8(body) {
                Ok(text) => self.line(format_args!("> {}", text)),
                Err(_) => self.line(format_args!("> [Binary data ({} bytes)]", body.len())),
            }
        }
        self.line(format_args!(">"));
    }

    pub fn response(&mut self, response: &RawResponse) {
        if !self.is_enabled() {
            return;
        }
        self.line(format_args!("< {}", response.status_line));
        for (name, value) in response.headers.as_title_case() {
            self.line(format_args!("< {}: {}", name, value));
        }
        self.line(format_args!("<"));
    }

    pub fn redirect(&mut self, url: &str, status: u16) {
        self.line(format_args!("* Redirecting to: {} ({})", url, status));
    }

    pub fn flush(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.flush();
        }
    }
}
