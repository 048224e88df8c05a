//! CLI entry point for curlnet.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use curlnet::{make_request, CookieJar, HttpResponse, URLRequest};
use tracing::{debug, warn};

mod cli;

use cli::{Args, HttpMethod};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let jar = Arc::new(CookieJar::load(&args.cookie_jar));

    let mut request = URLRequest::new(args.method.as_method(), args.url.clone());
    match (args.method, args.data.as_ref()) {
        (HttpMethod::Post, None) => warn!("POST request specified without -d/--data"),
        (HttpMethod::Get, Some(_)) => warn!("data (-d/--data) is ignored for GET requests"),
        (HttpMethod::Post, Some(data)) => request.body = Some(data.clone()),
        (HttpMethod::Get, None) => {}
    }
    request.extra_headers = args.headers.clone();
    request.allow_redirects = args.follow_redirects();
    request.max_redirects = args.max_redirs;
    request.verbose = args.verbose;

    let Some(response) = make_request(jar, request).await else {
        return ExitCode::FAILURE;
    };

    let rendered = render_body(&response);
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", rendered).and_then(|_| stdout.flush()) {
        warn!(error = %e, "failed to write response body");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Charset named in a `Content-Type` value, defaulting to UTF-8.
fn charset_of(content_type: &str) -> String {
    content_type
        .rsplit_once("charset=")
        .map(|(_, rest)| rest.split(';').next().unwrap_or("").trim())
        .filter(|c| !c.is_empty())
        .unwrap_or("utf-8")
        .trim_matches('"')
        .to_ascii_lowercase()
}

/// Decode bytes in the given charset, replacing invalid sequences.
/// `None` if the charset is not one we know.
fn decode_text(body: &[u8], charset: &str) -> Option<String> {
    match charset {
        "utf-8" | "utf8" => Some(String::from_utf8_lossy(body).into_owned()),
        "us-ascii" | "ascii" => Some(
            body.iter()
                .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
                .collect(),
        ),
        "iso-8859-1" | "latin1" | "latin-1" => Some(body.iter().map(|&b| b as char).collect()),
        _ => None,
    }
}

/// Body as it should appear on stdout: pretty JSON, decoded text, or a
/// byte-string representation when the charset is unknown.
fn render_body(response: &HttpResponse) -> String {
    let content_type = response.headers().get("content-type").unwrap_or("");
    let charset = charset_of(content_type);
    let body = response.body();

    let Some(text) = decode_text(body, &charset) else {
        warn!(charset = %charset, "unknown encoding, printing raw bytes representation");
        return format!("{:?}", body);
    };

    if content_type.contains("application/json") {
        match serde_json::from_str::<serde_json::Value>(&text)
            .and_then(|value| serde_json::to_string_pretty(&value))
        {
            Ok(pretty) => return pretty,
            Err(e) => warn!(error = %e, "failed to parse JSON, printing raw text"),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_of() {
        assert_eq!(charset_of("text/html; charset=ISO-8859-1"), "iso-8859-1");
        assert_eq!(charset_of("text/html; charset=\"utf-8\"; x=y"), "utf-8");
        assert_eq!(charset_of("text/plain"), "utf-8");
        assert_eq!(charset_of(""), "utf-8");
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"caf\xe9", "iso-8859-1").as_deref(), Some("caf\u{e9}"));
        assert_eq!(decode_text(b"ok\xff", "utf-8").as_deref(), Some("ok\u{FFFD}"));
        assert!(decode_text(b"x", "shift_jis").is_none());
    }
}
