//! # curlnet
//!
//! A small HTTP/1.1 client engine built directly on sockets.
//!
//! Given a method, URL, optional form body and extra header lines, `curlnet`
//! opens a plain or TLS connection, writes the request by hand, reads until
//! the server closes, parses the response, feeds `Set-Cookie` into a
//! file-backed cookie jar, reverses `gzip`/`deflate` encoding and follows
//! redirects up to a ceiling.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use curlnet::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let response = Client::new()
//!         .get("https://example.com")
//!         .send()
//!         .await
//!         .unwrap();
//!     println!("{}", response.status_line());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes and load states
//! - [`cookies`] - Cookie jar and its flat-file format
//! - [`http`] - Request serialization, response parsing, decoding, redirects
//! - [`socket`] - TCP/TLS connection setup and raw I/O
//! - [`urlrequest`] - URL decomposition, request description and the hop loop
//!
//! ## Limitations
//!
//! No HTTP/2, no connection reuse, no streaming bodies. Cookie matching is a
//! plain host suffix test with no expiry or path scoping.

pub mod base;
pub mod client;
pub mod cookies;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use base::neterror::NetError;
pub use client::{make_request, Client, ClientBuilder, RequestBuilder};
pub use cookies::CookieJar;
pub use http::{HttpResponse, ResponseHeaders};
pub use urlrequest::URLRequest;
