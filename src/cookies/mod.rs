//! Cookie storage.
//!
//! - **Storage**: in-memory jar keyed by domain ([`CookieJar`](jar::CookieJar))
//! - **Persistence**: tab-separated flat file, rewritten on every mutation
//!   ([`persistence`])
//!
//! # Example
//!
//! ```rust,no_run
//! use curlnet::cookies::jar::CookieJar;
//!
//! let jar = CookieJar::load("cookies.txt");
//! jar.store(["sid=abc; Domain=.example.com"], "www.example.com");
//! assert_eq!(jar.cookies_for("www.example.com", "/"), "sid=abc");
//! ```
//!
//! Matching is a plain host suffix test. There is no public suffix check, no
//! path scoping and no expiry.

pub mod jar;
pub mod persistence;

pub use jar::CookieJar;
