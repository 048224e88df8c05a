//! CLI argument definitions using clap derive macros.

use clap::{Parser, ValueEnum};
use curlnet::cookies::persistence::DEFAULT_COOKIE_FILE;
use curlnet::urlrequest::request::DEFAULT_MAX_REDIRECTS;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_method(self) -> http::Method {
        match self {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
        }
    }
}

/// Send one HTTP request and print the response body.
///
/// Cookies set by servers are kept in a tab-separated file and sent back on
/// later requests to matching hosts.
#[derive(Parser, Debug)]
#[command(name = "curlnet")]
#[command(author, version, about)]
pub struct Args {
    /// URL to request. `http://` is assumed when no scheme is given.
    pub url: String,

    /// Request method
    #[arg(short = 'X', long = "request", value_enum, ignore_case = true, default_value = "GET")]
    pub method: HttpMethod,

    /// Form data for POST requests
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Follow redirects (the default)
    #[arg(short = 'L', long, overrides_with = "no_location")]
    pub location: bool,

    /// Do not follow redirects
    #[arg(long)]
    pub no_location: bool,

    /// Maximum number of redirects to follow
    #[arg(long = "max-redirs", default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirs: usize,

    /// Print the request and response headers to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra header line, e.g. "Accept: text/html" (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Cookie jar file
    #[arg(short = 'b', long = "cookie-jar", default_value = DEFAULT_COOKIE_FILE)]
    pub cookie_jar: PathBuf,
}

impl Args {
    pub fn follow_redirects(&self) -> bool {
        !self.no_location || self.location
    }
}
