use http::Method;

/// Default redirect ceiling.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Everything the caller decides about one logical request.
///
/// Read-only to the engine: redirect rewrites of method, body and URL live in
/// the job, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct URLRequest {
    pub method: Method,
    pub url: String,
    /// Form data. Sent only for POST, UTF-8 encoded.
    pub body: Option<String>,
    /// Raw `Name: Value` lines appended to every hop verbatim.
    pub extra_headers: Vec<String>,
    pub allow_redirects: bool,
    pub max_redirects: usize,
    pub verbose: bool,
}

impl URLRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            extra_headers: Vec::new(),
            allow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            verbose: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new(Method::POST, url)
        }
    }

    pub fn add_header(&mut self, line: impl Into<String>) {
        self.extra_headers.push(line.into());
    }
}
