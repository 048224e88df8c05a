//! HTTP Client with builder pattern.
//!
//! # Example
//!
//! ```rust,ignore
//! use curlnet::Client;
//! use curlnet::cookies::CookieJar;
//! use std::sync::Arc;
//!
//! let client = Client::builder()
//!     .cookie_jar(Arc::new(CookieJar::load("cookies.txt")))
//!     .build();
//!
//! let resp = client.post("http://example.com/login")
//!     .body("user=me&pass=secret")
//!     .send()
//!     .await?;
//! println!("{}", resp.status_line());
//! ```

use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::requestbuilder::DEFAULT_USER_AGENT;
use crate::http::response::HttpResponse;
use crate::socket::connectjob::{ConnectOptions, DEFAULT_CONNECT_TIMEOUT};
use crate::urlrequest::job::URLRequestHttpJob;
use crate::urlrequest::request::{URLRequest, DEFAULT_MAX_REDIRECTS};
use crate::urlrequest::trace::Tracer;
use http::Method;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// HTTP Client for making requests.
///
/// Use [`Client::builder()`] to configure and create a client. Cloning is
/// cheap and clones share the cookie jar.
#[derive(Clone, Debug)]
pub struct Client {
    cookie_jar: Arc<CookieJar>,
    options: ConnectOptions,
    user_agent: String,
    max_redirects: usize,
    follow_redirects: bool,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a new client with default settings and an in-memory jar.
    pub fn new() -> Self {
        ClientBuilder::default().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn cookie_jar(&self) -> &Arc<CookieJar> {
        &self.cookie_jar
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        let mut request = URLRequest::new(method, url.as_ref());
        request.allow_redirects = self.follow_redirects;
        request.max_redirects = self.max_redirects;
        RequestBuilder {
            client: self.clone(),
            request,
            tracer: None,
        }
    }

    /// Run a fully described request.
    pub async fn execute(&self, request: URLRequest) -> Result<HttpResponse, NetError> {
        self.execute_with_tracer(request, None).await
    }

    async fn execute_with_tracer(
        &self,
        request: URLRequest,
        tracer: Option<Tracer>,
    ) -> Result<HttpResponse, NetError> {
        let mut job = URLRequestHttpJob::new(request, self.cookie_jar.clone());
        job.set_connect_options(self.options.clone());
        job.set_user_agent(self.user_agent.clone());
        if let Some(tracer) = tracer {
            job.set_tracer(tracer);
        }
        job.start().await
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    cookie_jar: Option<Arc<CookieJar>>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    user_agent: Option<String>,
    max_redirects: Option<usize>,
    follow_redirects: Option<bool>,
}

impl ClientBuilder {
    /// Set the cookie jar. Defaults to an in-memory jar with no file.
    pub fn cookie_jar(mut self, jar: Arc<CookieJar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Bound on DNS + connect + TLS handshake. Defaults to 10 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Bound on each read of the response. Unbounded by default.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Default redirect ceiling for requests from this client.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Whether requests follow redirects unless told otherwise.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let options = ConnectOptions {
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: self.read_timeout,
            ..ConnectOptions::default()
        };

        Client {
            cookie_jar: self.cookie_jar.unwrap_or_default(),
            options,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            max_redirects: self.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS),
            follow_redirects: self.follow_redirects.unwrap_or(true),
        }
    }
}

/// Builder for a single request.
pub struct RequestBuilder {
    client: Client,
    request: URLRequest,
    tracer: Option<Tracer>,
}

impl RequestBuilder {
    /// Set form data. Only POST sends it.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Append a raw `Name: Value` header line.
    pub fn header_line(mut self, line: impl Into<String>) -> Self {
        self.request.add_header(line);
        self
    }

    pub fn allow_redirects(mut self, allow: bool) -> Self {
        self.request.allow_redirects = allow;
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.request.max_redirects = max;
        self
    }

    /// Echo the exchange to stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.request.verbose = verbose;
        self
    }

    /// Echo the exchange to `writer` instead of stderr.
    pub fn trace_to<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.request.verbose = true;
        self.tracer = Some(Tracer::to_writer(writer));
        self
    }

    /// The request as described so far.
    pub fn as_request(&self) -> &URLRequest {
        &self.request
    }

    /// Send the request.
    pub async fn send(self) -> Result<HttpResponse, NetError> {
        self.client
            .execute_with_tracer(self.request, self.tracer)
            .await
    }
}

/// Run one request and report failures on the diagnostic stream.
///
/// Returns `None` on any terminal failure (invalid URL, timeout, DNS,
/// refused connection, TLS, malformed response, too many redirects). The
/// error itself has already been logged.
pub async fn make_request(jar: Arc<CookieJar>, request: URLRequest) -> Option<HttpResponse> {
    let url = request.url.clone();
    let client = Client::builder().cookie_jar(jar).build();
    match client.execute(request).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::error!(url = %url, code = e.as_i32(), "{}", e);
            None
        }
    }
}
