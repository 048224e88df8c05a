use crate::base::loadstate::LoadState;
use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::decoder::decode_body;
use crate::http::parser::{parse_response, RawResponse};
use crate::http::redirect::{resolve_redirect, RedirectDecision};
use crate::http::requestbuilder::{RequestBuilder, DEFAULT_USER_AGENT};
use crate::http::response::HttpResponse;
use crate::socket::connectjob::{ConnectJob, ConnectOptions};
use crate::urlrequest::parsedurl::ParsedUrl;
use crate::urlrequest::request::URLRequest;
use crate::urlrequest::trace::Tracer;
use http::Method;
use std::sync::Arc;

/// Drives one logical request through its hops.
///
/// Each hop is a fresh connection: connect, send, read until close, parse.
/// After every hop `Set-Cookie` headers go to the jar, the body is decoded,
/// and a redirect either starts the next hop or the response is returned.
/// At most `max_redirects + 1` hops are made.
pub struct URLRequestHttpJob {
    request: URLRequest,
    cookie_jar: Arc<CookieJar>,
    options: ConnectOptions,
    user_agent: String,
    tracer: Tracer,
    state: LoadState,
    current_url: String,
    method: Method,
    body: Option<String>,
    redirect_count: usize,
    hops: usize,
    warnings: Vec<NetError>,
}

impl URLRequestHttpJob {
    pub fn new(request: URLRequest, cookie_jar: Arc<CookieJar>) -> Self {
        let tracer = if request.verbose {
            Tracer::stderr()
        } else {
            Tracer::disabled()
        };
        Self {
            current_url: request.url.clone(),
            method: request.method.clone(),
            body: request.body.clone(),
            request,
            cookie_jar,
            options: ConnectOptions::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tracer,
            state: LoadState::Idle,
            redirect_count: 0,
            hops: 0,
            warnings: Vec::new(),
        }
    }

    pub fn set_connect_options(&mut self, options: ConnectOptions) {
        self.options = options;
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// Replace the verbose transcript sink.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    /// Get the current load state (for progress reporting).
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn redirect_count(&self) -> usize {
        self.redirect_count
    }

    /// Number of connections made so far.
    pub fn hops(&self) -> usize {
        self.hops
    }

    /// Run the request to completion. A job runs once.
    pub async fn start(&mut self) -> Result<HttpResponse, NetError> {
        if self.state.is_terminal() {
            return Err(NetError::unexpected("request job already finished"));
        }
        let result = self.run().await;
        self.tracer.flush();
        match result {
            Ok(response) => {
                self.state = LoadState::Done;
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(url = %self.current_url, error = %e, "request failed");
                self.state = LoadState::Failed;
                Err(e)
            }
        }
    }

    async fn run(&mut self) -> Result<HttpResponse, NetError> {
        loop {
            if self.redirect_count > self.request.max_redirects {
                tracing::warn!(
                    max_redirects = self.request.max_redirects,
                    "maximum redirects exceeded"
                );
                return Err(NetError::TooManyRedirects);
            }

            let url = ParsedUrl::parse(&self.current_url)?;
            let raw = self.do_hop(&url).await?;

            if !raw.headers.set_cookies().is_empty() {
                self.cookie_jar.store(raw.headers.set_cookies(), &url.host);
            }

            let RawResponse {
                status_line,
                headers,
                body,
            } = raw;

            let decoded = decode_body(&headers, body);
            if let Some(warning) = decoded.warning {
                self.warnings.push(warning);
            }

            let status = crate::http::parser::parse_status_code(&status_line)?;

            if self.request.allow_redirects {
                let decision = resolve_redirect(
                    status,
                    &headers,
                    &url.to_string(),
                    &self.method,
                    self.body.as_deref(),
                )?;
                match decision {
                    RedirectDecision::Follow(info) => {
                        self.state = LoadState::Redirecting;
                        self.tracer.redirect(&info.new_url, info.status);
                        tracing::debug!(
                            from = %url,
                            to = %info.new_url,
                            status,
                            method = %info.new_method,
                            "following redirect"
                        );
                        self.redirect_count += 1;
                        self.current_url = info.new_url;
                        self.method = info.new_method;
                        self.body = info.new_body;
                        continue;
                    }
                    RedirectDecision::MissingLocation => {
                        tracing::warn!(status, "redirect status received without Location header");
                        self.warnings.push(NetError::RedirectWithoutLocation);
                    }
                    RedirectDecision::NotRedirect => {}
                }
            }

            return Ok(HttpResponse::new(
                status_line,
                headers,
                decoded.body,
                url.to_string(),
                self.redirect_count,
                std::mem::take(&mut self.warnings),
            ));
        }
    }

    /// Connect, send, receive, parse. The socket is dropped (closed) before
    /// this returns, on every path.
    async fn do_hop(&mut self, url: &ParsedUrl) -> Result<RawResponse, NetError> {
        self.state = LoadState::Connecting;
        let mut socket = ConnectJob::connect(url, &self.options).await?;
        self.hops += 1;

        self.state = LoadState::SendingRequest;
        let cookies = self.cookie_jar.cookies_for(&url.host, &url.path);
        let wire = RequestBuilder::new(&self.method, url)
            .user_agent(&self.user_agent)
            .cookie_header(&cookies)
            .extra_headers(&self.request.extra_headers)
            .body(self.body.as_deref())
            .build();
        self.tracer.request(&wire);
        socket.send_all(&wire.to_bytes(), &url.host, url.port).await?;

        self.state = LoadState::ReadingResponse;
        let raw = socket
            .read_to_close(self.options.read_timeout, &url.host, url.port)
            .await?;
        drop(socket);

        self.state = LoadState::ParsingResponse;
        let response = parse_response(&raw)?;
        self.tracer.response(&response);
        Ok(response)
    }
}
