use crate::base::context::{classify_io_error, IoResultExt};
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::socket::tls::TlsConfig;
use crate::urlrequest::parsedurl::ParsedUrl;
use std::time::Duration;
use tokio::net::TcpStream;

/// Default bound on DNS + TCP connect + TLS handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport settings for one connection.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub connect_timeout: Duration,
    /// Per-read limit while receiving the response. `None` waits forever.
    pub read_timeout: Option<Duration>,
    pub tls: TlsConfig,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: None,
            tls: TlsConfig::default(),
        }
    }
}

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    /// Open a fresh connection to `url`, wrapped in TLS for `https`.
    pub async fn connect(url: &ParsedUrl, options: &ConnectOptions) -> Result<SocketType, NetError> {
        match tokio::time::timeout(options.connect_timeout, Self::do_connect(url, options)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(
                    host = %url.host,
                    port = url.port,
                    timeout = ?options.connect_timeout,
                    "connect timed out"
                );
                Err(NetError::ConnectionTimedOut)
            }
        }
    }

    async fn do_connect(url: &ParsedUrl, options: &ConnectOptions) -> Result<SocketType, NetError> {
        let host = url.host.as_str();
        let port = url.port;

        // 1. DNS Resolution
        let addrs: Vec<_> = tokio::net::lookup_host((host, port))
            .await
            .dns_context(host)?
            .collect();
        if addrs.is_empty() {
            return Err(NetError::NameNotResolved);
        }

        // 2. TCP Connect, first address that answers wins
        let mut last_err = NetError::ConnectionFailed;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "TCP connect attempt failed");
                    last_err = classify_io_error(&e);
                }
            }
        }
        let stream = stream.ok_or(last_err)?;
        stream.set_nodelay(true).connection_context(host, port)?;

        // 3. SSL Handshake (if https)
        if url.is_secure() {
            let config = options.tls.configure_for(host)?;
            let tls_stream = tokio_boring::connect(config, host, stream).await.map_err(|e| {
                tracing::debug!(host = %host, port, error = ?e, "SSL handshake failed");
                NetError::SslProtocolError
            })?;
            Ok(SocketType::Ssl(tls_stream))
        } else {
            Ok(SocketType::Tcp(stream))
        }
    }
}
