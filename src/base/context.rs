//! Ergonomic error context helpers.
//!
//! Provides extension traits for converting IO errors into `NetError`
//! variants while logging the host and port they happened on.

use crate::base::neterror::NetError;
use std::io::{self, ErrorKind};

/// Classify an IO error from a connected (or connecting) socket.
pub fn classify_io_error(err: &io::Error) -> NetError {
    match err.kind() {
        ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
        ErrorKind::ConnectionReset => NetError::ConnectionReset,
        ErrorKind::ConnectionAborted => NetError::ConnectionAborted,
        ErrorKind::TimedOut => NetError::ConnectionTimedOut,
        ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof => NetError::ConnectionClosed,
        ErrorKind::NotConnected | ErrorKind::AddrNotAvailable | ErrorKind::AddrInUse => {
            NetError::ConnectionFailed
        }
        _ => NetError::unexpected(err.to_string()),
    }
}

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add connection context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use curlnet::base::context::IoResultExt;
    ///
    /// let stream = TcpStream::connect(addr).await
    ///     .connection_context("example.com", 443)?;
    /// ```
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// Add DNS resolution context to an IO error.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| {
            let err = classify_io_error(&e);
            tracing::debug!(host = %host, port, error = %e, "socket operation failed");
            err
        })
    }

    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
            NetError::NameNotResolved
        })
    }
}
