use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const READ_CHUNK: usize = 4096;

/// A connected socket (TCP or SSL).
///
/// Dropping it closes the connection.
#[derive(Debug)]
pub enum SocketType {
    Tcp(tokio::net::TcpStream),
    Ssl(tokio_boring::SslStream<tokio::net::TcpStream>),
}

impl SocketType {
    pub fn is_ssl(&self) -> bool {
        matches!(self, SocketType::Ssl(_))
    }

    /// Write the whole request.
    pub async fn send_all(&mut self, bytes: &[u8], host: &str, port: u16) -> Result<(), NetError> {
        self.write_all(bytes).await.connection_context(host, port)?;
        self.flush().await.connection_context(host, port)
    }

    /// Read until the peer closes the connection.
    ///
    /// With `read_timeout` set, each individual read must complete within it.
    pub async fn read_to_close(
        &mut self,
        read_timeout: Option<Duration>,
        host: &str,
        port: u16,
    ) -> Result<Vec<u8>, NetError> {
        let mut response = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let read = match read_timeout {
                Some(limit) => match tokio::time::timeout(limit, self.read(&mut chunk)).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::debug!(host = %host, port, "read timed out");
                        return Err(NetError::ConnectionTimedOut);
                    }
                },
                None => self.read(&mut chunk).await,
            };

            match read {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&chunk[..n]),
                // Many TLS servers close without close_notify.
                Err(e) if e.kind() == ErrorKind::UnexpectedEof && self.is_ssl() => break,
                Err(e) => return Err::<Vec<u8>, _>(e).connection_context(host, port),
            }
        }

        Ok(response)
    }
}

impl AsyncRead for SocketType {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            SocketType::Tcp(s) => Pin::new(s).poll_read(cx, buf),
            SocketType::Ssl(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for SocketType {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        match self.get_mut() {
            SocketType::Tcp(s) => Pin::new(s).poll_write(cx, buf),
            SocketType::Ssl(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            SocketType::Tcp(s) => Pin::new(s).poll_flush(cx),
            SocketType::Ssl(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            SocketType::Tcp(s) => Pin::new(s).poll_shutdown(cx),
            SocketType::Ssl(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::{TcpListener, TcpStream};

    #[tokio::test]
    async fn test_read_to_close_collects_all_chunks() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let big = vec![b'x'; READ_CHUNK * 3 + 17];
            socket.write_all(&big).await.unwrap();
            // socket dropped: peer sees EOF
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut socket = SocketType::Tcp(stream);
        let data = socket.read_to_close(None, "127.0.0.1", addr.port()).await.unwrap();
        assert_eq!(data.len(), READ_CHUNK * 3 + 17);
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            // Hold the connection open without writing.
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut socket = SocketType::Tcp(stream);
        let err = socket
            .read_to_close(Some(Duration::from_millis(100)), "127.0.0.1", addr.port())
            .await
            .unwrap_err();
        assert_eq!(err, NetError::ConnectionTimedOut);
    }
}
