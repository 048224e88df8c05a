//! Socket and connection management.
//!
//! One connection per hop, never reused:
//! - [`connectjob`]: DNS → TCP → TLS connection flow under a connect timeout
//! - [`client`]: the connected socket, request write and read-until-close
//! - [`tls`]: TLS configuration with BoringSSL

pub mod client;
pub mod connectjob;
pub mod tls;
