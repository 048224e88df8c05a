use thiserror::Error;

/// Network error codes.
///
/// Names and numeric codes follow Chromium's `net_error_list.h` where an
/// equivalent exists. Errors outside that list use codes from -900 down.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Connection timed out")]
    ConnectionTimedOut,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Invalid redirect")]
    InvalidRedirect,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Content decoding failed")]
    ContentDecodingFailed,

    // Errors with no Chromium counterpart
    #[error("Redirect response without Location header")]
    RedirectWithoutLocation,
    #[error("Cookie file {path}: {message}")]
    CookieFile { path: String, message: String },
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::SslProtocolError => -107,
            NetError::ConnectionTimedOut => -118,
            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::InvalidRedirect => -303,
            NetError::TooManyRedirects => -310,
            NetError::InvalidResponse => -320,
            NetError::EmptyResponse => -324,
            NetError::ContentDecodingFailed => -330,
            NetError::RedirectWithoutLocation => -900,
            NetError::CookieFile { .. } => -901,
            NetError::Unexpected { .. } => -902,
            NetError::Unknown(code) => *code,
        }
    }

    /// Create an unexpected-failure error carrying diagnostic detail.
    pub fn unexpected(message: impl Into<String>) -> Self {
        NetError::Unexpected {
            message: message.into(),
        }
    }

    /// Create a cookie file I/O error.
    pub fn cookie_file(path: impl Into<String>, message: impl Into<String>) -> Self {
        NetError::CookieFile {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -100 => NetError::ConnectionClosed,
            -101 => NetError::ConnectionReset,
            -102 => NetError::ConnectionRefused,
            -103 => NetError::ConnectionAborted,
            -104 => NetError::ConnectionFailed,
            -105 => NetError::NameNotResolved,
            -107 => NetError::SslProtocolError,
            -118 => NetError::ConnectionTimedOut,
            -300 => NetError::InvalidUrl,
            -302 => NetError::UnknownUrlScheme,
            -303 => NetError::InvalidRedirect,
            -310 => NetError::TooManyRedirects,
            -320 => NetError::InvalidResponse,
            -324 => NetError::EmptyResponse,
            -330 => NetError::ContentDecodingFailed,
            -900 => NetError::RedirectWithoutLocation,
            _ => NetError::Unknown(code),
        }
    }
}
