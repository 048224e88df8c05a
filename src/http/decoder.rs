//! Content-Encoding decoding.
//!
//! Supports `gzip` and `deflate`. Decoding never fails the request: when the
//! body cannot be decompressed the original bytes are returned together with
//! a [`NetError::ContentDecodingFailed`] warning.

use crate::base::neterror::NetError;
use crate::http::headers::ResponseHeaders;
use bytes::Bytes;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use std::io::{self, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
    Deflate,
    Identity,
}

impl ContentEncoding {
    /// Exact match on `gzip` / `deflate`; anything else is passed through.
    pub fn from_headers(headers: &ResponseHeaders) -> Self {
        match headers.get("content-encoding") {
            Some("gzip") => ContentEncoding::Gzip,
            Some("deflate") => ContentEncoding::Deflate,
            _ => ContentEncoding::Identity,
        }
    }
}

/// Result of decoding a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub body: Bytes,
    /// Set when decompression failed and `body` is the raw input.
    pub warning: Option<NetError>,
}

impl DecodedBody {
    fn decoded(body: Vec<u8>) -> Self {
        Self {
            body: Bytes::from(body),
            warning: None,
        }
    }

    fn passthrough(body: Bytes) -> Self {
        Self {
            body,
            warning: None,
        }
    }

    fn fallback(body: Bytes) -> Self {
        Self {
            body,
            warning: Some(NetError::ContentDecodingFailed),
        }
    }
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// Reverse the response's content encoding.
pub fn decode_body(headers: &ResponseHeaders, body: Bytes) -> DecodedBody {
    match ContentEncoding::from_headers(headers) {
        ContentEncoding::Identity => DecodedBody::passthrough(body),
        ContentEncoding::Gzip => match read_all(GzDecoder::new(&body[..])) {
            Ok(decoded) => DecodedBody::decoded(decoded),
            Err(e) => {
                tracing::warn!(error = %e, "error decompressing gzip content, falling back to raw content");
                DecodedBody::fallback(body)
            }
        },
        ContentEncoding::Deflate => {
            // zlib-wrapped first, then raw DEFLATE.
            let zlib_err = match read_all(ZlibDecoder::new(&body[..])) {
                Ok(decoded) => return DecodedBody::decoded(decoded),
                Err(e) => e,
            };
            match read_all(DeflateDecoder::new(&body[..])) {
                Ok(decoded) => DecodedBody::decoded(decoded),
                Err(raw_err) => {
                    tracing::warn!(
                        zlib_error = %zlib_err,
                        raw_error = %raw_err,
                        "error decompressing deflate content, falling back to raw content"
                    );
                    DecodedBody::fallback(body)
                }
            }
        }
    }
}
