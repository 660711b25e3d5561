//! Response body decoding according to `Content-Encoding`.
//!
//! Decoding is attempted once per response, against the fully buffered
//! body. A failed decode never discards data: the undecoded bytes are
//! handed back together with a [`DecodeError`] describing what went wrong.

use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use thiserror::Error;

use crate::status::StatusCode;

/// A failure to decode a response body according to its declared
/// `Content-Encoding`.
///
/// The error is recorded once and returned from every subsequent body
/// accessor of the response it belongs to, so it is `Clone` and carries its
/// cause as text rather than as a source error.
#[derive(Debug, Clone, Error)]
#[error("cannot decode {encoding} body (status={status}): {reason}")]
pub struct DecodeError {
    encoding: String,
    status: StatusCode,
    reason: String,
}

impl DecodeError {
    fn new(encoding: &str, status: StatusCode, reason: impl ToString) -> Self {
        Self {
            encoding: encoding.to_owned(),
            status,
            reason: reason.to_string(),
        }
    }

    /// The `Content-Encoding` token that failed to decode.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The status code of the response whose body failed to decode.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// First encoding token of a `Content-Encoding` value, trimmed and
/// lowercased. Multiple encodings are rare in practice; like the stacks we
/// delegate to, only the first one is honored.
fn first_encoding(value: &str) -> String {
    value
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn read_all(mut reader: impl Read, size_hint: usize) -> std::io::Result<Vec<u8>> {
    let mut decoded = Vec::with_capacity(size_hint);
    reader.read_to_end(&mut decoded)?;
    Ok(decoded)
}

/// Decode `raw` according to the declared `Content-Encoding`.
///
/// Returns the decoded bytes, or on failure the raw bytes unchanged plus
/// the error. Unknown or absent encodings pass through unchanged.
pub(crate) fn decode_body(
    encoding: Option<&str>,
    status: StatusCode,
    raw: Vec<u8>,
) -> (Vec<u8>, Option<DecodeError>) {
    let token = encoding.map(first_encoding).unwrap_or_default();
    match token.as_str() {
        "gzip" => match read_all(GzDecoder::new(&raw[..]), raw.len() * 2) {
            Ok(decoded) => (decoded, None),
            Err(err) => {
                let err = DecodeError::new("gzip", status, err);
                (raw, Some(err))
            }
        },
        // Servers disagree on whether "deflate" means a zlib-wrapped or a
        // raw DEFLATE stream. Try zlib first, then the raw stream.
        "deflate" => match read_all(ZlibDecoder::new(&raw[..]), raw.len() * 2) {
            Ok(decoded) => (decoded, None),
            Err(_) => match read_all(DeflateDecoder::new(&raw[..]), raw.len() * 2) {
                Ok(decoded) => (decoded, None),
                Err(err) => {
                    let err = DecodeError::new("deflate", status, err);
                    (raw, Some(err))
                }
            },
        },
        #[cfg(feature = "brotli")]
        "br" => match read_all(brotli::Decompressor::new(&raw[..], 4096), raw.len() * 2) {
            Ok(decoded) => (decoded, None),
            Err(err) => {
                let err = DecodeError::new("br", status, err);
                (raw, Some(err))
            }
        },
        // Without a wired-in decoder, `br` bodies pass through undecoded.
        _ => (raw, None),
    }
}

/// The memoized outcome of the single body read of a response.
pub(crate) struct CachedBody {
    pub(crate) bytes: Vec<u8>,
    pub(crate) err: Option<BodyError>,
}

/// What went wrong while producing the cached body. Replayed on every
/// accessor call, hence reconstructible.
#[derive(Clone)]
pub(crate) enum BodyError {
    Read {
        kind: std::io::ErrorKind,
        message: String,
    },
    Decode(DecodeError),
}

impl BodyError {
    pub(crate) fn to_error(&self) -> crate::Error {
        match self {
            BodyError::Read { kind, message } => {
                crate::Error::Io(std::io::Error::new(*kind, message.clone()))
            }
            BodyError::Decode(err) => crate::Error::Decode(err.clone()),
        }
    }
}

pub(crate) fn collect_body(
    raw: std::io::Result<Vec<u8>>,
    encoding: Option<String>,
    transport_decompressed: bool,
    status: StatusCode,
) -> CachedBody {
    let raw = match raw {
        Ok(raw) => raw,
        Err(err) => {
            return CachedBody {
                bytes: Vec::new(),
                err: Some(BodyError::Read {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            }
        }
    };
    if transport_decompressed {
        return CachedBody {
            bytes: raw,
            err: None,
        };
    }
    let (bytes, err) = decode_body(encoding.as_deref(), status, raw);
    CachedBody {
        bytes,
        err: err.map(BodyError::Decode),
    }
}
