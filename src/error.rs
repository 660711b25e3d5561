use thiserror::Error;

use crate::encoding::DecodeError;
use crate::status::StatusCode;

/// The errors produced while executing a request or reading a response.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport does not recognize the input as a valid URL.
    #[error("Invalid URL")]
    InvalidUrl,
    /// An underlying I/O error, from the transport or from reading a body
    /// stream.
    #[error("IO Error")]
    Io(#[from] std::io::Error),
    /// Error occurred while serializing or deserializing JSON.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    #[error("JSON ser/de Error")]
    Json(#[from] serde_json::Error),
    /// The response body could not be decoded according to its declared
    /// `Content-Encoding`. The undecoded bytes remain available through
    /// [`raw_bytes`](crate::blocking::Response::raw_bytes).
    #[error("Response body decoding failed: {0}")]
    Decode(#[from] DecodeError),
    /// The response status code does not indicate success. Produced by
    /// `with_successful_status`.
    #[error("Unsuccessful status code: {0}")]
    NonSuccessfulStatusCode(StatusCode),
    /// The transport received a response body that exceeds the maximum size
    /// limit specified in [`crate::ClientBuilder::max_response_buffer_size`].
    #[error("Response body size exceeds max limit")]
    ResponseTooLarge,
    /// The transport was not able to finish the request within the timeout
    /// specified in [`crate::ClientBuilder::request_timeout`].
    #[error("Request is not finished within timeout")]
    RequestTimeout,
}

/// A `Result` alias where the `Err` case is [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;
