//! A fluent HTTP request builder and response wrapper.
//!
//! ## Overview
//!
//! fletch builds HTTP requests through chained configuration calls:
//! method, URL, query parameters, headers, and a JSON, urlencoded-form,
//! multipart or raw body. Requests execute through a pluggable transport,
//! and responses read back as bytes, text or JSON with automatic
//! decompression of `gzip` and `deflate` bodies.
//!
//! fletch itself carries no transport. Connection handling, TLS, proxies,
//! redirects, cookies and timeout enforcement belong to a backend
//! registered through [`backend::register_backend`]; the crate serializes
//! requests, hands them over, and wraps what comes back. See the
//! [`backend`] module for the interface a transport implements.
//!
//! ## Usage
//!
//! Assuming a backend has been registered, a simple GET request:
//!
//! ```no_run
//! # fn run() -> fletch::Result<()> {
//! let body = fletch::blocking::get("https://example.com")?.text()?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! Requests accumulate configuration fluently and execute through a
//! client, or through `send()` which uses a process-wide default client:
//!
//! ```no_run
//! use fletch::{body_form, ClientBuilder, Request};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::default()
//!     .base_url("http://httpbin.org")
//!     .build_async()
//!     .await?;
//! let response = client
//!     .request(Request::post("post").with_body(body_form! {
//!         "key1" => "value1",
//!         "key2" => "value2",
//!     }))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! For blocking requests, change `r#async` types to `blocking` ones and
//! remove the `.await`s.
//!
//! ## Response bodies
//!
//! A response body is read from the transport exactly once, decoded
//! according to its declared `Content-Encoding`, and cached: `gzip` and
//! `deflate` (zlib-wrapped or raw) are decompressed, `br` passes through
//! unless the `brotli` feature wires in a decoder, anything else passes
//! through unchanged. When decoding fails, the undecoded bytes stay
//! available and the recorded error is returned from every read.
//!
//! ## Features
//!
//! - `blocking`: Enable blocking clients. The registered backend must
//!   implement the blocking interface to compile.
//! - `async`: Enable async clients. The registered backend must implement
//!   the async interface to compile.
//! - `multipart`: Enable `multipart/form-data` bodies.
//! - `json`: Enable JSON request/response shorthand methods.
//! - `brotli`: Decode `br` response bodies instead of passing them
//!   through.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod body;
mod encoding;
mod error;
mod request;
#[cfg(any(feature = "blocking", feature = "async"))]
mod serialize;
mod status;
mod url;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
pub mod backend;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
pub mod client;
pub mod header;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use r#async::AsyncClient;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub use blocking::BlockingClient;
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use body::{Part, PartBody};
#[doc(inline)]
pub use client::ClientBuilder;
pub use encoding::DecodeError;
pub use error::{Error, Result};
pub use request::{Method, Request};
pub use status::StatusCode;

#[doc(hidden)]
pub mod __private {
    pub use crate::body::Body;
}
