//! Interface between the fletch facade and transport backends.
//!
//! fletch does not ship a transport of its own: connection handling, TLS,
//! proxying, redirects, cookies and timeout enforcement all belong to a
//! backend registered through [`register_backend`]. The facade serializes
//! each request down to a flat [`TransportRequest`] (method token, final
//! URL, header pairs and optional body bytes), so a backend only needs to
//! put that on the wire and hand back response metadata plus a body
//! stream.
//!
//! Backends that advertise compression support should send an
//! `Accept-Encoding` header themselves; the facade decodes response bodies
//! based on the declared `Content-Encoding`, unless the backend reports
//! that its native stack already did (see `transport_decompressed`).
//!
//! ## Implementing a backend
//!
//! Implement [`BlockingBackend`] and/or [`AsyncBackend`] (together with
//! their client and response traits) and call [`register_backend`] once at
//! startup. The type-erased `Any*` traits are implemented automatically.

use std::borrow::Cow;

use crate::request::Method;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
mod options;
pub(crate) mod register;

#[cfg(feature = "async")]
pub use r#async::{AnyAsyncBackend, AnyAsyncClient, AnyAsyncResponse};
#[cfg(feature = "async")]
pub use r#async::{AsyncBackend, AsyncClient, AsyncResponse};
#[cfg(feature = "blocking")]
pub use blocking::{AnyBlockingBackend, AnyBlockingClient, AnyBlockingResponse};
#[cfg(feature = "blocking")]
pub use blocking::{BlockingBackend, BlockingClient, BlockingResponse};
pub use options::ClientOptions;
pub use register::register_backend;

/// A fully serialized request, ready for the wire.
///
/// Produced by the facade: the URL is already resolved against the
/// client's base URL and carries the encoded query string, the headers
/// already include client defaults and the body's `Content-Type`, and the
/// body is a single buffer.
pub struct TransportRequest {
    /// The request method.
    pub method: Method,
    /// The absolute request URL.
    pub url: String,
    /// Header name/value pairs, in send order.
    pub headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    /// The serialized request body, if any.
    pub body: Option<Cow<'static, [u8]>>,
}
