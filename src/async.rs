//! `async` client support.
//!
//! The async clients are runtime-agnostic: the futures they return are
//! `Send` and need no particular executor. Under the hood, a backend may
//! manage threads or an event loop of its own.

use std::borrow::Cow;

use futures_io::AsyncRead;

pub(crate) mod client;
mod response;

use crate::body::private::IntoStream;

/// Trait for async body streams.
pub trait BodyStream: AsyncRead + Send + Unpin + 'static {}

impl<S: AsyncRead + Send + Unpin + 'static + ?Sized> BodyStream for S {}

/// Type alias for boxed async body streams.
pub type BoxedStream = Box<dyn BodyStream>;

/// The request body type for async requests.
pub type Body = crate::body::Body<BoxedStream>;
/// The request type for async requests.
pub type Request = crate::request::Request<BoxedStream>;
/// The multipart form part type for async requests.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub type Part = crate::body::Part<BoxedStream>;
/// The multipart form part body type for async requests.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub type PartBody = crate::body::PartBody<BoxedStream>;

pub use client::AsyncClient;
pub use response::Response;

impl<S: AsyncRead + Send + Unpin + 'static> IntoStream<BoxedStream> for S {
    fn into_stream(self) -> BoxedStream {
        Box::new(self)
    }
}

/// Shortcut method to quickly make a `GET` request through the
/// process-wide default client.
///
/// See also the methods on the [`Response`] type.
///
/// # Panics
///
/// Panics if no transport backend has been registered.
pub async fn get(url: impl Into<Cow<'static, str>>) -> crate::Result<Response> {
    Request::get(url).send().await
}

impl Request {
    /// Execute this request through the process-wide default client. The
    /// default client is built from default [`crate::ClientBuilder`]
    /// options on first use and reused afterwards.
    ///
    /// # Panics
    ///
    /// Panics if no transport backend has been registered.
    pub async fn send(self) -> crate::Result<Response> {
        client::default_client().await?.request(self).await
    }
}
