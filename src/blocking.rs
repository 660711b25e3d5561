//! Blocking client support.
//!
//! The blocking client will block the current thread to execute.

use std::borrow::Cow;
use std::io::Read;

pub(crate) mod client;
mod response;

use crate::body::private::IntoStream;

/// Trait for blocking body streams.
pub trait BodyStream: Read + Send + 'static {}

impl<S: Read + Send + 'static + ?Sized> BodyStream for S {}

/// Type alias for boxed blocking body streams.
pub type BoxedStream = Box<dyn BodyStream>;

/// The request body type for blocking requests.
pub type Body = crate::body::Body<BoxedStream>;
/// The request type for blocking requests.
pub type Request = crate::request::Request<BoxedStream>;
/// The multipart form part type for blocking requests.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub type Part = crate::body::Part<BoxedStream>;
/// The multipart form part body type for blocking requests.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub type PartBody = crate::body::PartBody<BoxedStream>;

pub use client::BlockingClient;
pub use response::Response;

impl<S: Read + Send + 'static> IntoStream<BoxedStream> for S {
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
pub fn get(url: impl Into<Cow<'static, str>>) -> crate::Result<Response> {
    Request::get(url).send()
}

impl Request {
    /// Execute this request through the process-wide default client. The
    /// default client is built from default [`crate::ClientBuilder`]
    /// options on first use and reused afterwards.
    ///
    /// # Panics
    ///
    /// Panics if no transport backend has been registered.
    pub fn send(self) -> crate::Result<Response> {
        client::default_client()?.request(self)
    }

    /// Attach a file part read from the file at `path`.
    ///
    /// The file is opened immediately; its name becomes the part's file
    /// name.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn with_file(
        self,
        field: impl Into<Cow<'static, str>>,
        path: impl AsRef<std::path::Path>,
    ) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let filename: Cow<'static, str> = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
            .into();
        Ok(self.with_file_reader(field, filename, file))
    }
}
