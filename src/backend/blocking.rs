//! Blocking transport interface.
//!
//! Backend developers implement [`BlockingBackend`] and [`BlockingClient`]
//! along with a [`BlockingResponse`] type. The type-erased `Any*` variants
//! are implemented automatically and exist so the facade can hold any
//! registered backend behind one pointer type.

use std::any::Any;
use std::fmt;
use std::io;
use std::sync::Arc;

use super::{ClientOptions, TransportRequest};
use crate::client::BuildClientResult;

/// Trait for blocking transport backends.
pub trait BlockingBackend: Send + Sync + 'static {
    /// The type of client this backend creates.
    type BlockingClient: BlockingClient;

    /// Creates a new blocking client with the given options.
    fn create_blocking_client(
        &self,
        options: ClientOptions,
    ) -> BuildClientResult<Self::BlockingClient>;
}

/// Trait for blocking transport clients.
pub trait BlockingClient: Send + Sync + 'static {
    /// The type of response returned by this client.
    type Response: BlockingResponse;

    /// Provides a textual description of this client.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockingClient")
    }

    /// Sends a serialized request and returns the response. Blocks the
    /// current thread until the response header is available.
    fn request(&self, req: TransportRequest) -> crate::Result<Self::Response>;
}

/// Trait for blocking transport responses.
///
/// Extends [`io::Read`] for the body stream. The facade reads the body at
/// most once and caches the outcome; implementations never see a second
/// read pass.
pub trait BlockingResponse: io::Read + Send + Sync + 'static {
    /// Provides a textual description of this response.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockingResponse")
    }

    /// Returns the HTTP status code of this response.
    fn status(&self) -> u16;

    /// Returns the content-length of the response body, if known.
    fn content_length(&self) -> Option<u64>;

    /// Gets all values for the specified header. Names compare
    /// case-insensitively.
    fn get_header(&self, header: &str) -> crate::Result<Vec<String>>;

    /// Whether the native HTTP stack already decompressed the body. When
    /// `true`, the facade serves the body as-is regardless of the declared
    /// `Content-Encoding`.
    fn transport_decompressed(&self) -> bool {
        false
    }
}

/// Trait for type-erased blocking backends.
///
/// Automatically implemented for types implementing [`BlockingBackend`].
pub trait AnyBlockingBackend: Send + Sync + 'static {
    /// Creates a new blocking client with the given options.
    fn create_blocking_client(
        &self,
        options: ClientOptions,
    ) -> BuildClientResult<Arc<dyn AnyBlockingClient>>;
}

/// Trait for type-erased blocking clients.
///
/// Automatically implemented for types implementing [`BlockingClient`].
pub trait AnyBlockingClient: Any + Send + Sync + 'static {
    /// Provides a textual description of this client.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Sends a serialized request and returns the response.
    fn request(&self, req: TransportRequest) -> crate::Result<Box<dyn AnyBlockingResponse>>;
}

/// Trait for type-erased blocking responses.
///
/// Automatically implemented for types implementing [`BlockingResponse`].
pub trait AnyBlockingResponse: io::Read + Any + Send + Sync + 'static {
    /// Provides a textual description of this response.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Returns the HTTP status code of this response.
    fn status(&self) -> u16;
    /// Returns the content-length of the response body, if known.
    fn content_length(&self) -> Option<u64>;
    /// Gets all values for the specified header.
    fn get_header(&self, header: &str) -> crate::Result<Vec<String>>;
    /// Whether the native HTTP stack already decompressed the body.
    fn transport_decompressed(&self) -> bool;
}

impl<B> AnyBlockingBackend for B
where
    B: BlockingBackend,
{
    fn create_blocking_client(
        &self,
        options: ClientOptions,
    ) -> BuildClientResult<Arc<dyn AnyBlockingClient>> {
        Ok(Arc::new(BlockingBackend::create_blocking_client(
            self, options,
        )?))
    }
}

impl<C> AnyBlockingClient for C
where
    C: BlockingClient,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        BlockingClient::describe(self, f)
    }

    fn request(&self, req: TransportRequest) -> crate::Result<Box<dyn AnyBlockingResponse>> {
        Ok(Box::new(BlockingClient::request(self, req)?))
    }
}

impl<R> AnyBlockingResponse for R
where
    R: BlockingResponse,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        BlockingResponse::describe(self, f)
    }

    fn status(&self) -> u16 {
        BlockingResponse::status(self)
    }

    fn content_length(&self) -> Option<u64> {
        BlockingResponse::content_length(self)
    }

    fn get_header(&self, header: &str) -> crate::Result<Vec<String>> {
        BlockingResponse::get_header(self, header)
    }

    fn transport_decompressed(&self) -> bool {
        BlockingResponse::transport_decompressed(self)
    }
}
