//! Async transport interface.
//!
//! The async counterpart of the blocking interface: backends implement
//! [`AsyncBackend`], [`AsyncClient`] and an [`AsyncResponse`] type. The
//! type-erased `Any*` variants box the returned futures so the facade can
//! hold any registered backend behind one pointer type; the futures are
//! `Send` and require no particular async runtime.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use futures_io::AsyncRead;

use super::{ClientOptions, TransportRequest};
use crate::client::BuildClientResult;

/// Trait for async transport backends.
pub trait AsyncBackend: Send + Sync + 'static {
    /// The type of client this backend creates.
    type AsyncClient: AsyncClient;

    /// Creates a new async client with the given options.
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> impl Future<Output = BuildClientResult<Self::AsyncClient>> + Send;
}

/// Trait for async transport clients.
pub trait AsyncClient: Send + Sync + 'static {
    /// The type of response returned by this client.
    type Response: AsyncResponse;

    /// Provides a textual description of this client.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncClient")
    }

    /// Sends a serialized request and resolves to the response.
    fn request(
        &self,
        req: TransportRequest,
    ) -> impl Future<Output = crate::Result<Self::Response>> + Send;
}

/// Trait for async transport responses.
///
/// Extends [`AsyncRead`] for the body stream; implementations must be
/// `Unpin` since the facade reads them through a boxed reference. The
/// facade reads the body at most once and caches the outcome.
pub trait AsyncResponse: AsyncRead + Unpin + Send + Sync + 'static {
    /// Provides a textual description of this response.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncResponse")
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

/// Trait for type-erased async backends.
///
/// Automatically implemented for types implementing [`AsyncBackend`].
pub trait AnyAsyncBackend: Send + Sync + 'static {
    /// Creates a new async client with the given options.
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> BoxFuture<'_, BuildClientResult<Arc<dyn AnyAsyncClient>>>;
}

/// Trait for type-erased async clients.
///
/// Automatically implemented for types implementing [`AsyncClient`].
pub trait AnyAsyncClient: Any + Send + Sync + 'static {
    /// Provides a textual description of this client.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Sends a serialized request and resolves to the response.
    fn request(
        &self,
        req: TransportRequest,
    ) -> BoxFuture<'_, crate::Result<Box<dyn AnyAsyncResponse>>>;
}

/// Trait for type-erased async responses.
///
/// Automatically implemented for types implementing [`AsyncResponse`].
pub trait AnyAsyncResponse: AsyncRead + Unpin + Any + Send + Sync + 'static {
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

impl<B> AnyAsyncBackend for B
where
    B: AsyncBackend,
{
    fn create_async_client(
        &self,
        options: ClientOptions,
    ) -> BoxFuture<'_, BuildClientResult<Arc<dyn AnyAsyncClient>>> {
        Box::pin(async {
            AsyncBackend::create_async_client(self, options)
                .await
                .map(|client| Arc::new(client) as Arc<dyn AnyAsyncClient>)
        })
    }
}

impl<C> AnyAsyncClient for C
where
    C: AsyncClient,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AsyncClient::describe(self, f)
    }

    fn request(
        &self,
        req: TransportRequest,
    ) -> BoxFuture<'_, crate::Result<Box<dyn AnyAsyncResponse>>> {
        Box::pin(async {
            AsyncClient::request(self, req)
                .await
                .map(|res| Box::new(res) as Box<dyn AnyAsyncResponse>)
        })
    }
}

impl<R> AnyAsyncResponse for R
where
    R: AsyncResponse,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AsyncResponse::describe(self, f)
    }

    fn status(&self) -> u16 {
        AsyncResponse::status(self)
    }

    fn content_length(&self) -> Option<u64> {
        AsyncResponse::content_length(self)
    }

    fn get_header(&self, header: &str) -> crate::Result<Vec<String>> {
        AsyncResponse::get_header(self, header)
    }

    fn transport_decompressed(&self) -> bool {
        AsyncResponse::transport_decompressed(self)
    }
}
