use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use super::{response::Response, Request};
use crate::backend::r#async::{AnyAsyncBackend, AnyAsyncClient};
use crate::backend::register::BACKEND;
use crate::backend::ClientOptions;
use crate::client::{BuildClientError, BuildClientResult, ClientBuilder};
use crate::serialize;

/// An async HTTP client to make requests with.
///
/// # Thread safety
///
/// The client is thread-safe and can be shared between threads; the
/// futures it returns are `Send`.
#[derive(Clone)]
pub struct AsyncClient {
    client: Arc<dyn AnyAsyncClient>,
    options: ClientOptions,
}

impl ClientBuilder {
    /// Build a new async client with the given options.
    pub async fn build_async(self) -> BuildClientResult<AsyncClient> {
        let client = BACKEND
            .get()
            .ok_or(BuildClientError::NoBackend)?
            .create_async_client(self.options.clone())
            .await?;
        Ok(AsyncClient {
            client,
            options: self.options,
        })
    }
}

impl AsyncClient {
    /// Sends a request to the server and resolves to the response.
    pub async fn request(&self, req: Request) -> crate::Result<Response> {
        let transport = serialize::r#async::serialize(req, &self.options).await?;
        let res = self.client.request(transport).await?;
        Ok(Response::new(res))
    }
}

impl Debug for AsyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.client.describe(f)
    }
}

/// The process-wide default client used by the shortcut functions.
///
/// Built on first use; a lost construction race only costs the extra
/// build.
pub(crate) async fn default_client() -> crate::Result<&'static AsyncClient> {
    static DEFAULT_CLIENT: OnceLock<AsyncClient> = OnceLock::new();
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = ClientBuilder::default()
        .build_async()
        .await
        .map_err(|err| match err {
            BuildClientError::NoBackend => panic!("no fletch transport backend registered"),
            BuildClientError::BackendError(err) => err,
        })?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}
