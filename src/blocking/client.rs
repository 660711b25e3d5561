use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use super::{response::Response, Request};
use crate::backend::blocking::{AnyBlockingBackend, AnyBlockingClient};
use crate::backend::register::BACKEND;
use crate::backend::ClientOptions;
use crate::client::{BuildClientError, BuildClientResult, ClientBuilder};
use crate::serialize;

/// A blocking HTTP client to make requests with.
///
/// The current thread issuing an operation will be blocked until it is
/// completed.
///
/// Depending on the backend implementation, it might hold a connection
/// pool, a thread pool or other kind of resources internally, so it is
/// advised that you create one and reuse it to avoid unnecessary overhead.
///
/// # Thread safety
///
/// The client is thread-safe and can be shared between threads.
#[derive(Clone)]
pub struct BlockingClient {
    client: Arc<dyn AnyBlockingClient>,
    options: ClientOptions,
}

impl ClientBuilder {
    /// Build a new blocking client with the given options.
    pub fn build_blocking(self) -> BuildClientResult<BlockingClient> {
        let client = BACKEND
            .get()
            .ok_or(BuildClientError::NoBackend)?
            .create_blocking_client(self.options.clone())?;
        Ok(BlockingClient {
            client,
            options: self.options,
        })
    }
}

impl BlockingClient {
    /// Sends a request to the server and returns the response. The current
    /// thread will be blocked until the response header is available or an
    /// error occurs.
    pub fn request(&self, req: Request) -> crate::Result<Response> {
        let transport = serialize::blocking::serialize(req, &self.options)?;
        let res = self.client.request(transport)?;
        Ok(Response::new(res))
    }
}

impl Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.client.describe(f)
    }
}

/// The process-wide default client used by the shortcut functions.
///
/// Built on first use; a lost construction race only costs the extra
/// build.
pub(crate) fn default_client() -> crate::Result<&'static BlockingClient> {
    static DEFAULT_CLIENT: OnceLock<BlockingClient> = OnceLock::new();
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = ClientBuilder::default()
        .build_blocking()
        .map_err(|err| match err {
            BuildClientError::NoBackend => panic!("no fletch transport backend registered"),
            BuildClientError::BackendError(err) => err,
        })?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}
