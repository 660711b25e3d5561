use std::time::Duration;

use crate::backend::ClientOptions;

/// A builder for fletch clients.
///
/// Finish with [`build_blocking`](Self::build_blocking) or
/// [`build_async`](Self::build_async); both consult the backend registered
/// through [`crate::backend::register_backend`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    pub(crate) options: ClientOptions,
}

impl ClientBuilder {
    /// Set a base URL that request URLs are resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Add a header sent with every request. A request header with the
    /// same name overrides it.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Do not use the system's default proxy settings.
    pub fn no_proxy(mut self) -> Self {
        self.options.use_default_proxy = false;
        self
    }

    /// Disable cookie handling.
    pub fn no_cookies(mut self) -> Self {
        self.options.use_cookies = false;
        self
    }

    /// Do not follow redirect responses automatically.
    pub fn no_redirects(mut self) -> Self {
        self.options.follow_redirects = false;
        self
    }

    /// Limit how large a response body the transport may buffer.
    pub fn max_response_buffer_size(mut self, size: u64) -> Self {
        self.options.max_response_buffer_size = Some(size);
        self
    }

    /// Fail requests that do not finish within `timeout`. Enforced by the
    /// transport; fletch itself never polls or retries.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }
}
