//! Configuration options for HTTP clients.

use std::time::Duration;

/// Configuration options for creating a fletch client.
///
/// Built through [`crate::ClientBuilder`]. The facade resolves `base_url`,
/// `user_agent` and `default_headers` into each serialized request; the
/// remaining knobs configure the transport and are enforced by the
/// backend.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Optional base URL prepended to all request URLs.
    pub base_url: Option<String>,
    /// Optional User-Agent header value to use for all requests.
    pub user_agent: Option<String>,
    /// Headers to include in all requests by default.
    pub default_headers: Vec<(String, String)>,
    /// Whether to use the system's default proxy settings.
    pub use_default_proxy: bool,
    /// Whether to enable cookie handling.
    pub use_cookies: bool,
    /// Whether to automatically follow redirect responses.
    pub follow_redirects: bool,
    /// Optional maximum buffer size for response bodies.
    pub max_response_buffer_size: Option<u64>,
    /// Optional timeout duration for requests.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            default_headers: vec![],
            use_default_proxy: true,
            use_cookies: true,
            follow_redirects: true,
            max_response_buffer_size: None,
            request_timeout: None,
        }
    }
}
