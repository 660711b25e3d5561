use std::fmt::Debug;
use std::path::Path;

use futures_util::io::AsyncReadExt;

use crate::backend::r#async::AnyAsyncResponse;
use crate::encoding::{collect_body, BodyError, CachedBody};
use crate::header;
use crate::status::StatusCode;

/// An async HTTP response.
///
/// The body is read from the transport once, on the first call to a body
/// accessor, decoded according to the declared `Content-Encoding` and
/// cached; every later call serves the cached outcome without touching
/// the transport again. The accessors take `&mut self`, so the exclusive
/// borrow is what rules out concurrent first reads here.
pub struct Response {
    status: StatusCode,
    content_length: Option<u64>,
    inner: Box<dyn AnyAsyncResponse>,
    body: Option<CachedBody>,
}

impl Response {
    pub(crate) fn new(inner: Box<dyn AnyAsyncResponse>) -> Self {
        Self {
            status: inner.status().into(),
            content_length: inner.content_length(),
            inner,
            body: None,
        }
    }

    /// Get the status code of this response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Return the response as-is, or
    /// [`crate::Error::NonSuccessfulStatusCode`] if the status code does
    /// not indicate success.
    #[inline]
    pub fn with_successful_status(self) -> crate::Result<Self> {
        if self.status.is_successful() {
            Ok(self)
        } else {
            Err(crate::Error::NonSuccessfulStatusCode(self.status))
        }
    }

    /// Get the `content-length` of this response, if known by the
    /// transport. This is the length on the wire, before any decoding.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Get the response values of the specified header. Names compare
    /// case-insensitively; multiple values may be returned if the header
    /// is present multiple times.
    pub fn get_header(&self, header: &str) -> crate::Result<Vec<String>> {
        self.inner.get_header(header)
    }

    /// The decoded response body.
    ///
    /// Reads the full body on first call. If decoding failed, the recorded
    /// [`DecodeError`](crate::DecodeError) is returned here and on every
    /// later call; the undecoded payload stays available through
    /// [`raw_bytes`](Self::raw_bytes).
    pub async fn bytes(&mut self) -> crate::Result<&[u8]> {
        let cached = self.cached().await;
        match &cached.err {
            Some(err) => Err(err.to_error()),
            None => Ok(&cached.bytes),
        }
    }

    /// The response body exactly as the cache holds it: decoded when
    /// decoding succeeded, as received when it failed. Errors only when
    /// reading the body from the transport failed.
    pub async fn raw_bytes(&mut self) -> crate::Result<&[u8]> {
        let cached = self.cached().await;
        match &cached.err {
            Some(err @ BodyError::Read { .. }) => Err(err.to_error()),
            _ => Ok(&cached.bytes),
        }
    }

    /// The decoded response body as text. Invalid UTF-8 is replaced, not
    /// rejected.
    pub async fn text(&mut self) -> crate::Result<String> {
        Ok(String::from_utf8_lossy(self.bytes().await?).into_owned())
    }

    /// Deserialize the decoded response body as JSON.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> crate::Result<T> {
        Ok(serde_json::from_slice(self.bytes().await?)?)
    }

    /// Write the decoded response body to a new file at `path`.
    pub async fn write_to_file(&mut self, path: impl AsRef<Path>) -> crate::Result<()> {
        std::fs::write(path, self.bytes().await?)?;
        Ok(())
    }

    async fn cached(&mut self) -> &CachedBody {
        match self.body {
            Some(ref cached) => cached,
            None => {
                let mut raw =
                    Vec::with_capacity(self.content_length.unwrap_or_default() as usize);
                let read = self.inner.read_to_end(&mut raw).await.map(|_| raw);
                let encoding = self
                    .inner
                    .get_header(header::CONTENT_ENCODING)
                    .ok()
                    .and_then(|mut values| {
                        if values.is_empty() {
                            None
                        } else {
                            Some(values.remove(0))
                        }
                    });
                let cached = collect_body(
                    read,
                    encoding,
                    self.inner.transport_decompressed(),
                    self.status,
                );
                self.body.get_or_insert(cached)
            }
        }
    }
}

struct ResponseDebug<'a> {
    inner: &'a dyn AnyAsyncResponse,
}

impl Debug for ResponseDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.describe(f)
    }
}

impl Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncResponse")
            .field("status", &self.status())
            .field("content_length", &self.content_length())
            .field(
                "inner",
                &ResponseDebug {
                    inner: &*self.inner,
                },
            )
            .finish()
    }
}
