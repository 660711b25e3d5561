use std::fmt::Debug;
use std::io::Read;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::backend::blocking::AnyBlockingResponse;
use crate::encoding::{collect_body, BodyError, CachedBody};
use crate::header;
use crate::status::StatusCode;

/// A blocking HTTP response.
///
/// The body is read from the transport once, on the first call to a body
/// accessor, decoded according to the declared `Content-Encoding` and
/// cached; every later call, from any thread, serves the cached outcome
/// without touching the transport again.
pub struct Response {
    status: StatusCode,
    content_length: Option<u64>,
    inner: Mutex<Box<dyn AnyBlockingResponse>>,
    body: OnceLock<CachedBody>,
}

impl Response {
    pub(crate) fn new(inner: Box<dyn AnyBlockingResponse>) -> Self {
        Self {
            status: inner.status().into(),
            content_length: inner.content_length(),
            inner: Mutex::new(inner),
            body: OnceLock::new(),
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
        self.locked_inner().get_header(header)
    }

    /// The decoded response body.
    ///
    /// Blocks reading the full body on first call. If decoding failed, the
    /// recorded [`DecodeError`](crate::DecodeError) is returned here and on
    /// every later call;
    /// the undecoded payload stays available through
    /// [`raw_bytes`](Self::raw_bytes).
    pub fn bytes(&self) -> crate::Result<&[u8]> {
        let cached = self.cached();
        match &cached.err {
            Some(err) => Err(err.to_error()),
            None => Ok(&cached.bytes),
        }
    }

    /// The response body exactly as the cache holds it: decoded when
    /// decoding succeeded, as received when it failed. Errors only when
    /// reading the body from the transport failed.
    pub fn raw_bytes(&self) -> crate::Result<&[u8]> {
        let cached = self.cached();
        match &cached.err {
            Some(err @ BodyError::Read { .. }) => Err(err.to_error()),
            _ => Ok(&cached.bytes),
        }
    }

    /// The decoded response body as text. Invalid UTF-8 is replaced, not
    /// rejected.
    pub fn text(&self) -> crate::Result<String> {
        Ok(String::from_utf8_lossy(self.bytes()?).into_owned())
    }

    /// Deserialize the decoded response body as JSON.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_slice(self.bytes()?)?)
    }

    /// Write the decoded response body to a new file at `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        std::fs::write(path, self.bytes()?)?;
        Ok(())
    }

    fn locked_inner(&self) -> std::sync::MutexGuard<'_, Box<dyn AnyBlockingResponse>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self) -> &CachedBody {
        self.body.get_or_init(|| {
            let mut inner = self.locked_inner();
            let mut raw = Vec::with_capacity(self.content_length.unwrap_or_default() as usize);
            let read = inner.read_to_end(&mut raw).map(|_| raw);
            let encoding = inner
                .get_header(header::CONTENT_ENCODING)
                .ok()
                .and_then(|mut values| {
                    if values.is_empty() {
                        None
                    } else {
                        Some(values.remove(0))
                    }
                });
            collect_body(read, encoding, inner.transport_decompressed(), self.status)
        })
    }
}

struct ResponseDebug<'a> {
    inner: &'a dyn AnyBlockingResponse,
}

impl Debug for ResponseDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.describe(f)
    }
}

impl Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingResponse")
            .field("status", &self.status())
            .field("content_length", &self.content_length())
            .field(
                "inner",
                &ResponseDebug {
                    inner: &**self.locked_inner(),
                },
            )
            .finish()
    }
}
