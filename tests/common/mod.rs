//! In-process mock transport for exercising the facade end-to-end.
//!
//! Fixtures are keyed by URL path: each test registers a handler under a
//! unique path, makes requests through the real client machinery, and the
//! mock backend dispatches by path. One backend instance serves the whole
//! test binary, since registration is process-wide.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, Once};

use fletch::backend::{register_backend, ClientOptions, TransportRequest};
use fletch::client::BuildClientResult;

/// A request as the mock transport saw it, after facade serialization.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The canned response a fixture hands back.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub transport_decompressed: bool,
}

impl MockResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: vec![],
            body: body.into(),
            transport_decompressed: false,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn decompressed(mut self) -> Self {
        self.transport_decompressed = true;
        self
    }
}

type Handler = Box<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;

static FIXTURES: Mutex<BTreeMap<String, Handler>> = Mutex::new(BTreeMap::new());

/// Register a fixture handler for the given URL path.
pub fn add_fixture(
    path: &str,
    handler: impl Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
) {
    let mut path = path.to_owned();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    FIXTURES
        .lock()
        .unwrap()
        .insert(path, Box::new(handler));
}

/// Register the mock backend; safe to call from every test.
pub fn ensure_backend() {
    static INIT: Once = Once::new();
    INIT.call_once(|| register_backend(MockBackend));
}

fn path_of(url: &str) -> &str {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = after_scheme
        .find('/')
        .map(|i| &after_scheme[i..])
        .unwrap_or("/");
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

fn dispatch(req: TransportRequest) -> MockResponse {
    let recorded = RecordedRequest {
        method: req.method.as_str().to_owned(),
        url: req.url.clone(),
        headers: req
            .headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        body: req.body.as_ref().map(|b| b.to_vec()),
    };
    let path = path_of(&recorded.url).to_owned();
    let fixtures = FIXTURES.lock().unwrap();
    let handler = fixtures
        .get(&path)
        .unwrap_or_else(|| panic!("no fixture registered for {path}"));
    handler(&recorded)
}

fn lookup_header(headers: &[(String, String)], name: &str) -> Vec<String> {
    headers
        .iter()
        .filter(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.clone())
        .collect()
}

pub struct MockBackend;

#[cfg(feature = "blocking")]
mod blocking_impl {
    use std::io::Read;

    use fletch::backend::{BlockingBackend, BlockingClient, BlockingResponse};

    use super::*;

    pub struct MockBlockingClient;

    pub struct MockBlockingResponse {
        response: MockResponse,
        body: io::Cursor<Vec<u8>>,
    }

    impl BlockingBackend for MockBackend {
        type BlockingClient = MockBlockingClient;

        fn create_blocking_client(
            &self,
            _options: ClientOptions,
        ) -> BuildClientResult<MockBlockingClient> {
            Ok(MockBlockingClient)
        }
    }

    impl BlockingClient for MockBlockingClient {
        type Response = MockBlockingResponse;

        fn request(&self, req: TransportRequest) -> fletch::Result<MockBlockingResponse> {
            let response = dispatch(req);
            Ok(MockBlockingResponse {
                body: io::Cursor::new(response.body.clone()),
                response,
            })
        }
    }

    impl Read for MockBlockingResponse {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.body.read(buf)
        }
    }

    impl BlockingResponse for MockBlockingResponse {
        fn status(&self) -> u16 {
            self.response.status
        }

        fn content_length(&self) -> Option<u64> {
            Some(self.response.body.len() as u64)
        }

        fn get_header(&self, header: &str) -> fletch::Result<Vec<String>> {
            Ok(lookup_header(&self.response.headers, header))
        }

        fn transport_decompressed(&self) -> bool {
            self.response.transport_decompressed
        }
    }
}

#[cfg(feature = "async")]
mod async_impl {
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::io::AsyncRead;
    use fletch::backend::{AsyncBackend, AsyncClient, AsyncResponse};

    use super::*;

    pub struct MockAsyncClient;

    pub struct MockAsyncResponse {
        response: MockResponse,
        body: futures::io::Cursor<Vec<u8>>,
    }

    impl AsyncBackend for MockBackend {
        type AsyncClient = MockAsyncClient;

        async fn create_async_client(
            &self,
            _options: ClientOptions,
        ) -> BuildClientResult<MockAsyncClient> {
            Ok(MockAsyncClient)
        }
    }

    impl AsyncClient for MockAsyncClient {
        type Response = MockAsyncResponse;

        async fn request(&self, req: TransportRequest) -> fletch::Result<MockAsyncResponse> {
            let response = dispatch(req);
            Ok(MockAsyncResponse {
                body: futures::io::Cursor::new(response.body.clone()),
                response,
            })
        }
    }

    impl AsyncRead for MockAsyncResponse {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            Pin::new(&mut self.body).poll_read(cx, buf)
        }
    }

    impl AsyncResponse for MockAsyncResponse {
        fn status(&self) -> u16 {
            self.response.status
        }

        fn content_length(&self) -> Option<u64> {
            Some(self.response.body.len() as u64)
        }

        fn get_header(&self, header: &str) -> fletch::Result<Vec<String>> {
            Ok(lookup_header(&self.response.headers, header))
        }

        fn transport_decompressed(&self) -> bool {
            self.response.transport_decompressed
        }
    }
}

/// Gzip-compress `data` the way a server would.
pub fn gzipped(data: &[u8]) -> Vec<u8> {
    use std::io::Write;

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Zlib-compress `data` (the usual meaning of `Content-Encoding: deflate`).
pub fn zlibbed(data: &[u8]) -> Vec<u8> {
    use std::io::Write;

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Raw-DEFLATE-compress `data` (the other meaning servers use).
pub fn deflated(data: &[u8]) -> Vec<u8> {
    use std::io::Write;

    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
