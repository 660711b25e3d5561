//! Request serialization.
//!
//! Turns an accumulated [`Request`] into the flat
//! [`TransportRequest`](crate::backend::TransportRequest) handed to the
//! backend: the URL is resolved and gains its query string, client
//! defaults merge with request headers, and the active body is serialized
//! to a single buffer together with its `Content-Type`. Part streams are
//! drained here, in one pass.

use std::borrow::Cow;

use crate::backend::{ClientOptions, TransportRequest};
use crate::body::{Body, BodyInner};
#[cfg(feature = "multipart")]
use crate::body::{Part, PartBodyInner};
use crate::header;
use crate::request::{Method, Request};
use crate::url;

type HeaderVec = Vec<(Cow<'static, str>, Cow<'static, str>)>;
type Payload = (Cow<'static, [u8]>, Cow<'static, str>);

fn contains_header(headers: &[(Cow<'static, str>, Cow<'static, str>)], name: &str) -> bool {
    headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
}

/// Resolve everything that does not depend on the body stream flavor.
fn resolve<S>(
    req: Request<S>,
    options: &ClientOptions,
) -> (Method, String, HeaderVec, Option<Body<S>>) {
    let url = url::append_query(
        url::concat_url(options.base_url.as_deref(), &req.url),
        &req.query,
    );

    let mut headers: HeaderVec = Vec::new();
    for (name, value) in &options.default_headers {
        if !contains_header(&req.headers, name) {
            headers.push((Cow::Owned(name.clone()), Cow::Owned(value.clone())));
        }
    }
    if let Some(user_agent) = &options.user_agent {
        if !contains_header(&headers, header::USER_AGENT)
            && !contains_header(&req.headers, header::USER_AGENT)
        {
            headers.push((header::USER_AGENT.into(), Cow::Owned(user_agent.clone())));
        }
    }
    headers.extend(req.headers);

    (req.method, url, headers, req.body)
}

/// Assemble the transport request, filling in the body's `Content-Type`
/// unless the caller already set one.
fn assemble(
    method: Method,
    url: String,
    mut headers: HeaderVec,
    payload: Option<Payload>,
) -> TransportRequest {
    let body = payload.map(|(content, content_type)| {
        if !contains_header(&headers, header::CONTENT_TYPE) {
            headers.push((header::CONTENT_TYPE.into(), content_type));
        }
        content
    });
    TransportRequest {
        method,
        url,
        headers,
        body,
    }
}

fn urlencode_form(fields: &[(Cow<'static, str>, Cow<'static, str>)]) -> Payload {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(fields.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    (
        Cow::Owned(serializer.finish().into_bytes()),
        "application/x-www-form-urlencoded".into(),
    )
}

#[cfg(feature = "multipart")]
fn multipart_boundary() -> String {
    use rand::distr::Alphanumeric;
    use rand::Rng;

    rand::rng()
        .sample_iter(Alphanumeric)
        .take(30)
        .map(char::from)
        .collect()
}

#[cfg(feature = "multipart")]
fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(feature = "multipart")]
fn write_part_prologue<S>(buf: &mut Vec<u8>, boundary: &str, part: &Part<S>) {
    buf.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    buf.extend_from_slice(
        format!(
            "{}: form-data; name=\"{}\"",
            header::CONTENT_DISPOSITION,
            escape_quotes(&part.name)
        )
        .as_bytes(),
    );
    if let Some(filename) = &part.filename {
        buf.extend_from_slice(format!("; filename=\"{}\"", escape_quotes(filename)).as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(
        format!("{}: {}\r\n", header::CONTENT_TYPE, part.content_type).as_bytes(),
    );
    for (name, value) in &part.headers {
        buf.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
}

#[cfg(feature = "multipart")]
fn multipart_content_type(boundary: &str) -> Cow<'static, str> {
    format!("multipart/form-data; boundary={boundary}").into()
}

#[cfg(feature = "blocking")]
pub(crate) mod blocking {
    use std::io::Read;

    use super::*;
    use crate::blocking::BoxedStream;

    /// Serialize a blocking request, draining any body streams.
    pub(crate) fn serialize(
        req: Request<BoxedStream>,
        options: &ClientOptions,
    ) -> crate::Result<TransportRequest> {
        let (method, url, headers, body) = resolve(req, options);
        let payload = match body {
            None => None,
            Some(body) => Some(serialize_body(body)?),
        };
        Ok(assemble(method, url, headers, payload))
    }

    fn serialize_body(body: Body<BoxedStream>) -> crate::Result<Payload> {
        Ok(match body.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => (content, content_type),
            BodyInner::Form { fields } => urlencode_form(&fields),
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { parts } => {
                let boundary = multipart_boundary();
                let mut buf = Vec::new();
                for part in parts {
                    write_part_prologue(&mut buf, &boundary, &part);
                    match part.body.inner {
                        PartBodyInner::Bytes { content } => buf.extend_from_slice(&content),
                        PartBodyInner::Stream(mut reader) => {
                            reader.stream.read_to_end(&mut buf)?;
                        }
                    }
                    buf.extend_from_slice(b"\r\n");
                }
                buf.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
                (Cow::Owned(buf), multipart_content_type(&boundary))
            }
            BodyInner::Stream {
                mut reader,
                content_type,
            } => {
                let mut buf = Vec::with_capacity(
                    reader.content_length.unwrap_or_default() as usize,
                );
                reader.stream.read_to_end(&mut buf)?;
                (Cow::Owned(buf), content_type)
            }
        })
    }
}

#[cfg(feature = "async")]
pub(crate) mod r#async {
    use futures_util::io::AsyncReadExt;

    use super::*;
    use crate::r#async::BoxedStream;

    /// Serialize an async request, draining any body streams.
    pub(crate) async fn serialize(
        req: Request<BoxedStream>,
        options: &ClientOptions,
    ) -> crate::Result<TransportRequest> {
        let (method, url, headers, body) = resolve(req, options);
        let payload = match body {
            None => None,
            Some(body) => Some(serialize_body(body).await?),
        };
        Ok(assemble(method, url, headers, payload))
    }

    async fn serialize_body(body: Body<BoxedStream>) -> crate::Result<Payload> {
        Ok(match body.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => (content, content_type),
            BodyInner::Form { fields } => urlencode_form(&fields),
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { parts } => {
                let boundary = multipart_boundary();
                let mut buf = Vec::new();
                for part in parts {
                    write_part_prologue(&mut buf, &boundary, &part);
                    match part.body.inner {
                        PartBodyInner::Bytes { content } => buf.extend_from_slice(&content),
                        PartBodyInner::Stream(mut reader) => {
                            reader.stream.read_to_end(&mut buf).await?;
                        }
                    }
                    buf.extend_from_slice(b"\r\n");
                }
                buf.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
                (Cow::Owned(buf), multipart_content_type(&boundary))
            }
            BodyInner::Stream {
                mut reader,
                content_type,
            } => {
                let mut buf = Vec::with_capacity(
                    reader.content_length.unwrap_or_default() as usize,
                );
                reader.stream.read_to_end(&mut buf).await?;
                (Cow::Owned(buf), content_type)
            }
        })
    }
}

#[cfg(all(test, feature = "blocking"))]
mod tests {
    use super::*;
    use crate::blocking::{Body, Request};

    fn header<'a>(req: &'a TransportRequest, name: &str) -> Option<&'a str> {
        req.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_ref())
    }

    #[test]
    fn test_query_and_base_url() {
        let req = Request::get("search").with_query("q", "a b");
        let options = ClientOptions {
            base_url: Some("http://a.com/api/".into()),
            ..Default::default()
        };
        let transport = blocking::serialize(req, &options).unwrap();
        assert_eq!(transport.url, "http://a.com/api/search?q=a+b");
        assert_eq!(transport.method.as_str(), "GET");
        assert!(transport.body.is_none());
    }

    #[test]
    fn test_form_body_sets_content_type() {
        let req = Request::post("http://a.com").with_form_field("k", "v 1");
        let transport = blocking::serialize(req, &ClientOptions::default()).unwrap();
        assert_eq!(
            header(&transport, "content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(transport.body.as_deref(), Some(b"k=v+1".as_slice()));
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let req = Request::post("http://a.com")
            .with_header("Content-Type", "text/csv")
            .with_body(Body::bytes(b"a,b".as_slice(), "text/plain"));
        let transport = blocking::serialize(req, &ClientOptions::default()).unwrap();
        assert_eq!(header(&transport, "content-type"), Some("text/csv"));
        assert_eq!(
            transport
                .headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
    }

    #[test]
    fn test_request_headers_override_defaults() {
        let req = Request::get("http://a.com").with_header("X-Token", "from-request");
        let options = ClientOptions {
            user_agent: Some("fletch-test".into()),
            default_headers: vec![
                ("X-Token".into(), "from-default".into()),
                ("X-Keep".into(), "kept".into()),
            ],
            ..Default::default()
        };
        let transport = blocking::serialize(req, &options).unwrap();
        assert_eq!(header(&transport, "x-token"), Some("from-request"));
        assert_eq!(header(&transport, "x-keep"), Some("kept"));
        assert_eq!(header(&transport, "user-agent"), Some("fletch-test"));
    }

    #[test]
    fn test_stream_body_is_buffered() {
        let req = Request::put("http://a.com").with_body(Body::stream(
            std::io::Cursor::new(b"streamed".to_vec()),
            Some(8),
            "application/octet-stream",
        ));
        let transport = blocking::serialize(req, &ClientOptions::default()).unwrap();
        assert_eq!(transport.body.as_deref(), Some(b"streamed".as_slice()));
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_multipart_framing() {
        let req = Request::post("http://a.com")
            .with_form_field("note", "hello")
            .with_file_bytes("file", "a.bin", b"\x00\x01".as_slice());
        let transport = blocking::serialize(req, &ClientOptions::default()).unwrap();

        let content_type = header(&transport, "content-type").unwrap().to_owned();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .expect("multipart content type")
            .to_owned();
        let body = transport.body.unwrap();
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with(&format!("--{boundary}\r\n")));
        assert!(text.contains("content-disposition: form-data; name=\"note\"\r\n"));
        assert!(text.contains("\r\n\r\nhello\r\n"));
        assert!(
            text.contains("content-disposition: form-data; name=\"file\"; filename=\"a.bin\"\r\n")
        );
        assert!(text.contains("content-type: application/octet-stream\r\n"));
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_multipart_part_header_and_quote_escaping() {
        let req = Request::post("http://a.com").with_part(
            crate::blocking::Part::new(
                "weird\"name",
                "text/plain",
                crate::blocking::PartBody::text("x"),
            )
            .with_header("content-language", "zh-CN"),
        );
        let transport = blocking::serialize(req, &ClientOptions::default()).unwrap();
        let text = String::from_utf8_lossy(transport.body.as_deref().unwrap()).into_owned();
        assert!(text.contains("name=\"weird\\\"name\""));
        assert!(text.contains("content-language: zh-CN\r\n"));
    }
}
