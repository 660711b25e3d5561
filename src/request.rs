use std::borrow::Cow;
use std::fmt::Debug;

use crate::body::Body;
#[cfg(feature = "multipart")]
use crate::body::{Part, PartBody};
use crate::body::BodyInner;
use crate::header;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// The `GET` method.
    Get,
    /// The `POST` method.
    Post,
    /// The `PUT` method.
    Put,
    /// The `DELETE` method.
    Delete,
    /// The `PATCH` method.
    Patch,
    /// The `HEAD` method.
    Head,
    /// Any other method token.
    Other(Cow<'static, str>),
}

impl Method {
    /// The method token as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Other(method) => method,
        }
    }
}

/// An HTTP request under construction.
///
/// Configuration accumulates through chained `with_*` calls; the request is
/// consumed once when handed to a client. `S` is the body stream type of
/// the active flavor; use the [`blocking::Request`](crate::blocking::Request)
/// or [`r#async::Request`](crate::r#async::Request) alias rather than
/// naming it.
///
/// Exactly one body is active at execution time: the one set by the last
/// relevant call. Attaching a part (or file) switches the request to
/// `multipart/form-data`, carrying any urlencoded fields along as text
/// parts.
pub struct Request<S> {
    pub(crate) method: Method,
    pub(crate) url: Cow<'static, str>,
    pub(crate) query: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    pub(crate) headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    pub(crate) body: Option<Body<S>>,
}

impl<S> Request<S> {
    /// Create a request with the given method and URL.
    ///
    /// The URL may be absolute, or relative to the client's
    /// [`base_url`](crate::ClientBuilder::base_url).
    pub fn new(method: Method, url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            url: url.into(),
            query: vec![],
            headers: vec![],
            body: None,
        }
    }

    /// Create a `GET` request.
    pub fn get(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Create a `POST` request.
    pub fn post(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Create a `PUT` request.
    pub fn put(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Put, url)
    }

    /// Create a `DELETE` request.
    pub fn delete(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Create a `PATCH` request.
    pub fn patch(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Patch, url)
    }

    /// Create a `HEAD` request.
    pub fn head(url: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Method::Head, url)
    }

    /// Append one query parameter.
    ///
    /// Parameters are percent-encoded at execution time and extend any
    /// query string already present in the URL.
    pub fn with_query(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters at once.
    pub fn with_query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append one header.
    ///
    /// Request headers override same-named client default headers; names
    /// compare case-insensitively.
    pub fn with_header(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append several headers at once.
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set an `Authorization: Bearer <token>` header.
    pub fn with_bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.with_header(
            header::AUTHORIZATION,
            format!("Bearer {}", token.as_ref()),
        )
    }

    /// Set the request body, replacing any body set before.
    pub fn with_body(mut self, body: Body<S>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a JSON body serialized from `value`, replacing any body set
    /// before.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn with_json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        Ok(self.with_body(Body::json(value)?))
    }

    /// Append one urlencoded form field.
    ///
    /// Starts a form body if none is active; merges into an active form or
    /// multipart body; replaces any other body.
    pub fn with_form_field(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        let (key, value) = (key.into(), value.into());
        self.body = Some(match self.body.take() {
            Some(Body {
                inner: BodyInner::Form { mut fields },
            }) => {
                fields.push((key, value));
                Body::form(fields)
            }
            #[cfg(feature = "multipart")]
            Some(Body {
                inner: BodyInner::Multipart { mut parts },
            }) => {
                parts.push(Part::new(key, "text/plain", PartBody::text(value)));
                Body::multipart(parts)
            }
            _ => Body::form([(key, value)]),
        });
        self
    }

    /// Attach one multipart part.
    ///
    /// Switches the request to `multipart/form-data`: urlencoded fields
    /// accumulated so far become text parts, any other body is replaced.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn with_part(mut self, part: Part<S>) -> Self {
        self.body = Some(match self.body.take() {
            Some(Body {
                inner: BodyInner::Multipart { mut parts },
            }) => {
                parts.push(part);
                Body::multipart(parts)
            }
            Some(Body {
                inner: BodyInner::Form { fields },
            }) => {
                let mut parts: Vec<Part<S>> = fields
                    .into_iter()
                    .map(|(k, v)| Part::new(k, "text/plain", PartBody::text(v)))
                    .collect();
                parts.push(part);
                Body::multipart(parts)
            }
            _ => Body::multipart([part]),
        });
        self
    }

    /// Attach a file part from in-memory bytes.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn with_file_bytes(
        self,
        field: impl Into<Cow<'static, str>>,
        filename: impl Into<Cow<'static, str>>,
        bytes: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        self.with_part(
            Part::new(field, "application/octet-stream", PartBody::bytes(bytes))
                .with_filename(filename),
        )
    }

    /// Attach a file part read from a stream during serialization.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn with_file_reader(
        self,
        field: impl Into<Cow<'static, str>>,
        filename: impl Into<Cow<'static, str>>,
        reader: impl crate::body::private::IntoStream<S>,
    ) -> Self {
        self.with_part(
            Part::new(
                field,
                "application/octet-stream",
                PartBody::stream(reader, None),
            )
            .with_filename(filename),
        )
    }
}

impl<S> Debug for Request<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestRequest = Request<std::io::Empty>;

    fn body_kind<S>(req: &Request<S>) -> &'static str {
        match req.body.as_ref().map(|b| &b.inner) {
            None => "none",
            Some(BodyInner::Bytes { .. }) => "bytes",
            Some(BodyInner::Form { .. }) => "form",
            #[cfg(feature = "multipart")]
            Some(BodyInner::Multipart { .. }) => "multipart",
            Some(BodyInner::Stream { .. }) => "stream",
        }
    }

    #[test]
    fn test_method_tokens() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Head.as_str(), "HEAD");
        assert_eq!(Method::Other("PURGE".into()).as_str(), "PURGE");
    }

    #[test]
    fn test_bearer_auth_header() {
        let req = TestRequest::get("http://a.com").with_bearer_auth("t0ken");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers[0].0, "authorization");
        assert_eq!(req.headers[0].1, "Bearer t0ken");
    }

    #[test]
    fn test_last_body_call_wins() {
        let req = TestRequest::post("http://a.com")
            .with_form_field("k", "v")
            .with_body(Body::bytes(b"raw".as_slice(), "text/plain"));
        assert_eq!(body_kind(&req), "bytes");
    }

    #[test]
    fn test_form_fields_merge() {
        let req = TestRequest::post("http://a.com")
            .with_form_field("a", "1")
            .with_form_field("b", "2");
        match &req.body.as_ref().map(|b| &b.inner) {
            Some(BodyInner::Form { fields }) => assert_eq!(fields.len(), 2),
            _ => panic!("expected a form body"),
        }
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_part_takes_precedence_over_raw_body() {
        let req = TestRequest::post("http://a.com")
            .with_body(Body::bytes(b"raw".as_slice(), "text/plain"))
            .with_file_bytes("file", "a.bin", b"data".as_slice());
        assert_eq!(body_kind(&req), "multipart");
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_form_fields_become_parts() {
        let req = TestRequest::post("http://a.com")
            .with_form_field("a", "1")
            .with_file_bytes("file", "a.bin", b"data".as_slice())
            .with_form_field("b", "2");
        match &req.body.as_ref().map(|b| &b.inner) {
            Some(BodyInner::Multipart { parts }) => {
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[0].name, "a");
                assert_eq!(parts[1].name, "file");
                assert_eq!(parts[2].name, "b");
            }
            _ => panic!("expected a multipart body"),
        }
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_raw_body_after_parts_wins() {
        let req = TestRequest::post("http://a.com")
            .with_file_bytes("file", "a.bin", b"data".as_slice())
            .with_body(Body::bytes(b"raw".as_slice(), "text/plain"));
        assert_eq!(body_kind(&req), "bytes");
    }
}
