use std::borrow::Cow;
use std::fmt::Debug;

/// A reader-backed body payload, drained into the request buffer at
/// serialization time.
pub(crate) struct StreamReader<S> {
    pub(crate) stream: S,
    pub(crate) content_length: Option<u64>,
}

pub(crate) enum BodyInner<S> {
    Bytes {
        content: Cow<'static, [u8]>,
        content_type: Cow<'static, str>,
    },
    Form {
        fields: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    },
    #[cfg(feature = "multipart")]
    Multipart { parts: Vec<Part<S>> },
    Stream {
        reader: StreamReader<S>,
        content_type: Cow<'static, str>,
    },
}

/// A request body.
///
/// The body determines the request's `Content-Type` unless a caller set
/// one explicitly. `S` is the stream type of the active flavor; use the
/// [`blocking::Body`](crate::blocking::Body) or
/// [`r#async::Body`](crate::r#async::Body) alias rather than naming it.
pub struct Body<S> {
    pub(crate) inner: BodyInner<S>,
}

/// One part of a `multipart/form-data` body.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub struct Part<S> {
    pub(crate) headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    pub(crate) name: Cow<'static, str>,
    pub(crate) filename: Option<Cow<'static, str>>,
    pub(crate) content_type: Cow<'static, str>,
    pub(crate) body: PartBody<S>,
}

/// The payload of a multipart [`Part`].
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub struct PartBody<S> {
    pub(crate) inner: PartBodyInner<S>,
}

#[cfg(feature = "multipart")]
pub(crate) enum PartBodyInner<S> {
    Bytes { content: Cow<'static, [u8]> },
    Stream(StreamReader<S>),
}

impl<S> Body<S> {
    /// A plain text body with the given content type.
    pub fn text(
        text: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Bytes {
                content: cow_str_bytes(text.into()),
                content_type: content_type.into(),
            },
        }
    }

    /// A raw bytes body with the given content type.
    pub fn bytes(
        bytes: impl Into<Cow<'static, [u8]>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Bytes {
                content: bytes.into(),
                content_type: content_type.into(),
            },
        }
    }

    /// A body serialized from `value` as JSON, sent as `application/json`.
    ///
    /// Serialization happens immediately; an unserializable value is an
    /// error here, not at execution time.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        Ok(Self::json_bytes(serde_json::to_vec(value)?))
    }

    /// A pre-serialized JSON body, sent as `application/json`.
    pub fn json_bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self::bytes(bytes, "application/json")
    }

    /// An urlencoded form body, sent as `application/x-www-form-urlencoded`.
    ///
    /// See also the [`body_form!`](crate::body_form) macro.
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            inner: BodyInner::Form {
                fields: fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            },
        }
    }

    /// A `multipart/form-data` body built from the given parts.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn multipart(parts: impl IntoIterator<Item = Part<S>>) -> Self {
        Self {
            inner: BodyInner::Multipart {
                parts: parts.into_iter().collect(),
            },
        }
    }

    /// A body read from a stream at execution time, with the given content
    /// type. The stream is fully buffered during serialization.
    pub fn stream(
        stream: impl private::IntoStream<S>,
        content_length: Option<u64>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Stream {
                reader: StreamReader {
                    stream: stream.into_stream(),
                    content_length,
                },
                content_type: content_type.into(),
            },
        }
    }
}

#[cfg(feature = "multipart")]
impl<S> Part<S> {
    /// Create a part with the given field name, content type and payload.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
        body: PartBody<S>,
    ) -> Self {
        Self {
            headers: vec![],
            name: name.into(),
            filename: None,
            content_type: content_type.into(),
            body,
        }
    }

    /// Attach an extra header to this part.
    pub fn with_header(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark this part as a file upload with the given file name.
    pub fn with_filename(mut self, filename: impl Into<Cow<'static, str>>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

#[cfg(feature = "multipart")]
impl<S> PartBody<S> {
    /// A text payload.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: PartBodyInner::Bytes {
                content: cow_str_bytes(text.into()),
            },
        }
    }

    /// A raw bytes payload.
    pub fn bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            inner: PartBodyInner::Bytes {
                content: bytes.into(),
            },
        }
    }

    /// A payload read from a stream at execution time.
    pub fn stream(stream: impl private::IntoStream<S>, content_length: Option<u64>) -> Self {
        Self {
            inner: PartBodyInner::Stream(StreamReader {
                stream: stream.into_stream(),
                content_length,
            }),
        }
    }
}

fn cow_str_bytes(text: Cow<'static, str>) -> Cow<'static, [u8]> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

impl<S> Debug for Body<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => f
                .debug_struct("Bytes")
                .field("len", &content.len())
                .field("content_type", content_type)
                .finish(),
            BodyInner::Form { fields } => {
                f.debug_struct("Form").field("fields", fields).finish()
            }
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { parts } => f
                .debug_struct("Multipart")
                .field("parts", &parts.len())
                .finish(),
            BodyInner::Stream {
                reader,
                content_type,
            } => f
                .debug_struct("Stream")
                .field("content_length", &reader.content_length)
                .field("content_type", content_type)
                .finish(),
        }
    }
}

/// Build an urlencoded form [`Body`] from literal key/value pairs.
///
/// ```no_run
/// use fletch::body_form;
/// use fletch::blocking::Request;
/// let req = Request::post("http://httpbin.org/post").with_body(body_form! {
///     "key1" => "value1",
///     "key2" => "value2",
/// });
/// ```
#[macro_export]
macro_rules! body_form {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::__private::Body::form([
            $((
                ::std::borrow::Cow::<'static, str>::from($key),
                ::std::borrow::Cow::<'static, str>::from($value),
            )),*
        ])
    };
}

#[doc(hidden)]
pub mod private {
    /// Boxes a concrete reader into the active flavor's stream type.
    /// Implemented by the `blocking` and `async` modules for their
    /// respective reader traits.
    pub trait IntoStream<S> {
        fn into_stream(self) -> S;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBody = Body<std::io::Empty>;

    #[test]
    fn test_form_macro_collects_pairs() {
        let body: TestBody = body_form! {
            "key1" => "value1",
            "key2" => "value 2",
        };
        match body.inner {
            BodyInner::Form { fields } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].0, "key1");
                assert_eq!(fields[0].1, "value1");
                assert_eq!(fields[1].0, "key2");
                assert_eq!(fields[1].1, "value 2");
            }
            _ => panic!("expected a form body"),
        }
    }

    #[test]
    fn test_json_bytes_content_type() {
        let body: TestBody = Body::json_bytes(br#"{"a":1}"#.as_slice());
        match body.inner {
            BodyInner::Bytes { content_type, .. } => {
                assert_eq!(content_type, "application/json");
            }
            _ => panic!("expected a bytes body"),
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_serializes_immediately() {
        let body: TestBody = Body::json(&serde_json::json!({"a": 1})).unwrap();
        match body.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => {
                assert_eq!(content_type, "application/json");
                assert_eq!(&content[..], br#"{"a":1}"#);
            }
            _ => panic!("expected a bytes body"),
        }
    }
}
