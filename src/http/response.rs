//! HTTP response building module
//!
//! A response is the triple (status line, header list, body). The body is a
//! finite sequence of byte chunks drained by the transport after the status
//! and headers have been emitted.

use bytes::Bytes;
use std::io;

/// One response header as (name, value)
pub type Header = (String, String);

/// Response body: a finite, consume-once sequence of byte chunks
///
/// Chunked bodies are produced lazily (file streaming interleaves storage reads
/// with socket writes), so iteration can fail mid-stream with an `io::Error`.
/// Such an error is not caught anywhere inside the dispatcher; the outer loop
/// treats it as a transport-reset condition.
pub enum Body {
    /// No body bytes at all
    Empty,
    /// A single pre-built chunk
    Full(Bytes),
    /// A lazily produced chunk sequence
    Chunks(Box<dyn Iterator<Item = io::Result<Bytes>>>),
}

impl Body {
    /// Drain the whole body into one contiguous buffer
    ///
    /// Mainly useful to handlers and tests; the transport drains chunk by chunk
    /// instead.
    pub fn collect(self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }
}

impl Iterator for Body {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Empty => None,
            Self::Full(bytes) => {
                let bytes = std::mem::take(bytes);
                *self = Self::Empty;
                Some(Ok(bytes))
            }
            Self::Chunks(chunks) => chunks.next(),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::Full(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Full(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Full(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::Full(Bytes::from_static(text.as_bytes()))
    }
}

/// A full response triple
pub struct Response {
    /// Status line without the protocol prefix, e.g. `200 OK`
    pub status: String,
    pub headers: Vec<Header>,
    pub body: Body,
}

impl Response {
    /// The empty triple returned when nothing matched a request
    ///
    /// Deliberately not a `404`: the status is the empty string and the header
    /// list is empty. The transport emits whatever it is given.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            status: String::new(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Build a `200 OK` response with a single Content-Type header
    #[must_use]
    pub fn ok(content_type: &str, body: Body) -> Self {
        Self {
            status: "200 OK".to_string(),
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
        }
    }

    /// Build a `200 OK` JSON response
    #[must_use]
    pub fn json(body: String) -> Self {
        Self::ok("application/json", Body::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_triple() {
        let resp = Response::empty();
        assert_eq!(resp.status, "");
        assert!(resp.headers.is_empty());
        assert!(resp.body.collect().unwrap().is_empty());
    }

    #[test]
    fn test_full_body_yields_once() {
        let mut body = Body::from("hello");
        assert_eq!(body.next().unwrap().unwrap(), Bytes::from_static(b"hello"));
        assert!(body.next().is_none());
    }

    #[test]
    fn test_ok_response_headers() {
        let resp = Response::ok("text/css", Body::from("body{}"));
        assert_eq!(resp.status, "200 OK");
        assert_eq!(
            resp.headers,
            vec![("Content-Type".to_string(), "text/css".to_string())]
        );
    }

    #[test]
    fn test_collect_concatenates_chunks() {
        let chunks: Vec<io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"ab")),
            Ok(Bytes::from_static(b"cd")),
        ];
        let body = Body::Chunks(Box::new(chunks.into_iter()));
        assert_eq!(body.collect().unwrap(), b"abcd");
    }

    #[test]
    fn test_collect_propagates_mid_stream_error() {
        let chunks: Vec<io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"ab")),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "gone")),
        ];
        let body = Body::Chunks(Box::new(chunks.into_iter()));
        assert!(body.collect().is_err());
    }
}
