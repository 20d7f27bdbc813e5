use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde::Serialize;

/// An incoming request as seen by dispatch closures and handlers.
///
/// Handlers that need transport details (headers, raw body) take it as
/// `&Request`; everything else is decoded from [`Request::body`] by the codec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Request path, used as the routing key
    pub path: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Replace the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type`
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> serde_json::Result<Self> {
        self.body = serde_json::to_vec(value)?;
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Add a header; invalid names or values are ignored
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// First value of header `name`, if it is valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
