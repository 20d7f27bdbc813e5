use std::io;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// Where a handler writes its response.
///
/// Handlers that stream or set headers themselves take
/// `&mut dyn ResponseWriter`; the codec writes encoded results through the
/// same capability.
pub trait ResponseWriter: io::Write + Send {
    /// Set the response status. The last call wins.
    fn set_status(&mut self, status: StatusCode);

    /// Mutable access to the response headers
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Status set so far (`200 OK` until changed)
    fn status(&self) -> StatusCode;
}

/// A fully buffered response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Response with `status` and a plain text body
    #[must_use]
    pub fn with_status(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body as UTF-8 text, lossily
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// First value of header `name`, if it is valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl io::Write for Response {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseWriter for Response {
    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn status(&self) -> StatusCode {
        self.status
    }
}
