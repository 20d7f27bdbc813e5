use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::codec::{Codec, CodecError, JsonCodec};
use crate::transport::{Request, ResponseWriter};

/// Called when a request body cannot be decoded; responsible for the response
pub type RequestErrorHook = Arc<dyn Fn(&Request, &mut dyn ResponseWriter, &CodecError) + Send + Sync>;

/// Called when results cannot be encoded; the response may be partly written
pub type ResponseErrorHook = Arc<dyn Fn(&Request, &CodecError) + Send + Sync>;

/// Handler name → route path.
///
/// Handlers without an entry are served at `"/" + name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMap(HashMap<String, String>);

impl RouteMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route for handler `name`
    #[must_use]
    pub fn get_route(&self, name: &str) -> String {
        self.0
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("/{name}"))
    }

    /// Override the route of handler `name`
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.0.insert(name.into(), path.into());
    }

    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(name, path);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Collaborators handed to the generated setup function.
///
/// Everything is shared read-only between the registered closures.
#[derive(Clone)]
pub struct HandlerSetupOptions {
    pub route: RouteMap,
    pub codec: Arc<dyn Codec>,
    pub on_request_error: RequestErrorHook,
    pub on_response_error: ResponseErrorHook,
}

impl fmt::Debug for HandlerSetupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSetupOptions")
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl Default for HandlerSetupOptions {
    fn default() -> Self {
        Self {
            route: RouteMap::default(),
            codec: Arc::new(JsonCodec),
            on_request_error: Arc::new(default_request_error),
            on_response_error: Arc::new(default_response_error),
        }
    }
}

impl HandlerSetupOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_routes(mut self, route: RouteMap) -> Self {
        self.route = route;
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    #[must_use]
    pub fn with_request_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Request, &mut dyn ResponseWriter, &CodecError) + Send + Sync + 'static,
    {
        self.on_request_error = Arc::new(hook);
        self
    }

    #[must_use]
    pub fn with_response_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Request, &CodecError) + Send + Sync + 'static,
    {
        self.on_response_error = Arc::new(hook);
        self
    }
}

/// Answers `400 Bad Request` with the error text
pub fn default_request_error(req: &Request, w: &mut dyn ResponseWriter, err: &CodecError) {
    warn!(path = %req.path, error = %err, "Failed to decode request");
    w.set_status(StatusCode::BAD_REQUEST);
    if let Err(write_err) = w.write_all(err.to_string().as_bytes()) {
        warn!(path = %req.path, error = %write_err, "Failed to write error response");
    }
}

/// Logs the failure; the response is left as the handler wrote it
pub fn default_response_error(req: &Request, err: &CodecError) {
    error!(path = %req.path, error = %err, "Failed to encode response");
}
