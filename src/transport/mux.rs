use std::collections::HashMap;
use std::fmt;

use http::StatusCode;
use tracing::{debug, info, warn};

use super::request::Request;
use super::response::{Response, ResponseWriter};

/// A registered request handler
pub type HandlerFunc = Box<dyn Fn(&mut dyn ResponseWriter, &Request) + Send + Sync>;

/// Exact-path request multiplexer.
///
/// Registration takes `&mut self`, serving takes `&self`; once set up, a mux
/// can be shared between threads and serve concurrently.
#[derive(Default)]
pub struct ServeMux {
    handlers: HashMap<String, HandlerFunc>,
}

impl fmt::Debug for ServeMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServeMux")
            .field("routes", &self.routes())
            .finish()
    }
}

impl ServeMux {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for requests whose path equals `path`.
    ///
    /// A handler already registered for the same path is replaced.
    pub fn handle_func<F>(&mut self, path: impl Into<String>, handler: F)
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        let path = path.into();
        if self.handlers.insert(path.clone(), Box::new(handler)).is_some() {
            warn!(path = %path, "Replaced existing handler");
        } else {
            info!(
                path = %path,
                total_handlers = self.handlers.len(),
                "Handler registered"
            );
        }
    }

    /// Run the handler registered for `req.path` and return its response.
    ///
    /// Unrouted paths get `404 Not Found`.
    #[must_use]
    pub fn serve(&self, req: &Request) -> Response {
        let mut res = Response::new();
        self.serve_into(&mut res, req);
        res
    }

    /// Like [`ServeMux::serve`], writing into a caller-provided writer
    pub fn serve_into(&self, w: &mut dyn ResponseWriter, req: &Request) {
        match self.handlers.get(&req.path) {
            Some(handler) => {
                debug!(method = %req.method, path = %req.path, "dispatching request");
                handler(w, req);
            }
            None => {
                warn!(method = %req.method, path = %req.path, "No handler for path");
                w.set_status(StatusCode::NOT_FOUND);
                if let Err(err) = w.write_all(b"404 page not found") {
                    warn!(error = %err, "failed to write 404 body");
                }
            }
        }
    }

    /// Registered paths, sorted
    #[must_use]
    pub fn routes(&self) -> Vec<&str> {
        let mut routes: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        routes.sort_unstable();
        routes
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.handlers.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
