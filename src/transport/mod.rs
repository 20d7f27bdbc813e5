//! # Transport Module
//!
//! The minimal request/response plumbing generated dispatch code runs on:
//! a [`Request`], the [`ResponseWriter`] capability handlers write through,
//! and the [`ServeMux`] the generated setup function registers closures on.
//!
//! Nothing here speaks a wire protocol. An HTTP server adapter builds a
//! [`Request`] from the incoming message, calls [`ServeMux::serve`] (or
//! [`ServeMux::serve_into`] with its own writer) and sends the result.
//!
//! ```rust
//! use handlergen::transport::{Request, ResponseWriter, ServeMux};
//! use http::{Method, StatusCode};
//! use std::io::Write;
//!
//! let mut mux = ServeMux::new();
//! mux.handle_func("/ping", |w: &mut dyn ResponseWriter, _r: &Request| {
//!     w.set_status(StatusCode::OK);
//!     let _ = w.write_all(b"pong");
//! });
//!
//! let res = mux.serve(&Request::new(Method::GET, "/ping"));
//! assert_eq!(res.text(), "pong");
//! ```

mod mux;
mod request;
mod response;
#[cfg(test)]
mod tests;

pub use mux::{HandlerFunc, ServeMux};
pub use request::Request;
pub use response::{Response, ResponseWriter};
