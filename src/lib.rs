//! # handlergen
//!
//! **handlergen** turns a module of plain Rust functions into routed request
//! handlers. It reads the module's source, classifies every `pub fn`
//! signature, and generates a dispatch file with one setup function that
//! registers each function on a [`transport::ServeMux`]. Requests are decoded
//! into the function's parameters and its results are encoded into the
//! response through a pluggable [`web::Codec`].
//!
//! ## Example
//!
//! ```rust,ignore
//! // src/handlers/mod.rs
//! use crate::model;
//! use handlergen::transport::{Request, ResponseWriter};
//!
//! pub fn hello(name: String) -> String {
//!     format!("Hello, {name}")
//! }
//!
//! pub fn add_user(user: Box<model::User>) -> Box<model::User> {
//!     user
//! }
//!
//! pub fn health(w: &mut dyn ResponseWriter, r: &Request) {
//!     let _ = w.write_all(b"ok");
//! }
//!
//! #[path = "handlers.gen.rs"]
//! mod dispatch;
//! pub use dispatch::config_serve_mux_handler;
//! ```
//!
//! `handlergen generate --input src/handlers` writes `handlers.gen.rs`; the
//! application then wires it up:
//!
//! ```rust,ignore
//! let mut mux = handlergen::transport::ServeMux::new();
//! handlers::config_serve_mux_handler(&mut mux, &handlergen::web::HandlerSetupOptions::default());
//! ```
//!
//! ## Parameter rules
//!
//! - Scalars, `String` and named structs or enums are decoded by value
//! - `Box<T>` is decoded into a freshly allocated value
//! - `&Request` and `&mut dyn ResponseWriter` are passed through
//! - Anything else (references, trait objects, generics, containers) is
//!   rejected at generation time with the position of the offending type
//!
//! ## Modules
//!
//! - **[`analysis`]** - Source parsing, name resolution and signature classification
//! - **[`generator`]** - Template rendering and atomic output writing
//! - **[`transport`]** - Request, response writer and `ServeMux`
//! - **[`web`]** - Codec, route map and setup options used by generated code
//! - **[`cli`]** - The `handlergen` command line
//! - **[`logging`]** - `tracing` subscriber setup

pub mod analysis;
pub mod cli;
pub mod generator;
pub mod logging;
pub mod transport;
pub mod web;
