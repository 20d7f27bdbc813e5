//! # Generator Module
//!
//! Turns an analyzed handler module into its dispatch file: one setup
//! function that registers every handler on a
//! [`ServeMux`](crate::transport::ServeMux).
//!
//! ## Architecture
//!
//! ```text
//! module dir → collect_source_files → analysis → templates (askama) → atomic write (+ rustfmt)
//! ```
//!
//! 1. **Collection** - `*.rs` files of the directory, generated files excluded
//! 2. **Analysis** - see [`crate::analysis`]
//! 3. **Template Rendering** - `templates/dispatch.rs.txt`
//! 4. **Writing** - temporary file in the destination directory, then rename
//!
//! ## Generated File
//!
//! The file lands at `<dir>/<dir name>.gen.rs` and is meant to be included as
//! a child module of the analyzed module:
//!
//! ```rust,ignore
//! // handlers/mod.rs
//! #[path = "handlers.gen.rs"]
//! mod dispatch;
//! pub use dispatch::config_serve_mux_handler;
//! ```
//!
//! Each registration decodes the request into fresh locals, calls the
//! handler and encodes its results:
//!
//! ```rust,ignore
//! mux.handle_func(route_map.get_route("add_user"), move |w, r| {
//!     let mut a0: Box<model::User> = Box::default();
//!     if let Err(err) = msg_codec.decode(r, &mut [&mut *a0]) {
//!         on_request_error(r, w, &err);
//!         return;
//!     }
//!     let r0 = super::add_user(a0);
//!     if let Err(err) = msg_codec.encode(w, &[&*r0]) {
//!         on_response_error(r, &err);
//!     }
//! });
//! ```
//!
//! ## Usage
//!
//! ```bash
//! handlergen generate --input src/handlers
//! ```
//!
//! ```rust,ignore
//! use handlergen::generator::{generate_dispatch, GenerateOptions};
//!
//! let report = generate_dispatch(&GenerateOptions::for_dir("src/handlers")?)?;
//! println!("{} handlers → {}", report.handlers, report.output.display());
//! ```

mod config;
mod format;
mod project;
mod templates;

pub use config::*;
pub use format::*;
pub use project::*;
pub use templates::*;
