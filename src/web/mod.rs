//! # Web Module
//!
//! Runtime support referenced by generated dispatch files: the message
//! [`Codec`] (with the default [`JsonCodec`]), the [`RouteMap`] and the
//! [`HandlerSetupOptions`] passed to the generated setup function.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! use handlergen::transport::ServeMux;
//! use handlergen::web::{HandlerSetupOptions, RouteMap};
//!
//! let routes = RouteMap::new().with_route("add_user", "/users");
//! let mut mux = ServeMux::new();
//! handlers::config_serve_mux_handler(&mut mux, &HandlerSetupOptions::new().with_routes(routes));
//! ```
//!
//! ## Message shape
//!
//! With [`JsonCodec`], a handler taking one decodable parameter reads the
//! whole body into it; a handler taking several expects a JSON array with
//! one element per parameter, in declaration order. Results follow the same
//! rule in the response body.

mod codec;
mod options;

pub use codec::{Codec, CodecError, Decode, Encode, JsonCodec};
pub use options::{
    default_request_error, default_response_error, HandlerSetupOptions, RequestErrorHook,
    ResponseErrorHook, RouteMap,
};
