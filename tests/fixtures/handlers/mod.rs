//! Handlers exercised by the dispatch tests.
//!
//! `handlers.gen.rs` is generated from this file with
//! `handlergen generate --input tests/fixtures/handlers`.

use crate::model;
use handlergen::transport::{Request, ResponseWriter};
use http::StatusCode;
use std::io::Write;

pub fn hello(name: String) -> String {
    format!("Hello, {name}")
}

pub fn add_user(user: Box<model::User>) -> Box<model::User> {
    let mut user = user;
    user.id = 1;
    user
}

pub fn sum(a: i64, b: i64) -> i64 {
    a + b
}

pub fn split(text: String) -> (String, usize) {
    (text.to_uppercase(), text.len())
}

pub fn echo_header(r: &Request) -> String {
    r.header("x-name").unwrap_or("anonymous").to_string()
}

pub fn health(w: &mut dyn ResponseWriter, r: &Request) {
    w.set_status(StatusCode::ACCEPTED);
    if write!(w, "ok {}", r.method).is_err() {
        w.set_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}

pub fn ping() {}

pub fn rename_user(user: Box<model::User>) -> (Box<model::User>,) {
    let mut user = user;
    user.name = user.name.to_uppercase();
    (user,)
}

/// Shares its name with the setup function's parameter
pub fn mux() -> String {
    "mux handler".to_string()
}

#[allow(dead_code)]
fn not_a_handler(values: Vec<u8>) -> usize {
    values.len()
}

#[path = "handlers.gen.rs"]
mod dispatch;

pub use dispatch::config_serve_mux_handler;
