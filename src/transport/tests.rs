#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use http::{Method, StatusCode};
use std::io::Write;

#[test]
fn test_request_builders() {
    let req = Request::new(Method::POST, "/users")
        .with_header("x-request-id", "abc")
        .with_header("bad header", "ignored")
        .with_json(&serde_json::json!({"name": "Ann"}))
        .unwrap();
    assert_eq!(req.header("x-request-id"), Some("abc"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.headers.len(), 2);
    assert_eq!(req.body, br#"{"name":"Ann"}"#);

    let raw = Request::new(Method::GET, "/raw").with_body("text");
    assert_eq!(raw.body, b"text");
}

#[test]
fn test_response_writer_buffers() {
    let mut res = Response::new();
    assert_eq!(res.status(), StatusCode::OK);
    {
        let w: &mut dyn ResponseWriter = &mut res;
        w.set_status(StatusCode::CREATED);
        w.headers_mut()
            .insert("x-kind", http::HeaderValue::from_static("test"));
        write!(w, "[1,").unwrap();
        w.write_all(b"2]").unwrap();
    }
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.header("x-kind"), Some("test"));
    assert_eq!(res.json::<Vec<u8>>().unwrap(), vec![1, 2]);
}

#[test]
fn test_mux_routes_and_404() {
    let mut mux = ServeMux::new();
    assert!(mux.is_empty());
    mux.handle_func("/b", |w: &mut dyn ResponseWriter, _: &Request| {
        w.write_all(b"b").unwrap();
    });
    mux.handle_func("/a".to_string(), |w: &mut dyn ResponseWriter, r: &Request| {
        w.write_all(&r.body).unwrap();
    });

    assert_eq!(mux.routes(), vec!["/a", "/b"]);
    assert!(mux.contains("/a"));
    assert_eq!(mux.len(), 2);

    let res = mux.serve(&Request::new(Method::POST, "/a").with_body("echo"));
    assert_eq!(res.text(), "echo");

    let missing = mux.serve(&Request::new(Method::GET, "/nope"));
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_mux_duplicate_path_replaces_handler() {
    let mut mux = ServeMux::new();
    mux.handle_func("/x", |w: &mut dyn ResponseWriter, _: &Request| {
        w.write_all(b"old").unwrap();
    });
    mux.handle_func("/x", |w: &mut dyn ResponseWriter, _: &Request| {
        w.write_all(b"new").unwrap();
    });
    assert_eq!(mux.len(), 1);
    assert_eq!(mux.serve(&Request::new(Method::GET, "/x")).text(), "new");
}
