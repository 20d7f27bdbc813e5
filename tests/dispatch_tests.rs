#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Runs the committed fixture dispatch file against the runtime, and checks
//! that regenerating it from its sources reproduces it.

#[path = "fixtures/model.rs"]
mod model;

#[path = "fixtures/handlers/mod.rs"]
mod handlers;

use handlergen::generator::{generate_dispatch, GenerateOptions};
use handlergen::transport::{Request, ResponseWriter, ServeMux};
use handlergen::web::{CodecError, HandlerSetupOptions, RouteMap};
use http::{Method, StatusCode};
use model::User;
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};

fn mux_with(opts: &HandlerSetupOptions) -> ServeMux {
    let mut mux = ServeMux::new();
    handlers::config_serve_mux_handler(&mut mux, opts);
    mux
}

fn default_mux() -> ServeMux {
    mux_with(&HandlerSetupOptions::default())
}

fn post_json(path: &str, body: serde_json::Value) -> Request {
    Request::new(Method::POST, path).with_json(&body).unwrap()
}

#[test]
fn test_every_public_handler_is_registered() {
    let mux = default_mux();
    assert_eq!(
        mux.routes(),
        vec![
            "/add_user",
            "/echo_header",
            "/health",
            "/hello",
            "/mux",
            "/ping",
            "/rename_user",
            "/split",
            "/sum"
        ]
    );
    assert!(!mux.contains("/not_a_handler"));
}

#[test]
fn test_hello_round_trip() {
    let res = default_mux().serve(&post_json("/hello", json!("World")));
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.json::<String>().unwrap(), "Hello, World");
}

#[test]
fn test_pointer_parameter_and_result() {
    let body = json!({"id": 0, "name": "Ann", "email": "ann@example.com"});
    let res = default_mux().serve(&post_json("/add_user", body));
    let user: User = res.json().unwrap();
    assert_eq!(
        user,
        User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    );
}

#[test]
fn test_multiple_parameters_decode_positionally() {
    let res = default_mux().serve(&post_json("/sum", json!([40, 2])));
    assert_eq!(res.json::<i64>().unwrap(), 42);
}

#[test]
fn test_multiple_results_encode_as_sequence() {
    let res = default_mux().serve(&post_json("/split", json!("abc")));
    assert_eq!(res.json::<serde_json::Value>().unwrap(), json!(["ABC", 3]));
}

#[test]
fn test_single_element_tuple_encodes_its_value() {
    let body = json!({"id": 7, "name": "ann", "email": "a@example.com"});
    let res = default_mux().serve(&post_json("/rename_user", body));
    assert_eq!(res.status, StatusCode::OK);
    let user: User = res.json().unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.name, "ANN");
}

#[test]
fn test_handler_named_like_a_local_is_called() {
    let res = default_mux().serve(&Request::new(Method::GET, "/mux"));
    assert_eq!(res.json::<String>().unwrap(), "mux handler");
}

#[test]
fn test_injected_request_with_result() {
    let req = Request::new(Method::GET, "/echo_header").with_header("x-name", "Zed");
    let res = default_mux().serve(&req);
    assert_eq!(res.json::<String>().unwrap(), "Zed");
}

#[test]
fn test_injected_writer_and_request() {
    let res = default_mux().serve(&Request::new(Method::PUT, "/health"));
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.text(), "ok PUT");
    assert!(res.header("content-type").is_none());
}

#[test]
fn test_no_parameters_no_results() {
    let res = default_mux().serve(&Request::new(Method::GET, "/ping").with_body("ignored"));
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty());
}

#[test]
fn test_decode_failure_goes_to_request_hook() {
    let res = default_mux().serve(&Request::new(Method::POST, "/hello").with_body("{not json"));
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.text().contains("invalid JSON"));

    let res = default_mux().serve(&post_json("/sum", json!([1, 2, 3])));
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "expected 2 values, found 3");
}

#[test]
fn test_custom_hook_sees_the_failed_request() {
    let failures: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = Arc::clone(&failures);
    let opts = HandlerSetupOptions::new().with_request_error(
        move |r: &Request, w: &mut dyn ResponseWriter, err: &CodecError| {
            seen.lock().unwrap().push(format!("{}: {err}", r.path));
            w.set_status(StatusCode::UNPROCESSABLE_ENTITY);
        },
    );
    let res = mux_with(&opts).serve(&post_json("/sum", json!({"a": 1})));
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        failures.lock().unwrap().as_slice(),
        ["/sum: expected a JSON array of 2 values"]
    );
}

#[test]
fn test_route_map_overrides_paths() {
    let routes = RouteMap::new().with_route("add_user", "/users");
    let mux = mux_with(&HandlerSetupOptions::new().with_routes(routes));
    assert!(mux.contains("/users"));
    assert!(!mux.contains("/add_user"));
    assert!(mux.contains("/hello"));
}

#[test]
fn test_concurrent_dispatch() {
    let mux = default_mux();
    std::thread::scope(|s| {
        for t in 0..8i64 {
            let mux = &mux;
            s.spawn(move || {
                for i in 0..50i64 {
                    let res = mux.serve(&post_json("/sum", json!([t, i])));
                    assert_eq!(res.json::<i64>().unwrap(), t + i);
                }
            });
        }
    });
}

#[test]
fn test_committed_dispatch_file_is_up_to_date() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/handlers");
    let mut opts = GenerateOptions::for_dir(&dir).unwrap();
    opts.dry_run = true;
    let report = generate_dispatch(&opts).unwrap();
    assert_eq!(report.handlers, 9);

    let committed = std::fs::read_to_string(dir.join("handlers.gen.rs")).unwrap();
    assert_eq!(report.source.trim_end(), committed.trim_end());
}
