// Code generated by handlergen. DO NOT EDIT.

//! Request dispatch for the `handlers` module.

#![allow(unused_variables)]

use super::*;

use handlergen::transport;
use handlergen::web;
use crate::model;

pub fn config_serve_mux_handler(mux: &mut transport::ServeMux, opts: &web::HandlerSetupOptions) {
    let route_map = &opts.route;
    let msg_codec = &opts.codec;
    let on_request_error = &opts.on_request_error;
    let on_response_error = &opts.on_response_error;
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_request_error = std::sync::Arc::clone(on_request_error);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("hello"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let mut a0: String = Default::default();
            if let Err(err) = msg_codec.decode(r, &mut [&mut a0]) {
                on_request_error(r, w, &err);
                return;
            }
            let r0 = super::hello(a0);
            if let Err(err) = msg_codec.encode(w, &[&r0]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_request_error = std::sync::Arc::clone(on_request_error);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("add_user"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let mut a0: Box<model::User> = Box::default();
            if let Err(err) = msg_codec.decode(r, &mut [&mut *a0]) {
                on_request_error(r, w, &err);
                return;
            }
            let r0 = super::add_user(a0);
            if let Err(err) = msg_codec.encode(w, &[&*r0]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_request_error = std::sync::Arc::clone(on_request_error);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("sum"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let mut a0: i64 = Default::default();
            let mut a1: i64 = Default::default();
            if let Err(err) = msg_codec.decode(r, &mut [&mut a0, &mut a1]) {
                on_request_error(r, w, &err);
                return;
            }
            let r0 = super::sum(a0, a1);
            if let Err(err) = msg_codec.encode(w, &[&r0]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_request_error = std::sync::Arc::clone(on_request_error);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("split"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let mut a0: String = Default::default();
            if let Err(err) = msg_codec.decode(r, &mut [&mut a0]) {
                on_request_error(r, w, &err);
                return;
            }
            let (r0, r1) = super::split(a0);
            if let Err(err) = msg_codec.encode(w, &[&r0, &r1]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("echo_header"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let r0 = super::echo_header(r);
            if let Err(err) = msg_codec.encode(w, &[&r0]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        mux.handle_func(route_map.get_route("health"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            super::health(w, r);
        });
    }
    {
        mux.handle_func(route_map.get_route("ping"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            super::ping();
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_request_error = std::sync::Arc::clone(on_request_error);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("rename_user"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let mut a0: Box<model::User> = Box::default();
            if let Err(err) = msg_codec.decode(r, &mut [&mut *a0]) {
                on_request_error(r, w, &err);
                return;
            }
            let (r0,) = super::rename_user(a0);
            if let Err(err) = msg_codec.encode(w, &[&*r0]) {
                on_response_error(r, &err);
            }
        });
    }
    {
        let msg_codec = std::sync::Arc::clone(msg_codec);
        let on_response_error = std::sync::Arc::clone(on_response_error);
        mux.handle_func(route_map.get_route("mux"), move |w: &mut dyn transport::ResponseWriter, r: &transport::Request| {
            let r0 = super::mux();
            if let Err(err) = msg_codec.encode(w, &[&r0]) {
                on_response_error(r, &err);
            }
        });
    }
}
