//! ephemd server library entry.
//!
//! This crate wires the config layer, the in-memory task store, the HTTP
//! API, middleware, and in-process metrics into a cohesive service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod middleware;
pub mod obs;
pub mod probe;
pub mod router;
pub mod store;
