//! HTTP API for civic-daemon

pub mod rest;

pub use rest::router::create_router;
