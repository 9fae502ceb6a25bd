//! Application layer for the overlap checker
//!
//! Wires the domain checker into an HTTP endpoint, loads configuration and
//! runs the server.

pub mod api;
pub mod config;
pub mod server;

pub use api::{router, OverlapEndpoint, OverlapRequest, ResponseFormatter};
pub use config::{Configuration, ServerConfig};
