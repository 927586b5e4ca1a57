//! Pokemon TCG API proxy.
//!
//! Forwards a fixed set of read-only routes to the Pokemon TCG API, attaching
//! the server-side API key and restricting browser callers to an origin
//! allow-list.

pub mod config;
pub mod error;
pub mod middleware;
pub mod origin;
pub mod routes;
pub mod server;
pub mod state;
pub mod upstream;
