//! HTTP API
//!
//! Router, handlers and request extractors.

pub mod extractors;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
