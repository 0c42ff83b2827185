//! Request-scoped HTTP entry point for the profile API.
//!
//! Every response leaving this module carries the fixed CORS header set,
//! including pre-flight answers and errors raised before routing.

pub mod cors;
pub mod handler;
pub mod http;
pub mod request;
pub mod server;

pub use cors::{CORS_HEADERS, apply_cors, preflight_response};
pub use handler::{Cors, Handler, PipelineHandler};
pub use request::{EdgeRequest, EdgeResponse, Method};
pub use server::{bind, serve, serve_with_shutdown};
