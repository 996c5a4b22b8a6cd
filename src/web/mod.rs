//! HTTP adapter
//!
//! Thin JSON-over-HTTP transport on top of the services. Maps domain
//! errors to status codes; holds no business logic of its own.

mod handlers;
mod server;

pub use handlers::AppState;
pub use server::run_server;
