//! Bookshelf backend library: domain model, ports, adapters and middleware.
//!
//! The binary in `main.rs` wires these pieces into an actix-web server; the
//! integration tests under `tests/` build the same app in-process.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
