//! Story API client
//!
//! Authentication, request/response types and the HTTP transport used by
//! the scenario runner.

pub mod auth;
pub mod protocol;
pub mod session;
pub mod transport;

pub use session::Session;
pub use transport::{HttpTransport, Transport};
