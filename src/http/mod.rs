//! HTTP protocol layer module
//!
//! Transport-neutral request/response types and MIME detection, decoupled from
//! both the dispatcher and the socket handling.

pub mod mime;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::Request;
pub use response::{Body, Header, Response};
