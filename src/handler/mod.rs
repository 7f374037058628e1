//! Request handler module
//!
//! Holds the route table for dynamically registered handlers. Static file
//! resolution lives with the dispatcher in `app`.

pub mod router;

pub use router::{Handler, RouteTable};
