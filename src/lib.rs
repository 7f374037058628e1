//! Small static-asset HTTP endpoint for slow, size-limited backing stores.
//!
//! The core is the [`App`] dispatcher: an exact-match route table, a static
//! manifest built once at startup, and a bounded in-memory chunk cache that
//! populates as files stream to their first reader. Everything runs on one
//! cooperative thread; the `server` module is a thin sequential transport
//! around it.

pub mod app;
pub mod cache;
pub mod config;
pub mod fs;
pub mod handler;
pub mod http;
pub mod server;

// Re-export the main entry points
pub use app::App;
pub use cache::FileCache;
pub use config::Config;
