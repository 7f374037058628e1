//! Storage access module
//!
//! Startup-time directory enumeration and chunked file reading against the
//! slow backing store. Everything here blocks the calling thread for at most
//! one storage operation at a time.

pub mod manifest;
pub mod reader;

pub use manifest::Manifest;
pub use reader::ChunkReader;
