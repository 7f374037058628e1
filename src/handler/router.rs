//! Route table module
//!
//! Exact-match dispatch from (HTTP method, path) to a registered handler. No
//! prefix matching, no pattern matching, no trailing-slash normalization.

use crate::http::{Request, Response};
use std::collections::HashMap;

/// A registered request handler
///
/// Receives the request descriptor and returns the full response triple.
pub type Handler = Box<dyn FnMut(&Request) -> Response>;

/// Composite key: lower-cased method, separator, verbatim path
fn route_key(method: &str, path: &str) -> String {
    format!("{}|{path}", method.to_ascii_lowercase())
}

/// Exact-match table of registered handlers
#[derive(Default)]
pub struct RouteTable {
    handlers: HashMap<String, Handler>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for (`method`, `path`)
    ///
    /// Registering the same key again replaces the previous handler.
    pub fn register(&mut self, method: &str, path: &str, handler: Handler) {
        self.handlers.insert(route_key(method, path), handler);
    }

    /// Find the handler for an exact (`method`, `path`) match
    pub fn lookup(&mut self, method: &str, path: &str) -> Option<&mut Handler> {
        self.handlers.get_mut(&route_key(method, path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Body;

    fn text_handler(text: &'static str) -> Handler {
        Box::new(move |_req| Response::ok("text/plain", Body::from(text)))
    }

    fn invoke(table: &mut RouteTable, method: &str, path: &str) -> Option<Vec<u8>> {
        let handler = table.lookup(method, path)?;
        let resp = handler(&Request::new(method, path));
        Some(resp.body.collect().unwrap())
    }

    #[test]
    fn test_exact_match_only() {
        let mut table = RouteTable::new();
        table.register("GET", "/status", text_handler("ok"));

        assert!(table.lookup("get", "/status").is_some());
        assert!(table.lookup("GET", "/status/").is_none());
        assert!(table.lookup("GET", "/stat").is_none());
        assert!(table.lookup("POST", "/status").is_none());
    }

    #[test]
    fn test_method_is_case_insensitive_path_is_not() {
        let mut table = RouteTable::new();
        table.register("PoSt", "/submit", text_handler("ok"));

        assert!(table.lookup("POST", "/submit").is_some());
        assert!(table.lookup("post", "/submit").is_some());
        assert!(table.lookup("post", "/Submit").is_none());
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut table = RouteTable::new();
        table.register("get", "/page", text_handler("first"));
        table.register("GET", "/page", text_handler("second"));

        assert_eq!(table.len(), 1);
        assert_eq!(invoke(&mut table, "GET", "/page").unwrap(), b"second");
    }

    #[test]
    fn test_separate_methods_are_separate_keys() {
        let mut table = RouteTable::new();
        table.register("get", "/thing", text_handler("read"));
        table.register("post", "/thing", text_handler("write"));

        assert_eq!(table.len(), 2);
        assert_eq!(invoke(&mut table, "get", "/thing").unwrap(), b"read");
        assert_eq!(invoke(&mut table, "post", "/thing").unwrap(), b"write");
    }
}
