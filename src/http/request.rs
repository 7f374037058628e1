//! Request descriptor module
//!
//! The transport-neutral view of one incoming HTTP request. The outer loop
//! builds one of these per request; handlers and the dispatcher only ever see
//! this type, never the socket.

/// A single incoming request
///
/// Method and path drive dispatch; query string and headers are carried through
/// opaquely for registered handlers to inspect.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Create a request with no query string or headers
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            query: String::new(),
            headers: Vec::new(),
        }
    }

    /// Look up a header value by case-insensitive name
    ///
    /// Returns the first matching header when duplicates are present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut req = Request::new("GET", "/");
        req.headers
            .push(("Content-Type".to_string(), "text/html".to_string()));
        assert_eq!(req.header("content-type"), Some("text/html"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_first_duplicate_header_wins() {
        let mut req = Request::new("GET", "/");
        req.headers.push(("X-Tag".to_string(), "a".to_string()));
        req.headers.push(("X-Tag".to_string(), "b".to_string()));
        assert_eq!(req.header("x-tag"), Some("a"));
    }
}
