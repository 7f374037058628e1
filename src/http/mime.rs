//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Get MIME Content-Type for a file name
///
/// The extension is everything after the last `.`, lower-cased. A name with no
/// dot yields no recognized extension and falls back to `text/plain`, as does
/// any extension outside the table.
///
/// # Examples
/// ```
/// use sdweb::http::mime::content_type;
/// assert_eq!(content_type("index.html"), "text/html");
/// assert_eq!(content_type("app.JS"), "application/javascript");
/// assert_eq!(content_type("README"), "text/plain");
/// ```
#[must_use]
pub fn content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "html" | "htm" => "text/html",
        "js" => "application/javascript",
        "css" => "text/css",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "text/plain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type("index.html"), "text/html");
        assert_eq!(content_type("page.htm"), "text/html");
        assert_eq!(content_type("app.js"), "application/javascript");
        assert_eq!(content_type("style.css"), "text/css");
        assert_eq!(content_type("photo.jpg"), "image/jpeg");
        assert_eq!(content_type("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type("logo.png"), "image/png");
    }

    #[test]
    fn test_case_insensitive_extension() {
        assert_eq!(content_type("INDEX.HTML"), "text/html");
        assert_eq!(content_type("style.CsS"), "text/css");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type("archive.zip"), "text/plain");
        assert_eq!(content_type("notes.txt"), "text/plain");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(content_type("LICENSE"), "text/plain");
        assert_eq!(content_type(""), "text/plain");
    }

    #[test]
    fn test_last_extension_wins() {
        assert_eq!(content_type("bundle.min.js"), "application/javascript");
    }
}
