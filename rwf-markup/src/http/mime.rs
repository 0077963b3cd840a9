//! Content type lookup.
//!
//! Short names like `svg` or `xml` are resolved the same way file extensions are. Full MIME
//! types pass through. Text types get `charset=utf-8` appended, unless a charset is already set.

/// Resolve a short name (or file extension) to its MIME type.
///
/// https://developer.mozilla.org/en-US/docs/Web/HTTP/Basics_of_HTTP/MIME_types/Common_types
pub fn lookup(name: &str) -> Option<&'static str> {
    let mime = match name.trim_start_matches('.').to_lowercase().as_str() {
        "atom" => "application/atom+xml",
        "css" => "text/css",
        "csv" => "text/csv",
        "gif" => "image/gif",
        "htm" | "html" => "text/html",
        "ico" => "image/vnd.microsoft.icon",
        "ics" => "text/calendar",
        "jpeg" | "jpg" => "image/jpeg",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "jsonld" => "application/ld+json",
        "md" => "text/markdown",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "rss" => "application/rss+xml",
        "svg" => "image/svg+xml",
        "text" | "txt" => "text/plain",
        "webp" => "image/webp",
        "xhtml" => "application/xhtml+xml",
        "xml" => "application/xml",
        _ => return None,
    };

    Some(mime)
}

/// Build the value of the `Content-Type` header.
///
/// # Example
///
/// ```
/// # use rwf_markup::http::mime::content_type;
/// assert_eq!(content_type("svg"), "image/svg+xml");
/// assert_eq!(content_type("xml"), "application/xml;charset=utf-8");
/// assert_eq!(content_type("text/csv;charset=latin1"), "text/csv;charset=latin1");
/// ```
pub fn content_type(name: &str) -> String {
    let mime = if name.contains('/') {
        name.to_string()
    } else {
        lookup(name)
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    };

    if wants_charset(&mime) && !mime.contains("charset") {
        format!("{};charset=utf-8", mime)
    } else {
        mime
    }
}

/// Media type without parameters, e.g. `text/html` for `text/html;charset=utf-8`.
pub fn media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}

fn wants_charset(mime: &str) -> bool {
    let media_type = media_type(mime);

    media_type.starts_with("text/")
        || matches!(
            media_type,
            "application/javascript" | "application/xml" | "application/xhtml+xml"
        )
}
