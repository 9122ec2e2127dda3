//! Static MIME type lookups.
//!
//! Read-only data consumed by the response layer; no I/O of its own.

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Look up the MIME type for a file extension.
///
/// Unrecognized extensions map to [`APPLICATION_OCTET_STREAM`].
pub fn from_extension(ext: &str) -> &'static str {
    match ext {
        "html" | "htm" => TEXT_HTML,
        "css" => TEXT_CSS,
        "js" => APPLICATION_JAVASCRIPT,
        "json" => APPLICATION_JSON,
        "xml" => APPLICATION_XML,
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => APPLICATION_OCTET_STREAM,
    }
}

/// Append the `charset=utf-8` parameter to a MIME type.
pub fn charset_utf8(mime: &str) -> String {
    format!("{mime}; charset=utf-8")
}
