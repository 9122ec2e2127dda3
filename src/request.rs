//! HTTP Request
use bytes::Bytes;

use crate::http::{Method, Version};

/// HTTP Request.
///
/// Only ever produced fully populated by the parser; a partially parsed
/// request is never observable.
///
/// Headers are kept as raw name and value pairs in wire order, duplicates
/// preserved. Lookups through [`header`][Request::header] are case
/// insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub uri: String,
    pub version: Version,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl Request {
    /// Returns the first header value matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
