//! HTTP Response builder and serializer.
use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    headers::HeaderMap,
    http::{StatusCode, httpdate_now, mime},
};

const SERVER: &str = concat!("waku/", env!("CARGO_PKG_VERSION"));

/// HTTP Response.
///
/// Accumulates status, headers, and body through chained mutators, then
/// [`serialize`][Response::serialize]s into HTTP/1.1 wire bytes. None of the
/// mutators perform I/O.
///
/// ```rust
/// use waku::Response;
///
/// let mut res = Response::new();
/// res.status(201u16)
///     .header("x-request-id", "42")
///     .text("created");
/// let bytes = res.serialize();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    sent: bool,
}

impl Response {
    /// Create new empty [`Response`] with status `200 OK`.
    #[inline]
    pub fn new() -> Self {
        <_>::default()
    }
}

// ===== Builder =====

impl Response {
    /// Set the status code.
    #[inline]
    pub fn status(&mut self, status: impl Into<StatusCode>) -> &mut Self {
        self.status = status.into();
        self
    }

    /// Set a header, overwriting any prior value for that name.
    #[inline]
    pub fn header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    /// Set headers in bulk, each overwriting any prior value for its name.
    pub fn headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.as_ref(), value);
        }
        self
    }

    /// Replace the body.
    #[inline]
    pub fn body(&mut self, content: impl AsRef<[u8]>) -> &mut Self {
        self.body.clear();
        self.body.extend_from_slice(content.as_ref());
        self
    }

    /// Append to the body.
    #[inline]
    pub fn append(&mut self, content: impl AsRef<[u8]>) -> &mut Self {
        self.body.extend_from_slice(content.as_ref());
        self
    }

    /// Replace the body with JSON content, setting `Content-Type`.
    pub fn json(&mut self, content: &str) -> &mut Self {
        self.header("Content-Type", mime::charset_utf8(mime::APPLICATION_JSON))
            .body(content)
    }

    /// Replace the body with HTML content, setting `Content-Type`.
    pub fn html(&mut self, content: &str) -> &mut Self {
        self.header("Content-Type", mime::charset_utf8(mime::TEXT_HTML))
            .body(content)
    }

    /// Replace the body with plain text content, setting `Content-Type`.
    pub fn text(&mut self, content: &str) -> &mut Self {
        self.header("Content-Type", mime::charset_utf8(mime::TEXT_PLAIN))
            .body(content)
    }

    /// Set the status and `Location` header in one call.
    ///
    /// Temporary redirects use [`StatusCode::FOUND`].
    pub fn redirect(&mut self, location: &str, status: impl Into<StatusCode>) -> &mut Self {
        self.status(status).header("Location", location)
    }

    /// Add a `Set-Cookie` header formatted as `name=value[; options]`.
    ///
    /// Each call adds an independent header line; cookies never overwrite
    /// each other.
    pub fn cookie(&mut self, name: &str, value: &str, options: &str) -> &mut Self {
        let cookie = if options.is_empty() {
            format!("{name}={value}")
        } else {
            format!("{name}={value}; {options}")
        };
        self.headers.append("Set-Cookie", cookie);
        self
    }
}

// ===== Accessors =====

impl Response {
    /// Returns the status code.
    #[inline]
    pub fn get_status(&self) -> StatusCode {
        self.status
    }

    /// Returns the first header value for `name`, case-insensitively.
    #[inline]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns `true` if a header is set for `name`, case-insensitively.
    #[inline]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Returns the exact byte length of the body.
    #[inline]
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` once the response has been written out.
    #[inline]
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Latch the response as written, so duplicate writes can be rejected.
    ///
    /// This is a caller-driven step; [`serialize`][Response::serialize] never
    /// sets it.
    #[inline]
    pub fn mark_sent(&mut self) {
        self.sent = true;
    }
}

// ===== Serializer =====

impl Response {
    /// Serialize into HTTP/1.1 wire bytes.
    ///
    /// Emits the status line, explicit headers in insertion order, injected
    /// defaults for any of `Content-Type`, `Content-Length`, `Connection`,
    /// `Date`, and `Server` not set by the caller, a blank line, then the
    /// body verbatim.
    ///
    /// `Content-Length` is computed from the body's exact byte length unless
    /// the caller set the header explicitly. Pure and repeatable; only the
    /// `Date` default varies between calls.
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(256 + self.body.len());
        let mut itoa = itoa::Buffer::new();

        buf.put_slice(b"HTTP/1.1 ");
        buf.put_slice(itoa.format(self.status.code()).as_bytes());
        buf.put_slice(b" ");
        buf.put_slice(self.status.reason().as_bytes());
        buf.put_slice(b"\r\n");

        for (name, value) in self.headers.iter() {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }

        if !self.headers.contains_key("content-type") {
            buf.put_slice(b"content-type: ");
            buf.put_slice(mime::TEXT_PLAIN.as_bytes());
            buf.put_slice(b"\r\n");
        }
        if !self.headers.contains_key("content-length") {
            buf.put_slice(b"content-length: ");
            buf.put_slice(itoa.format(self.body.len()).as_bytes());
            buf.put_slice(b"\r\n");
        }
        if !self.headers.contains_key("connection") {
            buf.put_slice(b"connection: keep-alive\r\n");
        }
        if !self.headers.contains_key("date") {
            buf.put_slice(b"date: ");
            buf.put_slice(httpdate_now().to_string().as_bytes());
            buf.put_slice(b"\r\n");
        }
        if !self.headers.contains_key("server") {
            buf.put_slice(b"server: ");
            buf.put_slice(SERVER.as_bytes());
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"\r\n");
        buf.put_slice(&self.body);

        buf.freeze()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lines(wire: &Bytes) -> (Vec<String>, Vec<u8>) {
        let head_end = wire
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("head terminator");
        let head = str::from_utf8(&wire[..head_end]).unwrap();
        let body = wire[head_end + 4..].to_vec();
        (head.split("\r\n").map(str::to_owned).collect(), body)
    }

    #[test]
    fn test_status_line_and_defaults() {
        let res = Response::new();
        let (head, body) = lines(&res.serialize());

        assert_eq!(head[0], "HTTP/1.1 200 OK");
        assert!(head.contains(&"content-type: text/plain".to_owned()));
        assert!(head.contains(&"content-length: 0".to_owned()));
        assert!(head.contains(&"connection: keep-alive".to_owned()));
        assert!(head.iter().any(|l| l.starts_with("date: ")));
        assert!(head.iter().any(|l| l.starts_with("server: waku/")));
        assert!(body.is_empty());
    }

    #[test]
    fn test_fluent_chain() {
        let mut res = Response::new();
        res.status(404u16).header("X-Id", "7").body("missing");

        let (head, body) = lines(&res.serialize());
        assert_eq!(head[0], "HTTP/1.1 404 Not Found");
        // explicit headers precede injected defaults, names normalized
        assert_eq!(head[1], "x-id: 7");
        assert_eq!(body, b"missing");
    }

    #[test]
    fn test_content_length_is_exact_byte_length() {
        let mut res = Response::new();
        res.body("héllo wörld");
        let (head, body) = lines(&res.serialize());

        assert!(head.contains(&format!("content-length: {}", "héllo wörld".len())));
        assert_eq!(body.len(), "héllo wörld".len());

        let mut res = Response::new();
        res.body([0u8, 159, 146, 150]);
        let (head, _) = lines(&res.serialize());
        assert!(head.contains(&"content-length: 4".to_owned()));
    }

    #[test]
    fn test_explicit_content_length_is_honored() {
        let mut res = Response::new();
        res.header("Content-Length", "99").body("abc");
        let (head, _) = lines(&res.serialize());

        assert!(head.contains(&"content-length: 99".to_owned()));
        assert!(!head.contains(&"content-length: 3".to_owned()));
    }

    #[test]
    fn test_serialize_is_repeatable() {
        let mut res = Response::new();
        res.json(r#"{"ok":true}"#);

        let first = res.serialize();
        let second = res.serialize();

        let (head_a, body_a) = lines(&first);
        let (head_b, body_b) = lines(&second);
        assert_eq!(body_a, body_b);

        for (a, b) in head_a.iter().zip(&head_b) {
            if let Some(date) = a.strip_prefix("date: ") {
                // both dates well-formed, possibly one second apart
                assert_eq!(date.len(), 29);
                assert!(date.ends_with(" GMT"));
                assert!(b.strip_prefix("date: ").unwrap().ends_with(" GMT"));
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_body_setters_overwrite() {
        let mut res = Response::new();
        res.text("first").json(r#"{"n":2}"#);

        let (head, body) = lines(&res.serialize());
        assert!(head.contains(&"content-type: application/json; charset=utf-8".to_owned()));
        assert_eq!(body, br#"{"n":2}"#);
    }

    #[test]
    fn test_append() {
        let mut res = Response::new();
        res.body("Hello").append(" ").append("World");
        let (_, body) = lines(&res.serialize());
        assert_eq!(body, b"Hello World");
    }

    #[test]
    fn test_html_and_text_content_types() {
        let mut res = Response::new();
        res.html("<p>hi</p>");
        assert_eq!(res.get_header("content-type"), Some("text/html; charset=utf-8"));

        let mut res = Response::new();
        res.text("hi");
        assert_eq!(res.get_header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_redirect() {
        let mut res = Response::new();
        res.redirect("/login", StatusCode::FOUND);

        let (head, _) = lines(&res.serialize());
        assert_eq!(head[0], "HTTP/1.1 302 Found");
        assert!(head.contains(&"location: /login".to_owned()));
    }

    #[test]
    fn test_multiple_cookies() {
        let mut res = Response::new();
        res.cookie("session", "abc", "HttpOnly; Path=/")
            .cookie("theme", "dark", "");

        let (head, _) = lines(&res.serialize());
        let cookies: Vec<_> = head
            .iter()
            .filter(|l| l.starts_with("set-cookie: "))
            .collect();
        assert_eq!(cookies, [
            "set-cookie: session=abc; HttpOnly; Path=/",
            "set-cookie: theme=dark",
        ]);
    }

    #[test]
    fn test_sent_latch() {
        let mut res = Response::new();
        assert!(!res.is_sent());
        res.serialize();
        assert!(!res.is_sent());
        res.mark_sent();
        assert!(res.is_sent());
    }
}
