/// HTTP [Status Code][rfc].
///
/// Any 3-digit integer is representable; codes outside the supported table
/// fall back to the `"Unknown"` reason phrase.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

macro_rules! status_codes {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        impl StatusCode {
            $(
                $(#[$doc])*
                pub const $id: Self = Self($int);
            )*

            /// Returns the reason phrase, e.g: `"OK"`.
            ///
            /// Codes not present in the table yield `"Unknown"`.
            #[inline]
            pub const fn reason(&self) -> &'static str {
                match self.0 {
                    $(
                        $int => $msg,
                    )*
                    _ => "Unknown",
                }
            }
        }
    };
}

status_codes! {
    /// `200`. The request succeeded.
    200 OK "OK";
    /// `201`. The request succeeded, and a new resource was created as a result.
    201 CREATED "Created";
    /// `202`. The request has been accepted for processing, but processing has
    /// not been completed.
    202 ACCEPTED "Accepted";
    /// `204`. There is no content to send for this request, but the headers are
    /// useful.
    204 NO_CONTENT "No Content";
    /// `301`. The URI of the requested resource has been changed permanently.
    301 MOVED_PERMANENTLY "Moved Permanently";
    /// `302`. The URI of the requested resource has been changed temporarily.
    302 FOUND "Found";
    /// `304`. Tells the client that the response has not been modified, so the
    /// cached version can continue to be used.
    304 NOT_MODIFIED "Not Modified";
    /// `307`. Directs the client to the requested resource at another URI with
    /// the same method that was used in the prior request.
    307 TEMPORARY_REDIRECT "Temporary Redirect";
    /// `308`. The resource is now permanently located at another URI; the
    /// request method must not change.
    308 PERMANENT_REDIRECT "Permanent Redirect";
    /// `400`. The server cannot or will not process the request due to
    /// something that is perceived to be a client error.
    400 BAD_REQUEST "Bad Request";
    /// `401`. Although the HTTP standard specifies "unauthorized", semantically
    /// this response means "unauthenticated".
    401 UNAUTHORIZED "Unauthorized";
    /// `403`. The client's identity is known to the server, but the client does
    /// not have access rights to the content.
    403 FORBIDDEN "Forbidden";
    /// `404`. The server cannot find the requested resource.
    404 NOT_FOUND "Not Found";
    /// `405`. The request method is known by the server but is not supported by
    /// the target resource.
    405 METHOD_NOT_ALLOWED "Method Not Allowed";
    /// `409`. The request conflicts with the current state of the server.
    409 CONFLICT "Conflict";
    /// `422`. The request was well-formed but was unable to be followed due to
    /// semantic errors.
    422 UNPROCESSABLE_ENTITY "Unprocessable Entity";
    /// `429`. The user has sent too many requests in a given amount of time.
    429 TOO_MANY_REQUESTS "Too Many Requests";
    /// `500`. The server has encountered a situation it does not know how to
    /// handle.
    500 INTERNAL_SERVER_ERROR "Internal Server Error";
    /// `501`. The request method is not supported by the server and cannot be
    /// handled.
    501 NOT_IMPLEMENTED "Not Implemented";
    /// `502`. The server, while working as a gateway, got an invalid response.
    502 BAD_GATEWAY "Bad Gateway";
    /// `503`. The server is not ready to handle the request.
    503 SERVICE_UNAVAILABLE "Service Unavailable";
    /// `504`. The server is acting as a gateway and cannot get a response in
    /// time.
    504 GATEWAY_TIMEOUT "Gateway Timeout";
}

impl StatusCode {
    /// Returns the status code value, e.g: `200`.
    #[inline]
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Returns `true` for a `2xx` code.
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns `true` for a `3xx` code.
    #[inline]
    pub const fn is_redirect(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns `true` for a `4xx` code.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns `true` for a `5xx` code.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl From<u16> for StatusCode {
    #[inline]
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("StatusCode").field(&format_args!("{self}")).finish()
    }
}

#[cfg(test)]
mod test {
    use super::StatusCode;

    #[test]
    fn test_reason() {
        assert_eq!(StatusCode::OK.reason(), "OK");
        assert_eq!(StatusCode::CREATED.reason(), "Created");
        assert_eq!(StatusCode::NOT_FOUND.reason(), "Not Found");
        assert_eq!(StatusCode::from(504).reason(), "Gateway Timeout");
    }

    #[test]
    fn test_unmapped_code_falls_back() {
        assert_eq!(StatusCode::from(499).reason(), "Unknown");
        assert_eq!(StatusCode::from(499).to_string(), "499 Unknown");
    }

    #[test]
    fn test_classification() {
        assert!(StatusCode::NO_CONTENT.is_success());
        assert!(StatusCode::FOUND.is_redirect());
        assert!(StatusCode::BAD_REQUEST.is_client_error());
        assert!(StatusCode::BAD_GATEWAY.is_server_error());
        assert!(!StatusCode::OK.is_client_error());
    }
}
