/// HTTP request method.
///
/// This API follows the [RFC9110] methods and the PATCH method from [RFC5789].
///
/// Arbitrary method tokens are not supported.
///
/// [RFC5789]: <https://www.rfc-editor.org/rfc/rfc5789>
/// [RFC9110]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-methods>
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(u8);

macro_rules! methods {
    (
        $(
            $(#[$doc:meta])*
            $idx:literal $name:ident $bytes:literal;
        )*
    ) => {
        impl Method {
            $(
                $(#[$doc])*
                pub const $name: Self = Self($idx);
            )*

            /// Create [`Method`] from bytes.
            #[inline]
            pub const fn from_bytes(src: &[u8]) -> Option<Method> {
                match src {
                    $(
                        $bytes => Some(Self::$name),
                    )*
                    _ => None,
                }
            }

            /// Returns string representation of the method.
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self.0 {
                    $(
                        $idx => stringify!($name),
                    )*
                    // Method value is privately constructed
                    _ => unreachable!(),
                }
            }
        }
    };
}

methods! {
    /// The GET method requests transfer of a current selected representation
    /// for the target resource.
    0 GET b"GET";
    /// The HEAD method is identical to GET except that the server MUST NOT
    /// send content in the response.
    1 HEAD b"HEAD";
    /// The POST method requests that the target resource process the
    /// representation enclosed in the request.
    2 POST b"POST";
    /// The PUT method requests that the state of the target resource be
    /// created or replaced with the enclosed representation.
    3 PUT b"PUT";
    /// The DELETE method requests that the origin server remove the
    /// association between the target resource and its functionality.
    4 DELETE b"DELETE";
    /// The CONNECT method requests establishing a tunnel to the destination
    /// origin server.
    5 CONNECT b"CONNECT";
    /// The OPTIONS method requests information about the communication
    /// options available for the target resource.
    6 OPTIONS b"OPTIONS";
    /// The TRACE method requests a remote application-level loop-back of the
    /// request message.
    7 TRACE b"TRACE";
    /// The PATCH method requests that a set of changes be applied to the
    /// resource identified by the request target.
    8 PATCH b"PATCH";
}

impl std::str::FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or(UnknownMethod)
    }
}

impl std::fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Error =====

pub struct UnknownMethod;

impl std::error::Error for UnknownMethod { }

impl std::fmt::Debug for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}

impl std::fmt::Display for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}
