//! HTTP/1.1 Request Parser
//!
//! # Parsing
//!
//! [`ParseState`] accumulates bytes across reads, so no call has to assume the
//! whole message is available at once. It is driven by
//! [`parse`][ParseState::parse], whose return type follows the
//! `Result<Option<T>>` convention:
//!
//! - `Ok(Some(..))`, the request line, every header, and the full body have
//!   been consumed; yields the assembled [`Request`] and the stream offset at
//!   which parsing stopped.
//! - `Ok(None)`, more bytes are needed; read from the socket and call `parse`
//!   again.
//! - `Err(..)`, the stream violates the request grammar. The error is
//!   terminal for the connection: the caller answers with a 400-class
//!   response and closes.
//!
//! Parsing is split invariant: a fixed byte sequence produces the same
//! request no matter how it is chunked across calls. Bytes are fed exactly
//! once; anything not yet consumable stays buffered in the state.
//!
//! Bodies are framed by `Content-Length` only; a missing header means a zero
//! length body and `Transfer-Encoding: chunked` is rejected rather than
//! mis-parsed. Bytes trailing the body belong to a subsequent request and are
//! left buffered, excluded from the reported offset.
use std::mem;

use bytes::{Bytes, BytesMut};

use crate::{
    http::{Method, Version},
    request::Request,
};

/// Maximum number of header fields in one request.
pub const MAX_HEADERS: usize = 64;

/// Maximum combined size of the request line and header section in bytes.
pub const MAX_HEAD_SIZE: usize = 16 * 1024;

/// Maximum body size in bytes a request may declare via `Content-Length`.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

// ===== ParseState =====

/// Per-connection incremental parser state.
///
/// Holds the not yet consumed bytes and the partially assembled request,
/// never exposing the latter. The state resets itself after each successful
/// parse, ready for a subsequent request on the same connection.
#[derive(Debug, Default)]
pub struct ParseState {
    buffer: BytesMut,
    consumed: usize,
    head_len: usize,
    phase: Phase,
    method: Method,
    uri: String,
    version: Version,
    headers: Vec<(String, String)>,
    content_length: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Line,
    Headers,
    Body,
}

impl ParseState {
    /// Create new [`ParseState`].
    #[inline]
    pub fn new() -> Self {
        <_>::default()
    }

    /// Total bytes consumed from the stream so far.
    #[inline]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Advance the parser with newly read bytes.
    ///
    /// See the [module docs][self] for the outcome convention.
    pub fn parse(&mut self, input: &[u8]) -> Result<Option<(Request, usize)>, ParseError> {
        self.buffer.extend_from_slice(input);

        loop {
            match self.phase {
                Phase::Line => {
                    let Some(line) = self.take_line()? else {
                        return Ok(None);
                    };

                    let (method, uri, version) = parse_request_line(&line)?;
                    self.method = method;
                    self.uri = uri;
                    self.version = version;
                    self.phase = Phase::Headers;
                }
                Phase::Headers => {
                    let Some(line) = self.take_line()? else {
                        return Ok(None);
                    };

                    if line.is_empty() {
                        self.content_length = body_length(&self.headers)?;
                        self.phase = Phase::Body;
                        continue;
                    }

                    if self.headers.len() == MAX_HEADERS {
                        return Err(ParseError::TooManyHeaders);
                    }

                    self.headers.push(parse_header_line(&line)?);
                }
                Phase::Body => {
                    if self.buffer.len() < self.content_length {
                        return Ok(None);
                    }

                    let body = self.buffer.split_to(self.content_length).freeze();
                    self.consumed += body.len();

                    return Ok(Some((self.complete(body), self.consumed)));
                }
            }
        }
    }

    /// Split one CRLF terminated line off the buffer, terminator excluded.
    fn take_line(&mut self) -> Result<Option<BytesMut>, ParseError> {
        let Some(lf) = self.buffer.iter().position(|b| *b == b'\n') else {
            if self.head_len + self.buffer.len() > MAX_HEAD_SIZE {
                return Err(ParseError::HeadTooLarge);
            }
            return Ok(None);
        };

        if lf == 0 || self.buffer[lf - 1] != b'\r' {
            return Err(ParseError::InvalidSeparator);
        }

        self.consumed += lf + 1;
        self.head_len += lf + 1;
        if self.head_len > MAX_HEAD_SIZE {
            return Err(ParseError::HeadTooLarge);
        }

        let mut line = self.buffer.split_to(lf + 1);
        line.truncate(lf - 1);
        Ok(Some(line))
    }

    /// Assemble the request and reset for the next one.
    fn complete(&mut self, body: Bytes) -> Request {
        self.phase = Phase::Line;
        self.head_len = 0;
        self.content_length = 0;

        Request {
            method: self.method,
            uri: mem::take(&mut self.uri),
            version: self.version,
            headers: mem::take(&mut self.headers),
            body,
        }
    }
}

// ===== Grammar =====

/// Parse a full request line: `METHOD SP URI SP HTTP/<digit>.<digit>`.
fn parse_request_line(line: &[u8]) -> Result<(Method, String, Version), ParseError> {
    let mut parts = line.splitn(3, |b| *b == b' ');

    let method = match parts.next() {
        Some(token) if !token.is_empty() => {
            Method::from_bytes(token).ok_or(ParseError::UnknownMethod)?
        }
        _ => return Err(ParseError::UnknownMethod),
    };

    let uri = match parts.next() {
        Some(target) if !target.is_empty() => {
            str::from_utf8(target).map_err(|_| ParseError::NonUtf8)?.to_owned()
        }
        _ => return Err(ParseError::MissingUri),
    };

    let version = match parts.next() {
        Some(token) => parse_version(token)?,
        None => return Err(ParseError::MissingVersion),
    };

    Ok((method, uri, version))
}

fn parse_version(src: &[u8]) -> Result<Version, ParseError> {
    match src {
        [b'H', b'T', b'T', b'P', b'/', major, b'.', minor]
            if major.is_ascii_digit() && minor.is_ascii_digit() =>
        {
            Ok(Version::new(*major - b'0', *minor - b'0'))
        }
        _ => Err(ParseError::InvalidVersion),
    }
}

/// Parse a full header line: `name: value`, value trimmed of surrounding
/// whitespace.
fn parse_header_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let colon = line
        .iter()
        .position(|b| *b == b':')
        .ok_or(ParseError::MissingColon)?;

    let name = str::from_utf8(&line[..colon]).map_err(|_| ParseError::NonUtf8)?;
    if name.is_empty() || name.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(ParseError::InvalidHeaderName);
    }

    let value = str::from_utf8(&line[colon + 1..])
        .map_err(|_| ParseError::NonUtf8)?
        .trim_ascii();

    Ok((name.to_owned(), value.to_owned()))
}

/// Resolve the body length declared by the header section.
fn body_length(headers: &[(String, String)]) -> Result<usize, ParseError> {
    let mut length = 0;

    for (name, value) in headers {
        if name.eq_ignore_ascii_case("transfer-encoding") {
            if value.to_ascii_lowercase().contains("chunked") {
                return Err(ParseError::UnsupportedFraming);
            }
        } else if name.eq_ignore_ascii_case("content-length") {
            length = value
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength)?;
        }
    }

    if length > MAX_BODY_SIZE {
        return Err(ParseError::BodyTooLarge);
    }

    Ok(length)
}

// ===== Error =====

/// Error for a byte stream that is not a well-formed HTTP/1.1 request.
///
/// Every variant is terminal for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Method token is unrecognized.
    UnknownMethod,
    /// Request line has no target.
    MissingUri,
    /// Request line ends before the version token.
    MissingVersion,
    /// Version token does not match `HTTP/<digit>.<digit>`.
    InvalidVersion,
    /// A line terminator other than CRLF.
    InvalidSeparator,
    /// Header line without a colon.
    MissingColon,
    /// Header name is empty or contains whitespace.
    InvalidHeaderName,
    /// Request target or header is not valid UTF-8.
    NonUtf8,
    /// `Content-Length` value is not a number.
    InvalidContentLength,
    /// `Transfer-Encoding: chunked` is not supported.
    UnsupportedFraming,
    /// More than [`MAX_HEADERS`] header fields.
    TooManyHeaders,
    /// Request line and headers exceed [`MAX_HEAD_SIZE`].
    HeadTooLarge,
    /// Declared `Content-Length` exceeds [`MAX_BODY_SIZE`].
    BodyTooLarge,
}

impl std::error::Error for ParseError { }

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnknownMethod => f.write_str("unknown method"),
            Self::MissingUri => f.write_str("missing request target"),
            Self::MissingVersion => f.write_str("missing http version"),
            Self::InvalidVersion => f.write_str("invalid http version"),
            Self::InvalidSeparator => f.write_str("invalid line separator"),
            Self::MissingColon => f.write_str("header line without colon"),
            Self::InvalidHeaderName => f.write_str("invalid header name"),
            Self::NonUtf8 => f.write_str("non utf8 bytes"),
            Self::InvalidContentLength => f.write_str("invalid content length"),
            Self::UnsupportedFraming => f.write_str("chunked transfer encoding is not supported"),
            Self::TooManyHeaders => f.write_str("too many headers"),
            Self::HeadTooLarge => f.write_str("request head too large"),
            Self::BodyTooLarge => f.write_str("request body too large"),
        }
    }
}
