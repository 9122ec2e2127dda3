//! Minimal HTTP/1.1 server core.
//!
//! Three primitives make up the crate: an accept loop distributing
//! connections across a fixed-size worker pool ([`Server`]), an incremental
//! parser turning raw request bytes into a [`Request`]
//! ([`parser::ParseState`]), and a fluent [`Response`] that serializes back
//! into HTTP/1.1 wire bytes. Routing, middleware, TLS, and HTTP/2 are layers
//! built atop these, out of scope here.
//!
//! ```no_run
//! use waku::{Request, Response, Server, from_fn};
//!
//! let server = Server::bind("127.0.0.1", 8080, 4).unwrap();
//! server.run(from_fn(|req: Request| async move {
//!     let mut res = Response::new();
//!     res.text(&format!("hello from {}", req.uri));
//!     res
//! }));
//! ```
#![warn(missing_debug_implementations)]

pub mod http;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;

mod conn;
pub mod server;
pub mod service;

pub use headers::HeaderMap;
pub use request::Request;
pub use response::Response;
pub use server::{BindError, Server};
pub use service::{Service, from_fn};
