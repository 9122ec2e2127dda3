//! HTTP Protocol.
mod method;
mod status;
mod version;
mod date;

pub mod mime;

pub use method::{Method, UnknownMethod};
pub use status::StatusCode;
pub use version::Version;
pub use date::{HttpDate, httpdate_now};
