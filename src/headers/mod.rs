//! Case-insensitive header storage.
mod map;

pub use map::HeaderMap;
