//! Request handler hook.
use crate::{request::Request, response::Response};

// ===== Service =====

/// Per-request handler invoked by the connection pipeline.
///
/// Called once a complete [`Request`] is parsed; produces the [`Response`]
/// that is written back to the peer. Routing and middleware are layers built
/// atop this hook, outside the core.
pub trait Service: Send + Sync + 'static {
    type Future: Future<Output = Response> + Send;

    fn call(&self, request: Request) -> Self::Future;
}

// ===== FromFn =====

/// Create a [`Service`] from an async function.
///
/// ```rust
/// use waku::{Request, Response, from_fn};
///
/// let service = from_fn(|req: Request| async move {
///     let mut res = Response::new();
///     res.text(&req.uri);
///     res
/// });
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn { f }
}

#[derive(Debug, Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F, Fut> Service for FromFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    type Future = Fut;

    fn call(&self, request: Request) -> Self::Future {
        (self.f)(request)
    }
}
