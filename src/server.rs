//! TCP accept loop and worker pool lifecycle.
use std::{
    io,
    net::{IpAddr, SocketAddr, TcpListener as StdTcpListener},
    sync::Arc,
    time::Duration,
};

use tokio::{
    net::TcpListener,
    runtime::{Builder, Runtime},
    signal,
    sync::watch,
    task::{JoinHandle, JoinSet},
};

use crate::{conn, service::Service};

/// Grace period for in-flight connections once shutdown is requested.
const DRAIN_GRACE: Duration = Duration::from_secs(5);

/// HTTP server: a listening socket serviced by a fixed-size worker pool.
///
/// Binding happens at construction and fails fast with [`BindError`].
/// [`start`][Server::start] launches the accept loop onto the reactor and
/// returns immediately; [`stop`][Server::stop] ceases accepting, drains
/// in-flight connections, and returns. Process termination signals (SIGINT,
/// SIGTERM) trigger the same drain path.
///
/// ```no_run
/// use waku::{Request, Response, Server, from_fn};
///
/// let server = Server::bind("127.0.0.1", 8080, 4).unwrap();
/// server.run(from_fn(|_req: Request| async {
///     let mut res = Response::new();
///     res.text("Hello World!");
///     res
/// }));
/// ```
#[derive(Debug)]
pub struct Server {
    listener: Option<TcpListener>,
    addr: SocketAddr,
    runtime: Runtime,
    shutdown: watch::Sender<bool>,
    accept: Option<JoinHandle<()>>,
}

impl Server {
    /// Bind `address:port` and build a reactor with `workers` threads.
    ///
    /// Fails if the address is not a parseable IP literal or the listener
    /// cannot be established; no partial state is retained on failure.
    pub fn bind(address: &str, port: u16, workers: usize) -> Result<Self, BindError> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| BindError::InvalidAddress(address.to_owned()))?;

        let listener = StdTcpListener::bind((ip, port))?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let runtime = Builder::new_multi_thread()
            .worker_threads(workers.max(1))
            .enable_io()
            .enable_time()
            .build()?;

        let listener = {
            let _guard = runtime.enter();
            TcpListener::from_std(listener)?
        };

        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            listener: Some(listener),
            addr,
            runtime,
            shutdown,
            accept: None,
        })
    }

    /// Local address of the listening socket.
    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Launch the accept loop; returns once launched.
    ///
    /// A second call is a no-op.
    pub fn start<S: Service>(&mut self, service: S) {
        let Some(listener) = self.listener.take() else {
            return;
        };

        let tx = self.shutdown.clone();
        self.runtime.spawn(async move {
            shutdown_signal().await;
            let _ = tx.send(true);
        });

        let rx = self.shutdown.subscribe();
        self.accept = Some(
            self.runtime
                .spawn(accept_loop(listener, Arc::new(service), rx)),
        );
    }

    /// Block until the accept loop has shut down and drained.
    pub fn wait(&mut self) {
        if let Some(accept) = self.accept.take() {
            let _ = self.runtime.block_on(accept);
        }
    }

    /// Start, then block until a shutdown signal completes the drain.
    pub fn run<S: Service>(mut self, service: S) {
        self.start(service);
        self.wait();
    }

    /// Request shutdown: stop accepting, wait for in-flight connections to
    /// finish, then return.
    ///
    /// A second call is a no-op.
    pub fn stop(&mut self) {
        let _ = self.shutdown.send(true);
        self.wait();
    }
}

// ===== Accept loop =====

async fn accept_loop<S: Service>(
    listener: TcpListener,
    service: Arc<S>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    log::debug!("accepted {peer}");
                    connections.spawn(conn::serve(stream, Arc::clone(&service)));
                }
                // transient failure, keep accepting
                Err(err) => log::warn!("accept failed: {err}"),
            },
            _ = shutdown.changed() => break,
        }
    }

    // stop accepting, then drain; abort whatever outlives the grace period
    drop(listener);
    let drain = async {
        while connections.join_next().await.is_some() {}
    };
    if tokio::time::timeout(DRAIN_GRACE, drain).await.is_err() {
        log::warn!("drain grace period elapsed, aborting remaining connections");
        connections.shutdown().await;
    }

    log::info!("server stopped");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let Ok(mut term) = signal(SignalKind::terminate()) else {
            let _ = signal::ctrl_c().await;
            return;
        };

        tokio::select! {
            _ = signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}

// ===== Error =====

/// Startup failure: the listening endpoint could not be established.
#[derive(Debug)]
pub enum BindError {
    /// The bind address is not a parseable IPv4/IPv6 literal.
    InvalidAddress(String),
    /// Binding, listening, or reactor setup failed.
    Io(io::Error),
}

impl From<io::Error> for BindError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::error::Error for BindError { }

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidAddress(addr) => write!(f, "invalid bind address `{addr}`"),
            Self::Io(err) => write!(f, "bind failed: {err}"),
        }
    }
}
