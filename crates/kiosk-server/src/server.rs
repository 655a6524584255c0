//! [`WebServer`] - the start/close lifecycle around the asset router.
//!
//! State machine: `Idle -> Listening -> Draining -> Closed`. Transitions
//! are driven only by [`start`](WebServer::start) and
//! [`close`](WebServer::close), never by request traffic. Each instance
//! owns at most one listening socket, and `close` is the only path that
//! releases it; a process that exits without closing leaves reclamation
//! to the OS.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use kiosk_assets::AssetResolver;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::ServerError;
use crate::router::router;

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Constructed, not yet started.
    Idle,
    /// Bound and accepting connections.
    Listening,
    /// No longer accepting; waiting for in-flight requests.
    Draining,
    /// Socket released. Terminal.
    Closed,
}

struct Active {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

enum Lifecycle {
    Idle,
    Listening(Active),
    Draining,
    Closed,
}

/// HTTP server with an explicit, host-driven lifecycle.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use kiosk_assets::{AssetResolver, EmbeddedBundle};
/// use kiosk_server::WebServer;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let bundle = EmbeddedBundle::load()?;
/// let resolver = Arc::new(AssetResolver::new(Arc::new(bundle))?);
///
/// let server = WebServer::new(resolver);
/// let addr = server.start(8888).await?;
/// // ... host runs ...
/// server.close(Duration::from_secs(5)).await?;
/// # Ok(())
/// # }
/// ```
pub struct WebServer {
    app: axum::Router,
    lifecycle: Mutex<Lifecycle>,
}

impl WebServer {
    /// Create an idle server over the resolver-backed asset router.
    pub fn new(resolver: Arc<AssetResolver>) -> Self {
        Self::with_router(router(resolver))
    }

    /// Create an idle server over an arbitrary router.
    ///
    /// Lets a host wrap the asset routes in its own middleware before
    /// handing the result to the lifecycle.
    pub fn with_router(app: axum::Router) -> Self {
        Self {
            app,
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Bind `127.0.0.1:port` and begin serving.
    ///
    /// Port 0 delegates the choice to the OS; the bound address is
    /// returned and stays queryable through
    /// [`local_addr`](WebServer::local_addr). Returns once the socket is
    /// accepting: the accept loop runs on a spawned task and every
    /// connection is handled concurrently.
    ///
    /// # Errors
    ///
    /// [`ServerError::AlreadyStarted`] unless the server is idle, and
    /// [`ServerError::Bind`] when the socket cannot be bound (port in
    /// use, insufficient permission).
    pub async fn start(&self, port: u16) -> Result<SocketAddr, ServerError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if !matches!(*lifecycle, Lifecycle::Idle) {
            return Err(ServerError::AlreadyStarted);
        }

        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        let app = self.app.clone();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await;
            if let Err(err) = served {
                error!("web server terminated with error: {err}");
            }
        });

        info!(%local_addr, "web server listening");
        *lifecycle = Lifecycle::Listening(Active {
            local_addr,
            cancel,
            task,
        });
        Ok(local_addr)
    }

    /// Stop accepting connections and drain in-flight requests, bounded
    /// by `deadline`.
    ///
    /// Requests still unfinished when the deadline elapses are aborted;
    /// that is logged but the call still succeeds, since the drain is
    /// best-effort by contract. Idempotent: closing an idle, draining,
    /// or already-closed server is a no-op returning `Ok`.
    pub async fn close(&self, deadline: Duration) -> Result<(), ServerError> {
        let active = {
            let mut lifecycle = self.lifecycle.lock().await;
            match std::mem::replace(&mut *lifecycle, Lifecycle::Draining) {
                Lifecycle::Listening(active) => active,
                other => {
                    *lifecycle = other;
                    return Ok(());
                }
            }
        };

        info!(?deadline, "draining web server");
        active.cancel.cancel();

        let mut task = active.task;
        match tokio::time::timeout(deadline, &mut task).await {
            Ok(joined) => {
                if let Err(err) = joined {
                    if err.is_panic() {
                        error!("web server task panicked during drain: {err}");
                    }
                }
            }
            Err(_) => {
                warn!("drain deadline elapsed; aborting remaining in-flight requests");
                task.abort();
                let _ = task.await;
            }
        }

        *self.lifecycle.lock().await = Lifecycle::Closed;
        info!("web server closed");
        Ok(())
    }

    /// The bound address while listening, `None` otherwise.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.lifecycle.lock().await {
            Lifecycle::Listening(active) => Some(active.local_addr),
            _ => None,
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> ServerState {
        match &*self.lifecycle.lock().await {
            Lifecycle::Idle => ServerState::Idle,
            Lifecycle::Listening(_) => ServerState::Listening,
            Lifecycle::Draining => ServerState::Draining,
            Lifecycle::Closed => ServerState::Closed,
        }
    }
}
