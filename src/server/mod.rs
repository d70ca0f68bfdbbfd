//! HTTP surface: settings form, generate endpoint and health check.

mod error;
mod health;
mod logging;
mod router;
mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::engine::EngineFactory;

pub use error::ServerError;
pub use health::HealthStatus;
pub use logging::{init_tracing, LOG_FILE_ENV};
pub use router::{build_router, AppState};
pub use shutdown::ShutdownManager;

/// How many ports above the configured one `try_bind` will try.
pub const PORT_FALLBACK_RANGE: u16 = 100;

pub struct QuizServer {
    pub addr: SocketAddr,
    bind_addr: String,
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl QuizServer {
    pub fn new(config: Config, factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            bind_addr: config.server.bind_addr.clone(),
            listener: None,
            state: AppState::new(config, factory),
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Bind the configured address, falling back to the next free port.
    ///
    /// The listener is kept until `run()` so nothing else can claim the port
    /// in between.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, ServerError> {
        let bind_addr: SocketAddr =
            self.bind_addr
                .parse()
                .map_err(|source| ServerError::InvalidBindAddr {
                    addr: self.bind_addr.clone(),
                    source,
                })?;

        let start_port = bind_addr.port();
        let end_port = start_port.saturating_add(PORT_FALLBACK_RANGE);
        let host = bind_addr.ip();

        for port in start_port..=end_port {
            match TcpListener::bind(SocketAddr::new(host, port)).await {
                Ok(listener) => {
                    let actual_addr = listener.local_addr()?;
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    tracing::info!(addr = %actual_addr, "Server bound");
                    return Ok(actual_addr);
                }
                Err(e) => {
                    tracing::debug!(port, error = %e, "Port busy");
                }
            }
        }

        Err(ServerError::NoAvailablePort {
            start: start_port,
            end: end_port,
        })
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown is signalled.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        tracing::info!(addr = %self.addr, "Starting server");

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to install signal handler");
                }
            })
            .into_future()
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_shutting_down()
    }
}
