//! HTTP server.

pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::Aggregator;
use crate::config::Config;
use transport::AppState;

/// Author finder web server.
pub struct FinderServer {
    state: Arc<AppState>,
}

impl FinderServer {
    /// Create a server with a fresh in-memory result cache.
    #[must_use]
    pub fn new(config: &Config, aggregator: Arc<dyn Aggregator>) -> Self {
        Self { state: Arc::new(AppState::new(config, aggregator)) }
    }

    /// Router serving this server's state.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        transport::create_router(Arc::clone(&self.state))
    }

    /// Run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for FinderServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderServer").finish_non_exhaustive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
