//! HTTP surface for the dashboard.
//!
//! The presentation layer fetches controls, dashboard panels, the Markdown report
//! and the CSV export from here. Handlers run synchronously on a current-thread
//! runtime; the resolved table is shared through the loader's cache.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::source::DataLoader;

/// Dashboard HTTP server.
pub struct DashboardServer {
    loader: Arc<DataLoader>,
}

impl DashboardServer {
    #[must_use]
    pub fn new(loader: DataLoader) -> Self {
        Self { loader: Arc::new(loader) }
    }

    /// Run the server until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        // Resolve once up front so the first request doesn't pay for the scan.
        let resolved = self.loader.load();
        tracing::info!(
            provenance = %resolved.provenance,
            rows = resolved.table.len(),
            "Data loaded"
        );

        let router = routes::create_router(self.loader);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for DashboardServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardServer").field("loader", &self.loader).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
