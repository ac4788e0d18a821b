//! Local preview server for the output directory.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::SiteConfig;
use crate::error::DriverError;
use crate::watch::{ChangeFilter, WatchStats, WatchTarget, rebuild, rebuild_loop, spawn_watcher};

/// Router serving static files from `out_dir`.
///
/// Directory requests resolve to their `index.html`; everything else
/// (listing, caching headers, traversal checks) is left to `ServeDir`.
pub fn router(out_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(out_dir))
        .layer(TraceLayer::new_for_http())
}

/// Serves `out_dir` on an already-bound listener until `shutdown` resolves.
///
/// ## Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, out_dir: &Path, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(out_dir))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Builds once, serves the output directory, and rebuilds whenever the
/// assets directory or the catalog changes.
///
/// Runs until `shutdown` resolves.
///
/// ## Errors
///
/// Returns an error if the port cannot be bound, the watcher cannot be set
/// up, or the server fails. Build failures are logged.
pub async fn run_serve<F>(config: SiteConfig, shutdown: F) -> Result<WatchStats, DriverError>
where
    F: Future<Output = ()>,
{
    let config = Arc::new(config);
    rebuild(config.clone()).await;

    let listener = TcpListener::bind(config.serve_addr).await?;
    let addr = listener.local_addr()?;
    info!("Running at http://{addr}");

    let targets = vec![
        WatchTarget::recursive(&config.src_dir),
        WatchTarget::file(&config.catalog),
    ];
    let (_watcher, events) = spawn_watcher(&targets)?;
    let filter = ChangeFilter::new(&targets).ignore(&config.out_dir);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let out_dir = config.out_dir.clone();
    let server = tokio::spawn(async move {
        serve(listener, &out_dir, async move {
            let _ = stop_rx.await;
        })
        .await
    });

    let stats = rebuild_loop(config, events, filter, shutdown).await;
    let _ = stop_tx.send(());
    server.await??;
    Ok(stats)
}
