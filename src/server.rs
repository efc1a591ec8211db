// src/server.rs
// HTTP server lifecycle: background sweeper, serving, and orderly shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::create_router;
use crate::session::spawn_session_sweeper;
use crate::state::AppState;

/// Serve the portal on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before returning and the session sweeper
/// is stopped with the server.
pub async fn run<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let sweep_interval = Duration::from_secs(state.config.session_sweep_interval_secs);
    let sweeper = spawn_session_sweeper(state.sessions.clone(), sweep_interval);
    info!(
        "Session sweeper started - running every {} seconds",
        sweep_interval.as_secs()
    );

    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }

    let app = create_router(state);
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;

    sweeper.abort();
    served?;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM (Ctrl+C elsewhere).
///
/// If no handler can be installed the future never resolves and the process
/// must be killed.
pub async fn shutdown_signal() {
    wait_for_signal().await;
    info!("Shutdown signal received, draining connections");
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Signal handlers unavailable: {}", e);
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = interrupt.recv() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}
