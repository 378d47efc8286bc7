//! Listener binding and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use portal_core::Config;
use std::net::SocketAddr;

/// Why the server stopped accepting connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopSignal {
    Interrupt,
    Terminate,
}

fn bind_addr(config: &Config) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], config.server_port))
}

/// Serve `app` until SIGINT/SIGTERM, then drain in-flight requests
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = bind_addr(config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        backend = %config.backend_api_url,
        brand_mode = ?config.brand_resolution_mode,
        proxy_max_body_bytes = config.proxy_max_body_bytes,
        "Portal gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_stop().await;
            tracing::info!(?signal, "Draining connections");
            portal_infra::shutdown_telemetry().await;
        })
        .await?;

    Ok(())
}

/// Resolves on the first stop signal. A handler that cannot be installed
/// is logged and never fires; the other one still can.
async fn wait_for_stop() -> StopSignal {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => StopSignal::Interrupt,
        _ = terminate => StopSignal::Terminate,
    }
}
