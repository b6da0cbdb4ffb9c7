use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pdftext_core::AppConfig;
use pdftext_server::AppState;

#[tokio::main]
async fn main() -> pdftext_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let state = AppState::from_config(config)?;
    let addr = state.config.bind_address();

    info!(
        timeout_secs = state.config.fetch_timeout_secs,
        min_text_length = state.config.min_text_length,
        "PDF text extraction service configured"
    );

    let app = pdftext_server::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("PDF text extraction service listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
