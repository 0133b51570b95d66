//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::HttpServerConfig;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Failed to bind server: {0}")]
    Bind(std::io::Error),

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Bind the configured address and serve `app` until `shutdown` resolves.
///
/// Returns once in-flight connections have drained.
pub async fn start_server<F>(
    app: Router,
    http: &HttpServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", http.host, http.port).parse()?;

    let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
    tracing::info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        let http = HttpServerConfig {
            host: "not a host".to_string(),
            port: 3000,
        };
        let err = start_server(Router::new(), &http, async {}).await.unwrap_err();
        assert!(matches!(err, ServerError::Address(_)));
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let http = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        // Shutdown resolves immediately; the server binds, drains and returns
        start_server(Router::new(), &http, async {}).await.unwrap();
    }
}
