//! Server lifecycle: bind, serve, graceful shutdown

use std::future::{Future, IntoFuture};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::timeout::TimeoutLayer;

use overlap_types::{Error, Result};

use crate::config::{Configuration, ServerConfig};

/// Bound every request by the configured timeout, if any
pub fn with_timeouts(router: Router, config: &ServerConfig) -> Router {
    match config.request_timeout() {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    }
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
pub async fn run(config: &Configuration, router: Router) -> Result<()> {
    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(
        "Starting the REST application with {} environment and with port is {}",
        config.environment_name,
        config.server.port
    );

    let router = with_timeouts(router, &config.server);
    serve(listener, router, shutdown_signal(), config.server.shutdown_grace()).await
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// In-flight connections then get at most `grace` to finish before the
/// server is dropped.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F, grace: Duration) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let signal = async move {
        shutdown.await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .into_future();
    let deadline = async move {
        if signalled_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result?,
        _ = deadline => {
            tracing::warn!("shutdown grace of {:?} elapsed, dropping open connections", grace);
        }
    }

    tracing::info!("Server exiting");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutting down server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "done"
            }),
        );
        let config = ServerConfig {
            read_timeout: 1,
            write_timeout: 0,
            ..Default::default()
        };

        let response = with_timeouts(slow, &config)
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_zero_timeouts_leave_router_untouched() {
        let app = Router::new().route("/", get(|| async { "ok" }));
        let config = ServerConfig {
            read_timeout: 0,
            write_timeout: 0,
            ..Default::default()
        };

        let response = with_timeouts(app, &config)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_serve_returns_after_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let app = Router::new().route("/", get(|| async { "ok" }));

        let result = serve(listener, app, async {}, Duration::from_secs(1)).await;
        assert!(result.is_ok());
    }
}
