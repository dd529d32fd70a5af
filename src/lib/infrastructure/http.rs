//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::Context;
use axum::{extract::Request, routing::get, Json, Router};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info, info_span};
use utoipa::OpenApi;

use crate::domain::communication::test_mail::TestMailService;

use handlers::{admin, panic_handler};
use open_api::ApiDocs;
use state::AppState;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(long = "http-port", env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    address: SocketAddr,
}

impl HttpServer {
    /// Returns a new HTTP server for the port specified in `config`.
    pub async fn new(
        state: AppState<impl TestMailService>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);
        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));

        Ok(Self { router, address })
    }

    /// Runs the HTTP server until a shutdown signal is received.
    #[mutants::skip]
    pub async fn run(self) -> anyhow::Result<()> {
        debug!("HTTP server listening on {}", self.address);

        let handle = Handle::new();

        tokio::spawn(shutdown_signal(handle.clone()));

        axum_server::bind(self.address)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await
            .with_context(|| format!("failed to serve on {}", self.address))?;

        Ok(())
    }
}

/// Create the application's router
pub fn router<T: TestMailService>(state: AppState<T>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .route("/api/openapi.json", get(Json(ApiDocs::openapi())))
        .nest("/admin", admin::router())
        .layer(trace_layer)
        .layer(CatchPanicLayer::custom(panic_handler))
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down gracefully");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
