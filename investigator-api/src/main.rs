//! Video investigation HTTP service

mod routes;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use dotenv::dotenv;
use investigator::config::AnalyzerArgs;
use investigator::logging;
use investigator::pipeline::Analyzer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
];

#[derive(Parser, Debug)]
#[command(
    name = "investigator-api",
    about = "Serve video link validation, score classification and analysis over HTTP"
)]
struct ApiCli {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "INVESTIGATOR_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    #[command(flatten)]
    analyzer: AnalyzerArgs,
}

/// Shared across handlers. Every analysis request gets its own submission.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub timeout: Duration,
}

fn router(state: AppState) -> Router {
    let origins = DEV_ORIGINS.map(HeaderValue::from_static);
    Router::new()
        .route("/", get(routes::root))
        .route("/api/health", get(routes::health))
        .route("/api/validate", post(routes::validate))
        .route("/api/classify/:score", get(routes::classify_score))
        .route("/api/analyze", post(routes::analyze))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init("investigator=info,investigator_api=info,tower_http=debug");

    let cli = ApiCli::parse();
    let analyzer = cli.analyzer.build().context("failed to configure analyzer")?;
    if let Analyzer::Live(live) = &analyzer {
        match live.fetcher.health().await {
            Ok(health) => info!(service = %health.service, status = %health.status, "transcription backend reachable"),
            Err(err) => warn!(backend = %live.fetcher.base(), error = %err, "transcription backend not reachable yet"),
        }
    }

    let state = AppState {
        analyzer: Arc::new(analyzer),
        timeout: cli.analyzer.timeout(),
    };

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "investigator-api listening");
    axum::serve(listener, router(state))
        .await
        .context("server shutdown")?;
    Ok(())
}
