use anyhow::Context;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::{info, warn};

use hydrogen_cloud::logging::{init_logging, DEFAULT_FILTER};
use hydrogen_cloud::{CloudQuery, CloudSampler};

const ADDR_VAR: &str = "HYDROGEN_CLOUD_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

async fn electron_cloud(Query(q): Query<CloudQuery>) -> Response {
    let job = match q.resolve() {
        Ok(job) => job,
        Err(e) => {
            warn!(error = %e, "rejected electron cloud request");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let result = tokio::task::spawn_blocking(move || job.run(&CloudSampler::new())).await;
    match result {
        Ok(Ok(points)) => Json(points).into_response(),
        Ok(Err(e)) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn app() -> Router {
    Router::new().route("/electronCloud", get(electron_cloud))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(DEFAULT_FILTER).context("failed to initialize logging")?;

    let addr: SocketAddr = std::env::var(ADDR_VAR)
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .with_context(|| format!("invalid {ADDR_VAR}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Serving on http://{addr}");
    axum::serve(listener, app()).await.context("server error")?;
    Ok(())
}
