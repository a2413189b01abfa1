use axum::body::Body;
use axum::http::{header, Method};
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
}

pub fn build_router(pool: SqlitePool) -> Router {
    let state = AppState { pool };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router())
        .merge(questions_router())
        .merge(quizzes_router())
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(pool: SqlitePool, addr: &str) -> anyhow::Result<()> {
    let app = build_router(pool);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    if let Err(error) = encoder.encode(&metrics, &mut buf) {
        tracing::error!(%error, "Cannot encode metrics");
        return Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::empty())
            .unwrap_or_default();
    }
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .unwrap_or_default()
}
