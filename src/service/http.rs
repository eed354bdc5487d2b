//! HTTP transport — maps HTTP requests to operation dispatch and opens
//! subscription streams as server-sent events.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:operation` — dispatch an operation. Body = JSON arguments, may be empty.
//! - `GET /subscriptions/:channel` — server-sent events, one per created record.
//! - `GET /health` — `{ "ok": true, "operations": [...], "channels": [...] }`.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::error::HandlerError;
use super::service::Service;
use crate::bus::TopicBus;
use crate::catalog::{Catalog, CatalogEvent, Channel};

/// Build an axum `Router` serving the catalog operations and subscriptions.
pub fn router(service: Arc<Service<Catalog>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/subscriptions/:channel", get(subscription_handler))
        .route("/:operation", post(operation_handler))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serve the catalog over HTTP until Ctrl-C.
///
/// On shutdown the bus is closed so open subscription streams end and the
/// server can drain.
pub async fn serve(service: Arc<Service<Catalog>>, addr: SocketAddr) -> Result<(), std::io::Error> {
    let bus = service.state().bus().clone();
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "catalog endpoint ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(bus))
        .await
}

async fn shutdown_signal(bus: TopicBus<CatalogEvent>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down, closing subscriptions");
    bus.close();
}

/// `GET /health`
async fn health_handler(State(service): State<Arc<Service<Catalog>>>) -> impl IntoResponse {
    let channels: Vec<&str> = Channel::ALL.iter().map(Channel::name).collect();
    Json(json!({
        "ok": true,
        "operations": service.operations(),
        "channels": channels,
    }))
}

/// `POST /:operation` — dispatch with the JSON body as arguments.
async fn operation_handler(
    State(service): State<Arc<Service<Catalog>>>,
    Path(operation): Path<String>,
    body: Bytes,
) -> Response {
    let result = arguments(&body).and_then(|input| service.dispatch(&operation, input));
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

/// A blank body means no arguments.
fn arguments(body: &[u8]) -> Result<Value, HandlerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    Ok(serde_json::from_slice(body)?)
}

/// `GET /subscriptions/:channel` — stream notifications until the client goes away.
async fn subscription_handler(
    State(service): State<Arc<Service<Catalog>>>,
    Path(channel): Path<String>,
) -> Response {
    let channel = match channel.parse::<Channel>() {
        Ok(channel) => channel,
        Err(e) => return error_response(e.into()),
    };

    info!(channel = channel.name(), "subscription opened");
    let events = service.state().subscribe(channel).map(move |notification| {
        let event = Event::default().event(channel.name());
        Ok::<_, Infallible>(match event.json_data(&notification) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, channel = channel.name(), "failed to encode notification");
                Event::default().event("error").data(err.to_string())
            }
        })
    });

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn error_response(e: HandlerError) -> Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({ "error": e.to_string() });
    (status, Json(body)).into_response()
}
