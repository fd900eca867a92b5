//! HTTP server exposing the streaming chat endpoint.
//!
//! `POST /chat` accepts the full conversation as a JSON array of turns and
//! answers with a chunked UTF-8 byte stream of the assistant's reply. Each
//! fragment is written as soon as it arrives from the completion service.

use crate::chat::{ChatPipeline, ConversationTurn};
use crate::cli::Output;
use crate::config::Settings;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    pipeline: ChatPipeline,
}

/// Run the HTTP server.
pub async fn run(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let pipeline = ChatPipeline::from_settings(&settings)?;
    let app = router(pipeline);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Lektor Chat Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat (streaming)", "POST /chat");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(pipeline: ChatPipeline) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(Arc::new(AppState { pipeline }))
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// The streaming chat handler.
///
/// Errors raised before the first fragment become structured JSON responses.
/// Once streaming has begun the status is committed, so a mid-stream error
/// aborts the transport instead of injecting text into the reply. A caller
/// disconnect drops the body stream, which cancels the upstream pull chain.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(conversation): Json<Vec<ConversationTurn>>,
) -> Response {
    match state.pipeline.respond(&conversation).await {
        Ok(fragments) => {
            let bytes = fragments.map(|fragment| fragment.map(Bytes::from));
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                Body::from_stream(bytes),
            )
                .into_response()
        }
        Err(e) if e.is_client_error() => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Chat pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
