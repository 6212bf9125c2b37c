pub mod chat;
pub mod providers;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the API router.
///
/// `/v1/chat` is the single functional endpoint; the readiness route exists
/// for health probes. OPTIONS preflight is answered by the CORS layer
/// wrapped around this router in `main`, and a non-POST request to
/// `/v1/chat` gets axum's 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/chat", post(chat::chat))
        .route("/v1/models/readiness", get(providers::readiness))
}
