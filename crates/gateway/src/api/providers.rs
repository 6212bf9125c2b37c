use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use cicerone_providers::GuideRole;

use crate::state::AppState;

/// Provider readiness — used by health probes.
///
/// Reports 200 when at least one provider initialized, 503 otherwise, with
/// the registered provider ids and the role → model wiring either way.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let providers = state.llm.registry().list_providers();
    let ready = !providers.is_empty();

    let body = Json(serde_json::json!({
        "ready": ready,
        "providers": providers,
        "roles": {
            "text": state.llm.model_spec(GuideRole::Text),
            "vision": state.llm.model_spec(GuideRole::Vision),
            "judge": state.llm.model_spec(GuideRole::Judge),
        },
    }));

    if ready {
        (StatusCode::OK, body).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    }
}
