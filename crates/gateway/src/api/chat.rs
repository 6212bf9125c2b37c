//! Chat API endpoint — the virtual guide's single functional route.
//!
//! `POST /v1/chat` — non-streaming: returns the full reply envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use cicerone_domain::tour::{ConversationTurn, LocationContext};

use crate::runtime::{run_guide_turn, GuideTurnInput};
use crate::state::AppState;

/// Fixed apology shown whenever a turn fails; the real cause is only logged.
pub const TECHNICAL_APOLOGY: &str =
    "Désolé, je rencontre un problème technique. Réessayez dans quelques instants.";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / response shapes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The visitor's message. Required; validated below rather than at the
    /// serde layer so the error envelope stays consistent.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<LocationContext>,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    /// Base64 screenshot of the current view (raw or data-URL).
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Synthesis mode: the message carries several candidate answers and
    /// the reply merges them.
    #[serde(default, alias = "judgeMode")]
    pub judge: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub scene: String,
    pub suggested_scene: Option<String>,
    pub vision_used: bool,
    pub language: String,
    pub model: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/chat
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = match body.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "message required" })),
            )
                .into_response();
        }
    };

    let input = GuideTurnInput {
        message,
        context: body.context,
        history: body.history,
        image: body.image,
        language: body.language,
        judge: body.judge,
    };

    match run_guide_turn(&state, input).await {
        Ok(out) => Json(ChatReply {
            reply: out.reply,
            scene: out.scene,
            suggested_scene: out.suggested_scene,
            vision_used: out.vision_used,
            language: out.language,
            model: out.model,
        })
        .into_response(),
        Err(e) => {
            // Upstream status and body stay in the logs; the client only
            // ever sees the generic apology.
            tracing::error!(error = %e, "guide turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Erreur serveur",
                    "reply": TECHNICAL_APOLOGY,
                })),
            )
                .into_response()
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
