//! The guide turn — request facts in, normalized reply out.
//!
//! `compile_turn` is the pure half: it runs the whole context-to-prompt
//! pipeline (language resolution, context assembly, instruction
//! compilation, history windowing, multimodal message building) with no
//! I/O, so identical input always compiles to an identical provider
//! payload.  `run_guide_turn` adds the single network suspension point and
//! the post-processing of the reply.

use cicerone_domain::chat::Message;
use cicerone_domain::config::GuideConfig;
use cicerone_domain::error::Result;
use cicerone_domain::tour::{ConversationTurn, LocationContext};
use cicerone_prompt::{context, history, instructions, language, message, scenes};
use cicerone_providers::GuideRole;

use crate::state::AppState;

/// Sentinel scene id when the request does not declare one.
const UNKNOWN_SCENE: &str = "unknown";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Turn input / output
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default)]
pub struct GuideTurnInput {
    pub message: String,
    pub context: Option<LocationContext>,
    pub history: Vec<ConversationTurn>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub judge: bool,
}

#[derive(Debug, Clone)]
pub struct GuideTurnOutput {
    pub reply: String,
    pub scene: String,
    pub suggested_scene: Option<String>,
    pub vision_used: bool,
    pub language: String,
    pub model: String,
}

/// The provider payload a turn compiles to, before any network call.
pub struct CompiledTurn {
    pub messages: Vec<Message>,
    pub role: GuideRole,
    pub language: language::ResolvedLanguage,
    pub vision_used: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Compilation (pure)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compile one turn into the ordered message sequence sent upstream.
pub fn compile_turn(guide: &GuideConfig, input: &GuideTurnInput) -> CompiledTurn {
    let lang = language::resolve(input.language.as_deref());
    let vision_used = input.image.is_some();

    let context_block = context::assemble(input.context.as_ref());
    let instruction =
        instructions::compile(&context_block, vision_used, lang.display_name, input.judge);

    let window = if vision_used {
        guide.history_window_vision
    } else {
        guide.history_window
    };

    let mut messages = Vec::with_capacity(window + 2);
    messages.push(Message::system(instruction));
    messages.extend(history::window(&input.history, window));
    messages.push(message::build_user_turn(&input.message, input.image.as_deref()));

    CompiledTurn {
        messages,
        role: GuideRole::select(vision_used, input.judge),
        language: lang,
        vision_used,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Execution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run one guide turn: compile, dispatch, extract the scene suggestion.
pub async fn run_guide_turn(
    state: &AppState,
    input: GuideTurnInput,
) -> Result<GuideTurnOutput> {
    let request_id = uuid::Uuid::new_v4();
    let compiled = compile_turn(&state.config.guide, &input);

    tracing::info!(
        request_id = %request_id,
        role = ?compiled.role,
        language = compiled.language.code,
        vision = compiled.vision_used,
        history_turns = compiled.messages.len().saturating_sub(2),
        "guide turn compiled"
    );

    let resp = state.llm.dispatch(compiled.messages, compiled.role).await?;

    let current_location = input
        .context
        .as_ref()
        .and_then(|c| c.location())
        .unwrap_or("");
    let suggested_scene =
        scenes::suggest(&resp.content, current_location).map(str::to_string);

    let scene = input
        .context
        .as_ref()
        .and_then(|c| c.current_scene_id.clone())
        .unwrap_or_else(|| UNKNOWN_SCENE.to_string());

    tracing::info!(
        request_id = %request_id,
        model = %resp.model,
        suggested_scene = ?suggested_scene,
        "guide turn completed"
    );

    Ok(GuideTurnOutput {
        reply: resp.content,
        scene,
        suggested_scene,
        vision_used: compiled.vision_used,
        language: compiled.language.code.to_string(),
        model: resp.model,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
