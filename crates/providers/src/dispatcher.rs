//! Role-driven provider dispatch.
//!
//! Selects the upstream provider and model from the declared role mapping
//! (text / vision / judge), performs the single synchronous call, and
//! normalizes the result into one `(reply, model)` pair.  There is no
//! retry, no automatic fallback to a second provider, and no partial
//! degradation: an upstream failure surfaces as an error for the caller to
//! convert into the user-facing apology.

use crate::registry::ProviderRegistry;
use crate::traits::{ChatRequest, ChatResponse, LlmProvider};
use cicerone_domain::chat::Message;
use cicerone_domain::config::{GuideRoles, LlmConfig};
use cicerone_domain::error::{Error, Result};
use std::time::Instant;

/// Substituted when an otherwise-successful completion carries no text.
pub const NO_REPLY_PLACEHOLDER: &str = "Désolé, je n'ai pas pu générer de réponse.";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Roles
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The operating role a turn runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideRole {
    Text,
    Vision,
    Judge,
}

impl GuideRole {
    /// Map request facts to a role.  Judge mode wins over vision: the
    /// synthesis prompt is text-only by construction.
    pub fn select(has_image: bool, judge: bool) -> Self {
        if judge {
            GuideRole::Judge
        } else if has_image {
            GuideRole::Vision
        } else {
            GuideRole::Text
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            GuideRole::Text => "text",
            GuideRole::Vision => "vision",
            GuideRole::Judge => "judge",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dispatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Dispatches one chat completion per turn against the role-selected
/// provider and model.
pub struct GuideDispatcher {
    registry: ProviderRegistry,
    roles: GuideRoles,
    max_tokens: u32,
    temperature: f32,
}

impl GuideDispatcher {
    /// Construct the dispatcher from the full LLM config.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            registry: ProviderRegistry::from_config(config),
            roles: config.roles.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Build from an already-constructed registry (useful for testing).
    pub fn new(
        registry: ProviderRegistry,
        roles: GuideRoles,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self { registry, roles, max_tokens, temperature }
    }

    /// Get a reference to the underlying registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The `"provider_id/model"` spec a role resolves to.
    pub fn model_spec(&self, role: GuideRole) -> &str {
        match role {
            GuideRole::Text => &self.roles.text,
            GuideRole::Vision => &self.roles.vision,
            GuideRole::Judge => &self.roles.judge,
        }
    }

    /// Send the compiled messages to the provider the role maps to.
    ///
    /// An empty reply from a successful call is replaced with
    /// [`NO_REPLY_PLACEHOLDER`] so the chat UI always has something to show.
    pub async fn dispatch(
        &self,
        messages: Vec<Message>,
        role: GuideRole,
    ) -> Result<ChatResponse> {
        let spec = self.model_spec(role);
        let (provider_id, model_name) = resolve_model(spec);

        let provider = self.registry.get(provider_id).ok_or_else(|| {
            Error::Config(format!(
                "role '{}' references provider '{}' which is not available",
                role.as_str(),
                provider_id
            ))
        })?;

        if role == GuideRole::Vision && !provider.capabilities().supports_vision {
            return Err(Error::Config(format!(
                "role 'vision' maps to provider '{provider_id}' which does not support vision"
            )));
        }

        let req = ChatRequest {
            messages,
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            model: if model_name.is_empty() {
                None
            } else {
                Some(model_name.to_string())
            },
        };

        let start = Instant::now();
        let mut resp = provider.chat(req).await?;
        tracing::info!(
            provider = %provider_id,
            model = %resp.model,
            role = %role.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            "llm request completed"
        );

        if resp.content.trim().is_empty() {
            resp.content = NO_REPLY_PLACEHOLDER.to_string();
        }
        Ok(resp)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Split a `"provider_id/model_name"` string into its two components.
///
/// If there is no `/`, the entire string is treated as the provider id and
/// an empty model name is returned (the provider's default will be used).
pub fn resolve_model(model_str: &str) -> (&str, &str) {
    match model_str.split_once('/') {
        Some((provider, model)) => (provider, model),
        None => (model_str, ""),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
