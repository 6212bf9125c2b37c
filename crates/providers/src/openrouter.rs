//! OpenRouter adapter.
//!
//! Works with OpenRouter and any other endpoint that follows the OpenAI
//! chat completions contract.  OpenRouter fronts many models behind one
//! API, so the model name carries its own vendor prefix
//! (e.g. `anthropic/claude-3-haiku`).

use crate::traits::{ChatRequest, ChatResponse, LlmProvider};
use crate::util::{from_reqwest, resolve_api_key};
use cicerone_domain::capability::LlmCapabilities;
use cicerone_domain::chat::{ContentPart, Message, MessageContent, Role};
use cicerone_domain::config::ProviderConfig;
use cicerone_domain::error::{Error, Result};
use serde_json::Value;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An LLM provider adapter for an OpenAI-compatible multi-model gateway.
pub struct OpenRouterProvider {
    id: String,
    base_url: String,
    api_key: String,
    auth_header: String,
    auth_prefix: String,
    default_model: String,
    /// `HTTP-Referer` attribution header, when configured.
    referer: Option<String>,
    /// `X-Title` attribution header, when configured.
    title: Option<String>,
    capabilities: LlmCapabilities,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Create a new provider from the deserialized provider config.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self> {
        let api_key = resolve_api_key(&cfg.auth)?;
        let auth_header = cfg.auth.header.clone().unwrap_or_else(|| "Authorization".into());
        let auth_prefix = cfg.auth.prefix.clone().unwrap_or_else(|| "Bearer ".into());
        let default_model = cfg
            .default_model
            .clone()
            .unwrap_or_else(|| "anthropic/claude-3-haiku".into());

        let capabilities = LlmCapabilities {
            supports_vision: true,
            context_window_tokens: Some(128_000),
            max_output_tokens: Some(16_384),
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_header,
            auth_prefix,
            default_model,
            referer: cfg.referer.clone(),
            title: cfg.title.clone(),
            capabilities,
            client,
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        let header_value = format!("{}{}", self.auth_prefix, self.api_key);
        let mut builder = self
            .client
            .post(url)
            .header(&self.auth_header, &header_value)
            .header("Content-Type", "application/json");
        if let Some(ref referer) = self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.title {
            builder = builder.header("X-Title", title);
        }
        builder
    }

    fn build_chat_body(&self, req: &ChatRequest) -> Value {
        let model = req
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let messages: Vec<Value> = req.messages.iter().map(msg_to_openai).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = req.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max) = req.max_tokens {
            body["max_tokens"] = serde_json::json!(max);
        }
        body
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Message serialization helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn msg_to_openai(msg: &Message) -> Value {
    match &msg.content {
        MessageContent::Text(t) => serde_json::json!({
            "role": role_to_str(msg.role),
            "content": t,
        }),
        MessageContent::Parts(parts) => {
            let content: Vec<Value> = parts.iter().map(part_to_openai).collect();
            serde_json::json!({
                "role": role_to_str(msg.role),
                "content": content,
            })
        }
    }
}

fn part_to_openai(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => serde_json::json!({
            "type": "text",
            "text": text,
        }),
        ContentPart::Image { data, media_type, detail } => {
            let mt = media_type.as_deref().unwrap_or("image/jpeg");
            let mut image_url = serde_json::json!({
                "url": format!("data:{mt};base64,{data}"),
            });
            if let Some(detail) = detail {
                image_url["detail"] = Value::String(detail.clone());
            }
            serde_json::json!({
                "type": "image_url",
                "image_url": image_url,
            })
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_openrouter_response(body: &Value, requested_model: &str) -> ChatResponse {
    let content = body
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let model = body
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_model)
        .to_string();

    ChatResponse { content, model }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_chat_body(&req);
        let requested_model = body["model"].as_str().unwrap_or_default().to_string();

        tracing::debug!(provider = %self.id, url = %url, model = %requested_model, "openrouter chat request");

        let resp = self
            .authed_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        Ok(parse_openrouter_response(&resp_json, &requested_model))
    }

    fn capabilities(&self) -> &LlmCapabilities {
        &self.capabilities
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
