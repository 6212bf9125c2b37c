//! Integration tests for the dispatch layer — full round-trip without any
//! upstream service.
//!
//! These tests validate the flow across modules (registry + dispatcher)
//! with a scripted provider. All tests are pure and deterministic.

use cicerone_domain::capability::LlmCapabilities;
use cicerone_domain::chat::Message;
use cicerone_domain::config::{AuthConfig, GuideRoles, LlmConfig, ProviderConfig, ProviderKind};
use cicerone_domain::error::Result;
use cicerone_providers::{
    ChatRequest, ChatResponse, GuideDispatcher, GuideRole, LlmProvider, ProviderRegistry,
    NO_REPLY_PLACEHOLDER,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct ScriptedProvider {
    id: String,
    reply: String,
    capabilities: LlmCapabilities,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn vision_capable(id: &str, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            reply: reply.into(),
            capabilities: LlmCapabilities {
                supports_vision: true,
                ..Default::default()
            },
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
        let model = req.model.clone().unwrap_or_else(|| "scripted-default".into());
        self.requests.lock().unwrap().push(req);
        Ok(ChatResponse { content: self.reply.clone(), model })
    }

    fn capabilities(&self) -> &LlmCapabilities {
        &self.capabilities
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

fn dispatcher_over(provider: Arc<ScriptedProvider>) -> GuideDispatcher {
    let mut providers: HashMap<String, Arc<dyn LlmProvider>> = HashMap::new();
    providers.insert(provider.id.clone(), provider);
    GuideDispatcher::new(
        ProviderRegistry::new(providers),
        GuideRoles {
            text: "guide/petit-modele".into(),
            vision: "guide/grand-modele".into(),
            judge: "guide/grand-modele".into(),
        },
        500,
        0.7,
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Registry construction from config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn provider_config(id: &str, kind: ProviderKind, key: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        id: id.into(),
        kind,
        base_url: "https://api.example.test".into(),
        default_model: None,
        referer: None,
        title: None,
        auth: AuthConfig {
            key: key.map(str::to_string),
            ..Default::default()
        },
    }
}

#[test]
fn registry_builds_both_adapter_kinds_from_config() {
    let config = LlmConfig {
        providers: vec![
            provider_config("openrouter", ProviderKind::Openrouter, Some("sk-or")),
            provider_config("anthropic", ProviderKind::Anthropic, Some("sk-ant")),
        ],
        ..Default::default()
    };
    let registry = ProviderRegistry::from_config(&config);
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.list_providers(),
        vec!["anthropic".to_string(), "openrouter".to_string()]
    );
    assert_eq!(registry.get("openrouter").unwrap().provider_id(), "openrouter");
}

#[test]
fn registry_skips_provider_with_unresolvable_key() {
    let config = LlmConfig {
        providers: vec![
            provider_config("openrouter", ProviderKind::Openrouter, Some("sk-or")),
            provider_config("anthropic", ProviderKind::Anthropic, None),
        ],
        ..Default::default()
    };
    let registry = ProviderRegistry::from_config(&config);
    assert_eq!(registry.len(), 1);
    assert!(registry.get("anthropic").is_none());
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Role-driven dispatch round-trip
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn text_role_round_trip_reaches_role_mapped_model() {
    let provider = ScriptedProvider::vision_capable("guide", "Bienvenue à l'Opéra !");
    let dispatcher = dispatcher_over(provider.clone());

    let resp = dispatcher
        .dispatch(
            vec![Message::system("instructions"), Message::user("bonjour")],
            GuideRole::Text,
        )
        .await
        .unwrap();

    assert_eq!(resp.content, "Bienvenue à l'Opéra !");
    assert_eq!(resp.model, "petit-modele");

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 2);
    assert_eq!(requests[0].max_tokens, Some(500));
    assert_eq!(requests[0].temperature, Some(0.7));
}

#[tokio::test]
async fn vision_and_judge_roles_share_the_large_model() {
    let provider = ScriptedProvider::vision_capable("guide", "ok");
    let dispatcher = dispatcher_over(provider.clone());

    let vision = dispatcher
        .dispatch(vec![Message::user("que voit-on ?")], GuideRole::Vision)
        .await
        .unwrap();
    let judge = dispatcher
        .dispatch(vec![Message::user("candidats...")], GuideRole::Judge)
        .await
        .unwrap();

    assert_eq!(vision.model, "grand-modele");
    assert_eq!(judge.model, "grand-modele");
}

#[tokio::test]
async fn empty_reply_degrades_to_placeholder_not_error() {
    let provider = ScriptedProvider::vision_capable("guide", "");
    let dispatcher = dispatcher_over(provider);

    let resp = dispatcher
        .dispatch(vec![Message::user("bonjour")], GuideRole::Text)
        .await
        .unwrap();
    assert_eq!(resp.content, NO_REPLY_PLACEHOLDER);
}

#[tokio::test]
async fn dispatch_sends_exactly_one_upstream_call_per_turn() {
    let provider = ScriptedProvider::vision_capable("guide", "ok");
    let dispatcher = dispatcher_over(provider.clone());

    dispatcher
        .dispatch(vec![Message::user("bonjour")], GuideRole::Text)
        .await
        .unwrap();

    assert_eq!(provider.requests.lock().unwrap().len(), 1);
}
