//! Provider registry.
//!
//! Constructs and holds all configured LLM provider instances. At startup
//! the registry reads the [`LlmConfig`], resolves authentication (env vars,
//! direct keys), and instantiates the appropriate adapter for each
//! configured provider.

use crate::anthropic::AnthropicProvider;
use crate::openrouter::OpenRouterProvider;
use crate::traits::LlmProvider;
use cicerone_domain::config::{LlmConfig, ProviderKind};
use std::collections::HashMap;
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProviderRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds all instantiated LLM providers, keyed by config id.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// Build the registry from the application's [`LlmConfig`].
    ///
    /// Each entry in `config.providers` is instantiated using the
    /// appropriate adapter based on its `kind`. Auth keys are resolved
    /// eagerly (env vars are read at this point).
    ///
    /// Providers that fail to initialize are logged and skipped rather than
    /// aborting startup; the startup policy decides downstream whether an
    /// empty registry is fatal.
    pub fn from_config(config: &LlmConfig) -> Self {
        let mut providers: HashMap<String, Arc<dyn LlmProvider>> = HashMap::new();

        for pc in &config.providers {
            let result = match pc.kind {
                ProviderKind::Openrouter => OpenRouterProvider::from_config(pc)
                    .map(|p| Arc::new(p) as Arc<dyn LlmProvider>),
                ProviderKind::Anthropic => AnthropicProvider::from_config(pc)
                    .map(|p| Arc::new(p) as Arc<dyn LlmProvider>),
            };

            match result {
                Ok(provider) => {
                    tracing::info!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        "registered LLM provider"
                    );
                    providers.insert(pc.id.clone(), provider);
                }
                Err(e) => {
                    tracing::warn!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        error = %e,
                        "failed to initialize LLM provider, skipping"
                    );
                }
            }
        }

        Self { providers }
    }

    /// Build from already-constructed providers (useful for testing).
    pub fn new(providers: HashMap<String, Arc<dyn LlmProvider>>) -> Self {
        Self { providers }
    }

    /// Look up a provider by its config id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(provider_id).cloned()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// List all registered provider IDs (sorted).
    pub fn list_providers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicerone_domain::config::{AuthConfig, ProviderConfig};

    #[test]
    fn failed_auth_skips_provider_instead_of_aborting() {
        let config = LlmConfig {
            providers: vec![ProviderConfig {
                id: "openrouter".into(),
                kind: ProviderKind::Openrouter,
                base_url: "https://openrouter.ai/api/v1".into(),
                auth: AuthConfig {
                    env: Some("CICERONE_TEST_MISSING_KEY_4242".into()),
                    ..Default::default()
                },
                default_model: None,
                referer: None,
                title: None,
            }],
            ..Default::default()
        };
        let registry = ProviderRegistry::from_config(&config);
        assert!(registry.is_empty());
        assert!(registry.get("openrouter").is_none());
    }

    #[test]
    fn plaintext_key_initializes_provider() {
        let config = LlmConfig {
            providers: vec![ProviderConfig {
                id: "anthropic".into(),
                kind: ProviderKind::Anthropic,
                base_url: "https://api.anthropic.com".into(),
                auth: AuthConfig {
                    key: Some("sk-test".into()),
                    ..Default::default()
                },
                default_model: None,
                referer: None,
                title: None,
            }],
            ..Default::default()
        };
        let registry = ProviderRegistry::from_config(&config);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_providers(), vec!["anthropic".to_string()]);
    }
}
