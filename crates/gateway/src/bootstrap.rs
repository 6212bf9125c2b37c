//! AppState construction extracted from `main.rs`.

use std::sync::Arc;

use cicerone_domain::config::{Config, ConfigSeverity, LlmStartupPolicy};
use cicerone_providers::GuideDispatcher;

use crate::state::AppState;

/// Validate config and initialize the provider layer, returning a
/// fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── LLM providers ────────────────────────────────────────────────
    let llm = Arc::new(GuideDispatcher::from_config(&config.llm));
    if llm.registry().is_empty() {
        if config.llm.startup_policy == LlmStartupPolicy::RequireOne {
            anyhow::bail!("no LLM providers initialized and startup_policy is require_one");
        }
        tracing::warn!(
            "no LLM providers initialized — the chat endpoint will fail \
             until credentials are configured"
        );
    } else {
        tracing::info!(
            providers = llm.registry().len(),
            "LLM provider registry ready"
        );
    }

    Ok(AppState { config, llm })
}
