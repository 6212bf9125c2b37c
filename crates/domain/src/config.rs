use std::fmt;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub guide: GuideConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_port")]
    pub port: u16,
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Per-IP token-bucket rate limiting configuration.
    /// When `None` (the default), rate limiting is disabled — suitable for
    /// local development.  Set `requests_per_second` and `burst_size` in
    /// production.
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: d_port(),
            host: d_host(),
            cors: CorsConfig::default(),
            rate_limit: None,
        }
    }
}

/// Per-IP token-bucket rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Quota replenishment rate — one token every `1 / requests_per_second` seconds.
    pub requests_per_second: u64,
    /// Maximum tokens in the bucket.  A client can send this many requests
    /// in a burst before the limiter kicks in.
    pub burst_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed for CORS. The default is `["*"]`: the chat endpoint
    /// is embedded in third-party tour viewers, so it must answer preflight
    /// from any origin unless explicitly locked down.
    #[serde(default = "d_cors_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: d_cors_origins(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider system
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Startup policy for LLM providers.
    ///
    /// - `allow_none` (default): the gateway boots even if zero providers
    ///   initialize; the chat endpoint returns errors until credentials are
    ///   configured.
    /// - `require_one`: abort startup if no providers successfully init.
    #[serde(default)]
    pub startup_policy: LlmStartupPolicy,
    /// Maximum tokens requested per completion.
    #[serde(default = "d_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Model roles — the declared mapping the dispatcher selects from.
    #[serde(default)]
    pub roles: GuideRoles,
    /// Registered LLM providers (data-driven: adding a provider = adding config).
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            startup_policy: LlmStartupPolicy::AllowNone,
            max_tokens: d_max_tokens(),
            temperature: d_temperature(),
            roles: GuideRoles::default(),
            providers: Vec::new(),
        }
    }
}

/// Controls how the gateway handles LLM provider initialization at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LlmStartupPolicy {
    #[default]
    AllowNone,
    RequireOne,
}

/// The three operating roles of the guide, each naming
/// `"provider_id/model_name"`.  Model choice is this declared mapping,
/// never inferred from request content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideRoles {
    /// Default text-only conversation.
    #[serde(default = "d_text_model")]
    pub text: String,
    /// Used whenever the request carries a screenshot of the current view.
    #[serde(default = "d_vision_model")]
    pub vision: String,
    /// Synthesis of several candidate answers into one.
    #[serde(default = "d_judge_model")]
    pub judge: String,
}

impl Default for GuideRoles {
    fn default() -> Self {
        Self {
            text: d_text_model(),
            vision: d_vision_model(),
            judge: d_judge_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    pub base_url: String,
    #[serde(default)]
    pub default_model: Option<String>,
    /// `HTTP-Referer` attribution header (OpenRouter ranks apps by it).
    #[serde(default)]
    pub referer: Option<String>,
    /// `X-Title` attribution header.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenRouter or any other OpenAI-compatible multi-model gateway.
    Openrouter,
    /// Anthropic Messages API, called directly.
    Anthropic,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Header name (e.g. "Authorization", "x-api-key").
    #[serde(default)]
    pub header: Option<String>,
    /// Header value prefix (e.g. "Bearer ").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Guide behaviour
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Prior turns kept in a text-only conversation.
    #[serde(default = "d_history_window")]
    pub history_window: usize,
    /// Prior turns kept when the current turn carries an image (smaller, to
    /// cap payload size).
    #[serde(default = "d_history_window_vision")]
    pub history_window_vision: usize,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            history_window: d_history_window(),
            history_window_vision: d_history_window_vision(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Observability (OpenTelemetry) configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// OpenTelemetry observability configuration.
///
/// When `otlp_endpoint` is `None` (the default), no OTel exporter is
/// started and the gateway does structured JSON logging only.  Setting
/// `otlp_endpoint` enables OTLP/gRPC trace export so that every `tracing`
/// span is also forwarded to a collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// OTLP gRPC endpoint (e.g. `http://localhost:4317`).
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    /// The `service.name` resource attribute reported to the collector.
    #[serde(default = "d_service_name")]
    pub service_name: String,
    /// Trace sampling rate (`0.0` = never, `1.0` = always).
    #[serde(default = "d_sample_rate")]
    pub sample_rate: f64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: d_service_name(),
            sample_rate: d_sample_rate(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.port".into(),
                message: "port must be greater than 0".into(),
            });
        }

        if self.server.host.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.host".into(),
                message: "host must not be empty".into(),
            });
        }

        if self.llm.providers.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "llm.providers".into(),
                message: "no LLM providers configured".into(),
            });
        }

        for (i, provider) in self.llm.providers.iter().enumerate() {
            if provider.id.is_empty() {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: format!("llm.providers[{i}].id"),
                    message: "provider id must not be empty".into(),
                });
            }
            if provider.base_url.is_empty() {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: format!("llm.providers[{i}].base_url"),
                    message: "provider base_url must not be empty".into(),
                });
            }
        }

        // Every role must point at a configured provider.
        if !self.llm.providers.is_empty() {
            let known: Vec<&str> =
                self.llm.providers.iter().map(|p| p.id.as_str()).collect();
            for (role, spec) in [
                ("text", &self.llm.roles.text),
                ("vision", &self.llm.roles.vision),
                ("judge", &self.llm.roles.judge),
            ] {
                let provider_id = spec.split('/').next().unwrap_or(spec);
                if !known.contains(&provider_id) {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Error,
                        field: format!("llm.roles.{role}"),
                        message: format!(
                            "references unknown provider '{provider_id}'"
                        ),
                    });
                }
            }
        }

        if self.guide.history_window_vision > self.guide.history_window {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "guide.history_window_vision".into(),
                message: "vision window larger than the text window defeats its purpose".into(),
            });
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "server.cors.allowed_origins".into(),
                message: "wildcard \"*\" allows all origins (not recommended for production)".into(),
            });
        }

        errors
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Default value helpers (serde)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn d_port() -> u16 {
    3220
}
fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_cors_origins() -> Vec<String> {
    vec!["*".into()]
}
fn d_max_tokens() -> u32 {
    500
}
fn d_temperature() -> f32 {
    0.7
}
fn d_text_model() -> String {
    "openrouter/anthropic/claude-3-haiku".into()
}
fn d_vision_model() -> String {
    "openrouter/anthropic/claude-3.5-sonnet".into()
}
fn d_judge_model() -> String {
    "openrouter/anthropic/claude-3.5-sonnet".into()
}
fn d_history_window() -> usize {
    6
}
fn d_history_window_vision() -> usize {
    4
}
fn d_service_name() -> String {
    "cicerone".into()
}
fn d_sample_rate() -> f64 {
    1.0
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_all_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 3220);
        assert_eq!(cfg.guide.history_window, 6);
        assert_eq!(cfg.guide.history_window_vision, 4);
        assert_eq!(cfg.llm.max_tokens, 500);
        assert_eq!(cfg.server.cors.allowed_origins, vec!["*".to_string()]);
        assert!(cfg.observability.otlp_endpoint.is_none());
    }

    #[test]
    fn parses_provider_and_roles() {
        let toml_str = r#"
            [[llm.providers]]
            id = "openrouter"
            kind = "openrouter"
            base_url = "https://openrouter.ai/api/v1"

            [llm.providers.auth]
            env = "OPENROUTER_API_KEY"

            [llm.roles]
            text = "openrouter/anthropic/claude-3-haiku"
            vision = "openrouter/anthropic/claude-3.5-sonnet"
            judge = "openrouter/anthropic/claude-3.5-sonnet"
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.llm.providers.len(), 1);
        assert_eq!(cfg.llm.providers[0].kind, ProviderKind::Openrouter);
        assert_eq!(
            cfg.llm.providers[0].auth.env.as_deref(),
            Some("OPENROUTER_API_KEY")
        );
        assert!(cfg.validate().iter().all(|i| i.severity != ConfigSeverity::Error));
    }

    #[test]
    fn validate_flags_unknown_role_provider() {
        let toml_str = r#"
            [[llm.providers]]
            id = "anthropic"
            kind = "anthropic"
            base_url = "https://api.anthropic.com"

            [llm.roles]
            text = "openrouter/anthropic/claude-3-haiku"
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        let issues = cfg.validate();
        assert!(issues.iter().any(|i| {
            i.severity == ConfigSeverity::Error && i.field == "llm.roles.text"
        }));
    }

    #[test]
    fn validate_warns_on_wildcard_cors() {
        let cfg = Config::default();
        let issues = cfg.validate();
        assert!(issues
            .iter()
            .any(|i| i.field == "server.cors.allowed_origins"
                && i.severity == ConfigSeverity::Warning));
    }

    #[test]
    fn validate_rejects_zero_port() {
        let cfg: Config = toml::from_str("[server]\nport = 0").unwrap();
        assert!(cfg
            .validate()
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == "server.port"));
    }

    #[test]
    fn rate_limit_parses_when_present() {
        let toml_str = r#"
            [server.rate_limit]
            requests_per_second = 50
            burst_size = 100
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        let rl = cfg.server.rate_limit.expect("rate_limit should be Some");
        assert_eq!(rl.requests_per_second, 50);
        assert_eq!(rl.burst_size, 100);
    }
}
