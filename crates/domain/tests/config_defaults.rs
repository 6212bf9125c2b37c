use cicerone_domain::config::Config;

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3220);
}

#[test]
fn explicit_zero_host_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 3220
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn default_cors_is_wildcard() {
    let config = Config::default();
    assert_eq!(config.server.cors.allowed_origins, vec!["*".to_string()]);
}

#[test]
fn cors_config_parses_custom_origins() {
    let toml_str = r#"
[server.cors]
allowed_origins = ["https://visite.example.com", "http://localhost:3000"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.cors.allowed_origins.len(), 2);
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"https://visite.example.com".to_string()));
}

#[test]
fn cors_wildcard_port_preserved_in_config() {
    let toml_str = r#"
[server.cors]
allowed_origins = ["http://localhost:*"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.cors.allowed_origins[0], "http://localhost:*");
}

#[test]
fn guide_windows_default_to_six_and_four() {
    let config = Config::default();
    assert_eq!(config.guide.history_window, 6);
    assert_eq!(config.guide.history_window_vision, 4);
}

#[test]
fn guide_windows_parse_overrides() {
    let toml_str = r#"
[guide]
history_window = 10
history_window_vision = 2
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.guide.history_window, 10);
    assert_eq!(config.guide.history_window_vision, 2);
}

#[test]
fn sampling_defaults_match_request_contract() {
    let config = Config::default();
    assert_eq!(config.llm.max_tokens, 500);
    assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
}

#[test]
fn role_map_defaults_route_through_openrouter() {
    let config = Config::default();
    assert!(config.llm.roles.text.starts_with("openrouter/"));
    assert!(config.llm.roles.vision.starts_with("openrouter/"));
    assert!(config.llm.roles.judge.starts_with("openrouter/"));
}
