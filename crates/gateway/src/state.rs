use std::sync::Arc;

use cicerone_domain::config::Config;
use cicerone_providers::GuideDispatcher;

/// Shared application state passed to all API handlers.
///
/// Everything here is read-only after startup: the config, the keyword and
/// language tables, and the instruction templates are immutable, so no
/// locking is needed across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<GuideDispatcher>,
}
