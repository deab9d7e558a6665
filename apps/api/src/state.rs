use std::sync::Arc;

use crate::config::Config;
use crate::resumes::ResumeService;
use crate::suggestions::SuggestionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resumes: Arc<ResumeService>,
    /// Pluggable suggestion backend. Default: MockSuggestionProvider.
    pub suggester: Arc<dyn SuggestionProvider>,
}
