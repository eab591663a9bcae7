//! Provider configuration read from the environment

use super::{GeminiService, LlmService, LoggingService};
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_KEY_VAR: &str = "API_KEY";

/// Where the API credential comes from.
///
/// The environment variant is resolved on every request, so a key exported
/// after startup is picked up by the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Env(String),
    #[allow(dead_code)] // Used by tests and embedders
    Static(String),
}

impl Credential {
    /// Resolve the current key. A missing variable yields an empty key,
    /// which the provider will reject.
    pub fn resolve(&self) -> String {
        match self {
            Credential::Env(var) => std::env::var(var).unwrap_or_default(),
            Credential::Static(key) => key.clone(),
        }
    }
}

/// Configuration for the generative-text provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub credential: Credential,
    pub model: String,
    /// Base URL override (e.g. a proxy or gateway in front of the API)
    pub gateway: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            credential: Credential::Env(DEFAULT_API_KEY_VAR.to_string()),
            model: DEFAULT_MODEL.to_string(),
            gateway: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let key_var = std::env::var("LUMINA_API_KEY_VAR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY_VAR.to_string());

        Self {
            credential: Credential::Env(key_var),
            model: std::env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gateway: std::env::var("LLM_GATEWAY").ok().filter(|g| !g.trim().is_empty()),
        }
    }

    /// Build the service described by this config, wrapped with logging
    pub fn build_service(&self) -> Arc<dyn LlmService> {
        let gemini = GeminiService::new(
            self.credential.clone(),
            &self.model,
            self.gateway.as_deref(),
        );
        Arc::new(LoggingService::new(Arc::new(gemini)))
    }
}
