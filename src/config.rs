use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Tuning for the chat-completion pipeline. Credentials are supplied per
/// request through the ingress, never through configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    pub model: String,
    /// Word-count budget per document chunk
    pub chunk_max_tokens: usize,
    /// Output budget for a per-chunk answer
    pub chunk_answer_max_tokens: u32,
    /// Output budget for the synthesis pass (larger: it may restate
    /// several partial answers)
    pub synthesis_max_tokens: u32,
    pub temperature: f32,
    /// Per-call deadline; timeouts surface as transport errors
    pub request_timeout_secs: u64,
    /// Max in-flight chunk queries per question (1 = fully sequential)
    pub concurrency: usize,
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.rust_log", "info,docqa_rs=debug")?
            .set_default("completion.base_url", "https://api.openai.com/v1")?
            .set_default("completion.model", "gpt-3.5-turbo")?
            .set_default("completion.chunk_max_tokens", 3500)?
            .set_default("completion.chunk_answer_max_tokens", 1500)?
            .set_default("completion.synthesis_max_tokens", 3500)?
            .set_default("completion.temperature", 0.5)?
            .set_default("completion.request_timeout_secs", 60)?
            .set_default("completion.concurrency", 4)?
            // Add in settings from environment variables (with a prefix of APP)
            // E.g. `APP_SERVER__PORT=8080` would set `ServerConfig.port`
            .add_source(Environment::default().separator("__").prefix("APP"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_contract() {
        let config = AppConfig::build().expect("defaults should build");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
        assert_eq!(config.completion.chunk_max_tokens, 3500);
        assert_eq!(config.completion.chunk_answer_max_tokens, 1500);
        assert_eq!(config.completion.synthesis_max_tokens, 3500);
        assert!(config.completion.synthesis_max_tokens >= config.completion.chunk_answer_max_tokens);
        assert!(config.completion.temperature > 0.0);
        assert!(config.completion.concurrency >= 1);
    }
}
