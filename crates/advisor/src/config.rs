//! Configuration for the advisory service client.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";

#[derive(Clone)]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on one request, connection included.
    pub timeout: Duration,
    /// Bearer credential. Stored and supplied by the caller; never persisted here.
    pub api_key: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.8,
            max_tokens: 500,
            timeout: Duration::from_secs(20),
            api_key: None,
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
