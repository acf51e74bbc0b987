//! Advisors: anything that can propose a move for a position.

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::protocol::{self, Advice, AdvisoryRequest, Personality};
use async_trait::async_trait;
use tracing::debug;

/// Source of move proposals for the machine side.
///
/// Proposals are untrusted: the caller re-checks every one against the
/// legal-move list before playing it.
#[async_trait]
pub trait MoveAdvisor: Send + Sync {
    async fn propose(&self, request: &AdvisoryRequest) -> AdvisorResult<Advice>;

    /// Returns a name for this advisor (used in logging).
    fn name(&self) -> &str {
        "MoveAdvisor"
    }
}

/// Advisor backed by a chat-completions endpoint.
pub struct OpenAiAdvisor {
    client: reqwest::Client,
    config: AdvisorConfig,
}

impl OpenAiAdvisor {
    pub fn new(config: AdvisorConfig) -> AdvisorResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }
}

#[async_trait]
impl MoveAdvisor for OpenAiAdvisor {
    async fn propose(&self, request: &AdvisoryRequest) -> AdvisorResult<Advice> {
        let api_key = self.config.api_key.as_deref().ok_or(AdvisorError::MissingCredential)?;
        if request.legal_moves.is_empty() {
            return Err(AdvisorError::NoLegalMoves);
        }

        let personality = Personality::random();
        let body = protocol::build_chat_request(&self.config, request, personality);
        debug!(endpoint = %self.config.endpoint, model = %self.config.model, %personality, "requesting advice");

        let timeout = self.config.timeout;
        let transport = |e: reqwest::Error| {
            if e.is_timeout() { AdvisorError::Timeout(timeout) } else { AdvisorError::Transport(e) }
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(transport)?;
        let (mv, insight) = protocol::parse_chat_response(&text, &request.legal_moves)?;
        debug!(%mv, "advisor proposed a move");

        Ok(Advice { mv, insight, personality })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
