//! Mock pitch backend for testing
//!
//! Returns a configurable canned reply so pipeline tests and development
//! need no running generation endpoint.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::prompt::ChatMessage;

use super::PitchBackend;

/// Mock pitch backend
#[derive(Clone)]
pub struct MockPitchBackend {
    reply: String,
    /// Whether health_check should report reachable
    pub healthy: bool,
    /// When set, generate fails with this status/body pair
    failure: Option<(u16, String)>,
}

impl Default for MockPitchBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPitchBackend {
    pub fn new() -> Self {
        Self::with_reply("Bonjour, découvrez notre offre adaptée à votre profil.")
    }

    /// Mock that returns `reply` (trimmed, like the real gateway)
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            healthy: true,
            failure: None,
        }
    }

    /// Mock whose generate call fails with the given status and body
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            reply: String::new(),
            healthy: false,
            failure: Some((status, body.to_string())),
        }
    }
}

#[async_trait]
impl PitchBackend for MockPitchBackend {
    async fn generate(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String> {
        if let Some((status, ref body)) = self.failure {
            return Err(Error::Generation {
                status,
                body: body.clone(),
            });
        }
        Ok(self.reply.trim().to_string())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn host(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClient;

    #[tokio::test]
    async fn canned_reply_is_trimmed() {
        let backend = MockPitchBackend::with_reply("  A short pitch.  ");
        let reply = backend.generate(&[], 1.0, 300).await.unwrap();
        assert_eq!(reply, "A short pitch.");
        assert!(backend.health_check().await);
    }

    #[tokio::test]
    async fn failing_mock_surfaces_status_and_body() {
        let backend = MockPitchBackend::failing(503, "gateway down");
        let err = backend.generate(&[], 1.0, 300).await.unwrap_err();
        match err {
            Error::Generation { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "gateway down");
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
        assert!(!backend.health_check().await);
    }

    #[tokio::test]
    async fn client_enum_delegates_to_the_mock() {
        let client = PitchClient::mock("Bonjour!");
        let reply = client.generate_default(&[]).await.unwrap();
        assert_eq!(reply, "Bonjour!");
        assert_eq!(client.host(), "mock");
    }
}
