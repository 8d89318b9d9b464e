//! Pluggable pitch generation backend
//!
//! The generation endpoint is an opaque external service behind a fixed
//! request/response contract. This module provides the seam:
//!
//! - `PitchBackend` trait: the interface for pitch generation
//! - `PitchClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Implementations: `HttpPitchBackend` (the real endpoint),
//!   `MockPitchBackend` (tests and development)
//!
//! Generation failures are surfaced, never retried automatically; whether
//! to regenerate is the caller's decision.

mod http;
mod mock;

pub use http::HttpPitchBackend;
pub use mock::MockPitchBackend;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::prompt::ChatMessage;

/// Sampling temperature used by the dashboard
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
/// Token budget matching the 2-3 sentence pitch format
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Interface for pitch generation backends
#[async_trait]
pub trait PitchBackend: Send + Sync {
    /// Generate pitch text from an assembled instruction list
    ///
    /// The returned text is trimmed of surrounding whitespace.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete pitch client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum PitchClient {
    /// Real generation endpoint over HTTP
    Http(HttpPitchBackend),
    /// Mock backend for testing
    Mock(MockPitchBackend),
}

impl PitchClient {
    /// Create a client for the configured backend
    pub fn from_config(config: &Config) -> Self {
        Self::Http(HttpPitchBackend::new(
            &config.base_url,
            config.token.as_deref(),
        ))
    }

    /// Create a mock client for testing
    pub fn mock(reply: &str) -> Self {
        Self::Mock(MockPitchBackend::with_reply(reply))
    }

    /// Generate with the dashboard's default sampling settings
    pub async fn generate_default(&self, messages: &[ChatMessage]) -> Result<String> {
        self.generate(messages, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
            .await
    }
}

#[async_trait]
impl PitchBackend for PitchClient {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        match self {
            Self::Http(b) => b.generate(messages, temperature, max_tokens).await,
            Self::Mock(b) => b.generate(messages, temperature, max_tokens).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            Self::Http(b) => b.health_check().await,
            Self::Mock(b) => b.health_check().await,
        }
    }

    fn host(&self) -> &str {
        match self {
            Self::Http(b) => b.host(),
            Self::Mock(b) => b.host(),
        }
    }
}
