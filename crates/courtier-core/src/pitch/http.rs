//! HTTP pitch generation backend
//!
//! Single request/response call against the backend `/generate` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompt::ChatMessage;

use super::PitchBackend;

/// Request to the generation endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_prompt: Option<&'a str>,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// Response from the generation endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    reply: String,
}

/// Pitch backend talking to the real generation endpoint
#[derive(Clone)]
pub struct HttpPitchBackend {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPitchBackend {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }
}

#[async_trait]
impl PitchBackend for HttpPitchBackend {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        // The assembler already places a system entry first, so the separate
        // system_prompt field stays empty; the backend only injects its own
        // default when no system role is present.
        let request = GenerateRequest {
            system_prompt: None,
            messages,
            temperature,
            max_tokens,
        };

        let mut builder = self
            .http_client
            .post(format!("{}/generate", self.base_url))
            .json(&request);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        debug!("Generation reply: {}", generated.reply);

        Ok(generated.reply.trim().to_string())
    }

    async fn health_check(&self) -> bool {
        // The backend exposes no dedicated health route; its OpenAPI schema
        // is always served and is cheap to probe.
        match self
            .http_client
            .get(format!("{}/openapi.json", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
