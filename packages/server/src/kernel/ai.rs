// AI implementation using Gemini
//
// This is the infrastructure implementation of BaseAI.
// What to prompt for (the FAQ template, fallback handling) lives in the
// assistant domain.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::gemini;

use super::traits::BaseAI;

/// Fixed model identifier for all assistant completions
pub const ASSISTANT_MODEL: &str = "gemini-2.0-flash";

const ASSISTANT_PREAMBLE: &str =
    "You are the virtual front-office assistant for a school. Answer questions \
     from parents, students and staff about the school briefly and factually. \
     If you do not know the answer, say so plainly.";

/// Gemini implementation of AI capabilities
#[derive(Clone)]
pub struct GeminiClient {
    client: gemini::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: gemini::Client::new(api_key),
        }
    }
}

#[async_trait]
impl BaseAI for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let agent = self
            .client
            .agent(ASSISTANT_MODEL)
            .preamble(ASSISTANT_PREAMBLE)
            .max_tokens(1024)
            .build();

        tracing::debug!(
            prompt_length = prompt.len(),
            model = ASSISTANT_MODEL,
            "Calling Gemini API"
        );

        let response = agent
            .prompt(prompt)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = ASSISTANT_MODEL,
                    "Gemini API call failed"
                );
                e
            })
            .context("Failed to call Gemini API")?;

        tracing::debug!(
            response_length = response.len(),
            model = ASSISTANT_MODEL,
            "Gemini API response received"
        );

        Ok(response)
    }
}
