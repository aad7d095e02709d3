use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::GeneratedImage;
use crate::domain::notification::ports::ImageGenerator;

#[derive(Debug, Deserialize)]
struct DeepAiResponse {
    output_url: String,
}

/// DeepAI text-to-image client.
pub struct DeepAiImageGenerator {
    client: Client,
    api_url: String,
    api_key: String,
}

impl DeepAiImageGenerator {
    pub fn new(api_url: String, api_key: String) -> Result<Self, NotificationError> {
        // Generation takes a while on the provider side.
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl ImageGenerator for DeepAiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, NotificationError> {
        tracing::debug!(
            prompt = %prompt.chars().take(20).collect::<String>(),
            "Generating image"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .form(&[("text", prompt)])
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::ApiResponse(format!(
                "DeepAI API request failed with status code of {}",
                status.as_u16()
            )));
        }

        let body: DeepAiResponse = response.json().await.map_err(|e| {
            NotificationError::ApiResponse(format!(
                "API response parsing failed with error {}",
                e
            ))
        })?;

        Ok(GeneratedImage {
            output_url: body.output_url,
        })
    }
}
