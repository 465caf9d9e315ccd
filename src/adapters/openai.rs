use crate::adapters::http::{build_client, decode_json, ensure_success};
use crate::config::OpenAiConfig;
use crate::domain::model::ChatMessage;
use crate::domain::ports::{ImageGenerator, TextGenerator};
use crate::utils::error::{DishError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "OpenAI";

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageGenerationRequest<'a> {
    pub prompt: &'a str,
    pub n: u8,
    pub size: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
}

impl ChatCompletionResponse {
    /// First choice's content, trimmed.
    pub fn into_content(self) -> Result<String> {
        let choice = self.choices.into_iter().next().ok_or_else(|| malformed("no choices"))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| malformed("choice has no message content"))?;
        Ok(content.trim().to_string())
    }
}

impl ImageGenerationResponse {
    pub fn into_url(self) -> Result<String> {
        self.data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| malformed("no image url in data"))
    }
}

fn malformed(message: &str) -> DishError {
    DishError::MalformedResponseError {
        service: SERVICE.to_string(),
        message: message.to_string(),
    }
}

/// Chat completions 與 image generations 共用同一個 client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            config,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = self.endpoint("chat/completions");
        let request = ChatCompletionRequest {
            model: &self.config.chat_model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        tracing::debug!("Making chat completion request to: {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success(SERVICE, response).await?;
        let completion: ChatCompletionResponse = decode_json(SERVICE, response).await?;
        completion.into_content()
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint("images/generations");
        let request = ImageGenerationRequest {
            prompt,
            n: 1,
            size: &self.config.image_size,
        };

        tracing::debug!("Making image generation request to: {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success(SERVICE, response).await?;
        let generated: ImageGenerationResponse = decode_json(SERVICE, response).await?;
        generated.into_url()
    }
}
