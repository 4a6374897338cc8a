// ABOUTME: OpenAI-compatible chat completion provider over reqwest
// ABOUTME: Works against api.openai.com and self-hosted compatible servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # OpenAI-Compatible Provider
//!
//! Implementation of [`ChatProvider`] against the `/chat/completions`
//! endpoint shape. The base URL is configurable so Ollama, vLLM and similar
//! servers work unchanged.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{ChatMessage, ChatProvider, ChatRequest, ChatResponse, MessageRole, TokenUsage};
use crate::config::GenerationConfig;
use crate::errors::AppError;

/// Configuration for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token; optional for unauthenticated local servers
    pub api_key: Option<String>,
    /// Model to request by default
    pub model: String,
}

impl From<&GenerationConfig> for OpenAiCompatibleConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

/// Chat provider for OpenAI-compatible APIs
pub struct OpenAiCompatibleProvider {
    config: OpenAiCompatibleConfig,
    client: Client,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetails,
}

#[derive(Deserialize)]
struct ApiErrorDetails {
    message: String,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for the given endpoint configuration
    #[must_use]
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn convert_messages(messages: &[ChatMessage]) -> Vec<ApiMessage<'_>> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect()
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
            match status.as_u16() {
                401 => AppError::auth_invalid(format!(
                    "Generation API authentication failed: {}",
                    parsed.error.message
                )),
                400 => AppError::invalid_input(format!(
                    "Generation API rejected the request: {}",
                    parsed.error.message
                )),
                _ => AppError::external_service("generation", parsed.error.message),
            }
        } else {
            AppError::external_service(
                "generation",
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            )
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);

        debug!(model, "sending chat completion request");

        let api_request = ApiRequest {
            model,
            messages: Self::convert_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut builder = self.client.post(self.api_url()).json(&api_request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            error!("failed to reach generation API: {e}");
            AppError::external_service("generation", format!("Failed to connect: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("generation", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let parsed: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("failed to parse generation API response: {e}");
            AppError::external_service("generation", format!("Failed to parse response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("generation", "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!("received completion: {} chars", content.len());

        Ok(ChatResponse {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}
