// ABOUTME: LLM provider abstraction for the meal generation call
// ABOUTME: Defines the ChatProvider contract and role-based message types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Chat Provider Interface
//!
//! Contract the external text-generation service is accessed through. The
//! rest of the crate only sees [`ChatProvider`]; the concrete HTTP client
//! lives in [`openai_compatible`] and tests substitute their own impls.

/// OpenAI-compatible chat completion client
pub mod openai_compatible;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Role-based message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request configuration
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,
    /// Model override; provider default when `None`
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion token cap
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a request with default model and sampling settings
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token usage statistics reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,
    /// Model that produced the response
    pub model: String,
    /// Usage statistics when the provider reports them
    pub usage: Option<TokenUsage>,
}

/// Contract for chat completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Machine-readable provider name
    fn name(&self) -> &'static str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;

    /// Execute one chat completion
    ///
    /// # Errors
    /// Returns an error when the service is unreachable, rejects the request
    /// or returns a body that cannot be parsed.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
