// ABOUTME: Gemini generation client performing one generateContent exchange per request
// ABOUTME: Maps transport, auth, and parse failures onto the pipeline's error kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Gemini Client
//!
//! Production implementation of [`GenerationClient`] against Google's
//! Generative Language API. Exactly one `generateContent` POST per call:
//! no retry, no backoff, no streaming. The configured request timeout
//! covers the whole exchange and surfaces as the `Timeout` error kind
//! instead of hanging the calling flow.
//!
//! ## Configuration
//!
//! The client takes an explicit [`GeminiConfig`]; only
//! [`GeminiClient::from_env`] touches the process environment.
//!
//! ```rust,no_run
//! use fit_elite_coach::config::GeminiConfig;
//! use fit_elite_coach::llm::{GeminiClient, GenerationClient, requests};
//!
//! # async fn example() -> Result<(), fit_elite_coach::errors::CoachError> {
//! let client = GeminiClient::new(GeminiConfig::from_env()?);
//! let request = requests::chat("¿Qué es el rango de movimiento completo?")?;
//! let reply = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::GeminiConfig;
use crate::errors::GenerationError;
use crate::llm::{GenerationClient, GenerationRequest, GenerationResult, Schema};

/// Base URL for the Generative Language API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

/// Text part of a content entry
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiErrorBody>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Gemini generation client
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a client with an explicit configuration
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a client from the process environment
    ///
    /// # Errors
    ///
    /// Returns an authentication-kind [`GenerationError`] if the credential
    /// variable is not set.
    pub fn from_env() -> Result<Self, GenerationError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    /// Resolve the model for a request: explicit override first, then the
    /// configured plan model for structured requests, chat model otherwise
    fn resolve_model<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        request.model.as_deref().unwrap_or_else(|| {
            if request.output_schema.is_some() {
                &self.config.plan_model
            } else {
                &self.config.chat_model
            }
        })
    }

    /// Build the API URL for a model
    fn build_url(&self, model: &str) -> String {
        format!(
            "{API_BASE_URL}/models/{model}:generateContent?key={}",
            self.config.api_key
        )
    }

    /// Convert a pipeline request into the Gemini wire shape
    fn build_payload(request: &GenerationRequest) -> GeminiRequest {
        let generation_config = if request.temperature.is_some() || request.output_schema.is_some()
        {
            Some(GenerationConfig {
                temperature: request.temperature,
                response_mime_type: request
                    .output_schema
                    .is_some()
                    .then_some("application/json"),
                response_schema: request.output_schema.as_ref().map(Schema::to_value),
            })
        } else {
            None
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: request.instruction.clone(),
                }],
            }],
            system_instruction: request.system_preamble.as_ref().map(|preamble| {
                GeminiContent {
                    role: None,
                    parts: vec![ContentPart {
                        text: preamble.clone(),
                    }],
                }
            }),
            generation_config,
        }
    }

    /// Map a transport-level send failure onto an error kind
    fn map_send_error(&self, source: reqwest::Error) -> GenerationError {
        if source.is_timeout() {
            GenerationError::timeout(self.config.request_timeout).with_source(source)
        } else {
            GenerationError::network(format!("HTTP request failed: {source}"))
        }
    }

    /// Map a non-success HTTP status onto an error kind, extracting the
    /// service's message from the body when one is present
    fn map_status_error(status: u16, body: &str) -> GenerationError {
        let message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|response| response.error)
            .map_or_else(|| body.to_owned(), |error| error.message);

        match status {
            401 | 403 => GenerationError::auth(format!(
                "generation service rejected the credential ({status}): {message}"
            )),
            _ => GenerationError::network(format!(
                "generation service error ({status}): {message}"
            )),
        }
    }

    /// Extract the first candidate's text from a parsed response
    fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
        if let Some(error) = response.error {
            return Err(GenerationError::network(format!(
                "generation service error: {}",
                error.message
            )));
        }

        response
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| GenerationError::malformed("no content in generation response"))
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.resolve_model(request)))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let model = self.resolve_model(request);
        let url = self.build_url(model);
        let payload = Self::build_payload(request);

        debug!("sending generation request");

        // One ceiling over the whole exchange; a hung call becomes a typed
        // failure instead of blocking the invoking flow indefinitely
        let exchange = async {
            let response = self.client.post(&url).json(&payload).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };
        let (status, body) = tokio::time::timeout(self.config.request_timeout, exchange)
            .await
            .map_err(|_| GenerationError::timeout(self.config.request_timeout))?
            .map_err(|source| self.map_send_error(source))?;

        if !status.is_success() {
            error!(status = %status, "generation service returned an error");
            return Err(Self::map_status_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|source| {
            error!(error = %source, "failed to parse generation response");
            GenerationError::malformed("failed to parse generation response").with_source(source)
        })?;

        let text = Self::extract_text(parsed)?;

        if request.output_schema.is_some() {
            let value = serde_json::from_str(&text).map_err(|source| {
                GenerationError::malformed("structured response is not valid JSON")
                    .with_source(source)
            })?;
            debug!("received structured response");
            Ok(GenerationResult::Structured(value))
        } else {
            debug!("received text response");
            Ok(GenerationResult::Text(text))
        }
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            // config already redacts the key; omit the HTTP client entirely
            .finish_non_exhaustive()
    }
}
