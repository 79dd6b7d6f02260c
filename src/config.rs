// ABOUTME: Configuration for the Gemini generation client
// ABOUTME: Explicit injection with environment loading kept at the edge, never in business logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Client Configuration
//!
//! [`GeminiConfig`] is always passed explicitly to the client constructor.
//! [`GeminiConfig::from_env`] is the only place the process environment is
//! read, so tests and callers can inject fake credentials and short timeouts
//! without touching global state.

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::warn;

use crate::errors::GenerationError;

/// Environment variable holding the API credential
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the chat/motivation model
pub const CHAT_MODEL_ENV: &str = "FIT_ELITE_CHAT_MODEL";

/// Environment variable overriding the plan-generation model
pub const PLAN_MODEL_ENV: &str = "FIT_ELITE_PLAN_MODEL";

/// Environment variable overriding the per-request timeout, in whole seconds
pub const REQUEST_TIMEOUT_ENV: &str = "FIT_ELITE_REQUEST_TIMEOUT_SECS";

/// Fast model used for chat replies and motivational lines
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";

/// Heavier model used for structured plan generation
pub const DEFAULT_PLAN_MODEL: &str = "gemini-3-pro-preview";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`GeminiClient`](crate::llm::GeminiClient)
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential for the generative-language service
    pub api_key: String,
    /// Model used when a request carries no schema and no explicit model
    pub chat_model: String,
    /// Model used when a request carries an output schema and no explicit model
    pub plan_model: String,
    /// Hard ceiling on a single request/response exchange
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Create a configuration with the given credential and default
    /// models/timeout
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            plan_model: DEFAULT_PLAN_MODEL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an authentication-kind [`GenerationError`] if
    /// `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            GenerationError::auth(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        let mut config = Self::new(api_key);

        if let Ok(model) = env::var(CHAT_MODEL_ENV) {
            config.chat_model = model;
        }
        if let Ok(model) = env::var(PLAN_MODEL_ENV) {
            config.plan_model = model;
        }
        if let Ok(raw) = env::var(REQUEST_TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid request timeout override"),
            }
        }

        Ok(config)
    }

    /// Override the chat/motivation model
    #[must_use]
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Override the plan-generation model
    #[must_use]
    pub fn with_plan_model(mut self, model: impl Into<String>) -> Self {
        self.plan_model = model.into();
        self
    }

    /// Override the per-request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("chat_model", &self.chat_model)
            .field("plan_model", &self.plan_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
