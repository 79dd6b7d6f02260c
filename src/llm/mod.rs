// ABOUTME: Generation request/result types and the client seam
// ABOUTME: One trait, one production implementation (Gemini), pure request builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Generation Layer
//!
//! This module defines the contract between the coaching pipeline and the
//! external text-generation service:
//!
//! - [`GenerationRequest`]: instruction + optional behavioral preamble +
//!   optional output schema
//! - [`GenerationResult`]: free text or a parsed structured payload
//! - [`GenerationClient`]: the async seam implemented by [`GeminiClient`]
//!   in production and by scripted doubles in tests
//!
//! A request carries a schema if and only if the caller requires structured
//! output; the result variant mirrors that choice.

mod gemini;
pub mod prompts;
pub mod requests;
pub mod schema;

pub use gemini::GeminiClient;
pub use schema::Schema;

use async_trait::async_trait;

use crate::errors::GenerationError;

/// A single content-generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Natural-language instruction for the service
    pub instruction: String,
    /// Behavioral preamble (persona, tone, domain expertise)
    pub system_preamble: Option<String>,
    /// Present iff the caller requires structured output
    pub output_schema: Option<Schema>,
    /// Sampling temperature, when the variant specifies one
    pub temperature: Option<f32>,
    /// Explicit model override; the client resolves a default otherwise
    pub model: Option<String>,
}

impl GenerationRequest {
    /// Create a free-text request with the given instruction
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            system_preamble: None,
            output_schema: None,
            temperature: None,
            model: None,
        }
    }

    /// Set the behavioral preamble
    #[must_use]
    pub fn with_system_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.system_preamble = Some(preamble.into());
        self
    }

    /// Require structured output conforming to the given schema
    #[must_use]
    pub fn with_output_schema(mut self, schema: Schema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Outcome of one generation exchange
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Free-text response
    Text(String),
    /// Parsed structured payload; conformance to the requested schema is
    /// attempted by the service but must be re-validated by ingestion
    Structured(serde_json::Value),
}

/// The generation service seam
///
/// One call performs exactly one request/response exchange: no retry, no
/// backoff, no partial return. The configured timeout is the only thing
/// that bounds a hung exchange.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Short provider identifier for logs
    fn name(&self) -> &'static str;

    /// Perform one generation exchange
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] tagged with the failure kind; the
    /// request is never retried internally.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError>;
}
