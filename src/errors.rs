// ABOUTME: Error taxonomy for the coaching pipeline
// ABOUTME: Generation failures carry a kind tag; ingestion failures name the offending field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Error Handling
//!
//! Three layers of failure, all surfaced as typed results and never thrown
//! across the state-mutation boundary:
//!
//! - [`CoachError::InvalidParameters`]: caller misuse detected locally,
//!   before any network traffic
//! - [`GenerationError`]: the single opaque error of the generation client,
//!   tagged with a [`GenerationErrorKind`]
//! - [`IngestionError`]: a structured payload failed re-validation; the
//!   whole record is rejected, never partially merged

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Kind tag carried by every [`GenerationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// Transport error, malformed HTTP exchange, or service unavailability
    NetworkFailure,
    /// Missing or rejected credential
    AuthenticationFailure,
    /// The service response could not be parsed as claimed
    MalformedResponse,
    /// The configured per-request timeout elapsed
    Timeout,
}

impl GenerationErrorKind {
    /// Short identifier for logs and assertions
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkFailure => "network failure",
            Self::AuthenticationFailure => "authentication failure",
            Self::MalformedResponse => "malformed response",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single generation exchange
///
/// The client never retries and never partially returns; one exchange yields
/// either a result or exactly one of these.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct GenerationError {
    kind: GenerationErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerationError {
    /// Create an error with an explicit kind tag
    #[must_use]
    pub fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Transport-level failure
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::NetworkFailure, message)
    }

    /// Missing or rejected credential
    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::AuthenticationFailure, message)
    }

    /// Unparseable service response
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::MalformedResponse, message)
    }

    /// Request exceeded the configured timeout
    #[must_use]
    pub fn timeout(limit: Duration) -> Self {
        Self::new(
            GenerationErrorKind::Timeout,
            format!("request timed out after {}s", limit.as_secs()),
        )
    }

    /// Attach the underlying error for chaining
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The kind tag of this failure
    #[must_use]
    pub const fn kind(&self) -> GenerationErrorKind {
        self.kind
    }

    /// Human-readable failure message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rejection of a structured payload during ingestion
///
/// Ingestion is all-or-nothing: one invalid exercise invalidates the whole
/// plan rather than being silently dropped, which would misrepresent a
/// multi-exercise plan as shorter than requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    /// A field the schema marks required is absent; carries the full path
    /// (e.g. `exercises[1].muscleGroup`)
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A collection that must carry at least one entry is empty
    #[error("`{0}` must be a non-empty list")]
    EmptyCollection(&'static str),

    /// A field is present but has the wrong type
    #[error("field `{field}` has the wrong type, expected {expected}")]
    TypeMismatch {
        /// Full path of the offending field
        field: String,
        /// What the schema expected at that path
        expected: &'static str,
    },
}

/// Umbrella error for the caller-facing session operations
#[derive(Debug, Error)]
pub enum CoachError {
    /// Caller misuse detected locally; never reaches the network
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The generation exchange failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The structured payload failed re-validation
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

/// Result alias for session operations
pub type CoachResult<T> = Result<T, CoachError>;
