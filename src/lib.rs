// ABOUTME: Main library entry point for the Fit Elite AI Core pipeline
// ABOUTME: Exposes request building, generation client, ingestion, and the coach session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

#![deny(unsafe_code)]

//! # Fit Elite Coach
//!
//! The AI coaching pipeline behind the Fit Elite fitness application: it
//! assembles content-generation requests, performs exactly one exchange with
//! Google's generative-language API per invocation, validates structured
//! responses against an explicit schema, and hands finished domain records
//! (workout plans, conversation messages, motivational lines) to the
//! caller's state layer through callbacks.
//!
//! The pipeline itself is stateless: it owns no conversation log and no plan
//! collection. The caller supplies a [`session::CoachHooks`] implementation
//! and keeps ownership of everything the pipeline produces.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fit_elite_coach::config::GeminiConfig;
//! use fit_elite_coach::llm::GeminiClient;
//! use fit_elite_coach::models::{ConversationMessage, WorkoutPlan};
//! use fit_elite_coach::session::{CoachHooks, CoachSession};
//!
//! struct AppState {
//!     messages: Vec<ConversationMessage>,
//!     plans: Vec<WorkoutPlan>,
//! }
//!
//! impl CoachHooks for AppState {
//!     fn append_message(&mut self, message: ConversationMessage) {
//!         self.messages.push(message);
//!     }
//!
//!     fn prepend_plan(&mut self, plan: WorkoutPlan) {
//!         self.plans.insert(0, plan);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fit_elite_coach::errors::CoachError> {
//!     let client = GeminiClient::new(GeminiConfig::from_env()?);
//!     let session = CoachSession::new(client);
//!     let mut state = AppState { messages: Vec::new(), plans: Vec::new() };
//!
//!     let reply = session
//!         .generate_chat_reply("¿Cómo mejoro mi press de banca?", &mut state)
//!         .await?;
//!     if let Some(reply) = reply {
//!         println!("{reply}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **[`llm::requests`]**: pure request builders for the three variants
//!   (chat reply, structured workout plan, motivational line)
//! - **[`llm::GeminiClient`]**: one HTTP round trip per request, no retries
//! - **[`ingest`]**: schema re-validation and all-or-nothing record
//!   construction with locally assigned identifiers
//! - **[`session::CoachSession`]**: the per-session state machine with the
//!   re-entrancy guard that keeps one generation in flight at a time

/// Generation client configuration (credential, models, request timeout)
pub mod config;

/// Error taxonomy for the pipeline (generation, ingestion, caller misuse)
pub mod errors;

/// Injectable identifier generation for workout plans
pub mod ids;

/// Response ingestion: validation and domain-record construction
pub mod ingest;

/// Generation requests, schema descriptors, prompts, and the Gemini client
pub mod llm;

/// Domain records shared with the caller's state layer
pub mod models;

/// The coach session state machine and caller-facing operations
pub mod session;
