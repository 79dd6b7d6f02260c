// ABOUTME: Coach session state machine and caller-facing pipeline operations
// ABOUTME: One generation in flight at a time; results applied through caller hooks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Coach Session
//!
//! [`CoachSession`] drives the three pipeline variants through one explicit
//! state machine: `Idle → Requesting → {Succeeded, Failed} → Idle`. A
//! trigger while a generation is already in flight is discarded (returned
//! as `Ok(None)`), never queued, so overlapping generations can never race
//! on the caller's conversation log or plan collection and results always
//! apply in production order.
//!
//! The session owns no domain state. Conversation messages and plans are
//! handed to the caller through [`CoachHooks`]; on failure exactly one
//! fixed-text notice is appended and the caller's collections are otherwise
//! left untouched.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::errors::{CoachResult, GenerationError};
use crate::ids::{IdGenerator, UuidIds};
use crate::ingest;
use crate::llm::{requests, GenerationClient, GenerationResult};
use crate::models::{ConversationMessage, Goal, MessageRole, MotivationKind, WorkoutPlan};

/// Canned user message recorded when a plan generation is triggered
pub const PLAN_TRIGGER_MESSAGE: &str = "Genera un protocolo de alta intensidad con tutoriales.";

/// Failure notice for chat and motivational variants
pub const CHAT_FAILURE_NOTICE: &str = "Error de enlace con el servidor central.";

/// Failure notice for the plan variant
pub const PLAN_FAILURE_NOTICE: &str = "Falla en el enlace táctico. Reintentando...";

/// Observable phase of the session's generation machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No generation in flight; the machine accepts triggers
    Idle,
    /// One generation in flight; further triggers are discarded
    Requesting,
    /// Last invocation ingested and applied successfully
    Succeeded,
    /// Last invocation failed; a notice was recorded
    Failed,
}

/// State-mutation callbacks supplied by the caller's UI/state layer
///
/// The pipeline never mutates caller state directly; it hands finished
/// values to these hooks and the caller owns them from that point on.
pub trait CoachHooks: Send {
    /// Append one message to the conversation log
    fn append_message(&mut self, message: ConversationMessage);

    /// Insert a freshly generated plan at the front of the collection,
    /// preserving newest-first order
    fn prepend_plan(&mut self, plan: WorkoutPlan);
}

struct SessionInner {
    state: SessionState,
    last_outcome: Option<SessionState>,
    sequence: u64,
}

/// Per-session pipeline driver
///
/// Reusable indefinitely for the life of the owning session; the internal
/// lock only guards the state flag and message counter, never caller data.
pub struct CoachSession<C> {
    client: C,
    ids: Box<dyn IdGenerator>,
    inner: Mutex<SessionInner>,
}

impl<C: GenerationClient> CoachSession<C> {
    /// Create a session with random plan identifiers
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            ids: Box::new(UuidIds),
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                last_outcome: None,
                sequence: 0,
            }),
        }
    }

    /// Replace the plan identifier generator (deterministic ids in tests)
    #[must_use]
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Current machine phase
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    /// Outcome of the most recent completed invocation, if any
    #[must_use]
    pub fn last_outcome(&self) -> Option<SessionState> {
        self.lock().last_outcome
    }

    /// Generate a free-text chat reply to the user's prompt
    ///
    /// Appends the user's message and either the reply or the fixed failure
    /// notice to the conversation. Returns `Ok(None)` when a generation is
    /// already in flight (the trigger is discarded, not queued).
    ///
    /// # Errors
    ///
    /// Caller misuse surfaces as `InvalidParameters`; exchange failures as
    /// the wrapped [`GenerationError`].
    pub async fn generate_chat_reply(
        &self,
        prompt: &str,
        hooks: &mut dyn CoachHooks,
    ) -> CoachResult<Option<String>> {
        let request = requests::chat(prompt)?;
        if !self.try_begin() {
            debug!("chat trigger discarded, generation already in flight");
            return Ok(None);
        }

        self.push_message(hooks, MessageRole::User, prompt.to_owned());

        match self.client.generate(&request).await {
            Ok(result) => {
                let reply = match result {
                    GenerationResult::Text(text) => ingest::chat_reply(&text),
                    GenerationResult::Structured(value) => ingest::chat_reply(&value.to_string()),
                };
                self.push_message(hooks, MessageRole::Assistant, reply.clone());
                self.finish(SessionState::Succeeded);
                Ok(Some(reply))
            }
            Err(error) => {
                warn!(error = %error, "chat generation failed");
                self.push_message(hooks, MessageRole::Assistant, CHAT_FAILURE_NOTICE.to_owned());
                self.finish(SessionState::Failed);
                Err(error.into())
            }
        }
    }

    /// Generate a full workout plan and merge it through the hooks
    ///
    /// On success the plan is prepended to the caller's collection and a
    /// confirmation message is appended to the conversation; the plan is
    /// also returned. On any failure the collection is left untouched and
    /// exactly one failure notice is appended. Returns `Ok(None)` when a
    /// generation is already in flight.
    ///
    /// `existing_plan_ids` is consulted so the fresh plan id never collides
    /// with the caller's collection.
    ///
    /// # Errors
    ///
    /// Exchange failures surface as the wrapped [`GenerationError`];
    /// payload rejections as [`IngestionError`](crate::errors::IngestionError).
    pub async fn generate_plan(
        &self,
        hooks: &mut dyn CoachHooks,
        existing_plan_ids: &[String],
    ) -> CoachResult<Option<WorkoutPlan>> {
        let request = requests::plan();
        if !self.try_begin() {
            debug!("plan trigger discarded, generation already in flight");
            return Ok(None);
        }

        self.push_message(hooks, MessageRole::User, PLAN_TRIGGER_MESSAGE.to_owned());

        let payload = match self.client.generate(&request).await {
            Ok(GenerationResult::Structured(payload)) => payload,
            Ok(GenerationResult::Text(_)) => {
                let error =
                    GenerationError::malformed("expected a structured payload, received free text");
                warn!(error = %error, "plan generation failed");
                self.push_message(hooks, MessageRole::Assistant, PLAN_FAILURE_NOTICE.to_owned());
                self.finish(SessionState::Failed);
                return Err(error.into());
            }
            Err(error) => {
                warn!(error = %error, "plan generation failed");
                self.push_message(hooks, MessageRole::Assistant, PLAN_FAILURE_NOTICE.to_owned());
                self.finish(SessionState::Failed);
                return Err(error.into());
            }
        };

        match ingest::workout_plan(&payload, self.ids.as_ref(), existing_plan_ids) {
            Ok(plan) => {
                hooks.prepend_plan(plan.clone());
                self.push_message(
                    hooks,
                    MessageRole::Assistant,
                    plan_confirmation(&plan.title),
                );
                self.finish(SessionState::Succeeded);
                Ok(Some(plan))
            }
            Err(error) => {
                warn!(error = %error, "plan payload rejected");
                self.push_message(hooks, MessageRole::Assistant, PLAN_FAILURE_NOTICE.to_owned());
                self.finish(SessionState::Failed);
                Err(error.into())
            }
        }
    }

    /// Generate a short motivational line for the given profile goal
    ///
    /// The response is passed through unmodified; the word ceiling lives in
    /// the instruction only. Nothing is appended to the conversation on
    /// success; on failure one fixed notice is appended. Returns `Ok(None)`
    /// when a generation is already in flight.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the profile has no goal set, before
    /// any exchange is attempted; exchange failures surface as the wrapped
    /// [`GenerationError`].
    pub async fn generate_motivational_line(
        &self,
        goal: Option<Goal>,
        kind: MotivationKind,
        hooks: &mut dyn CoachHooks,
    ) -> CoachResult<Option<String>> {
        let request = requests::motivation(goal, kind)?;
        if !self.try_begin() {
            debug!("motivation trigger discarded, generation already in flight");
            return Ok(None);
        }

        match self.client.generate(&request).await {
            Ok(result) => {
                let line = match result {
                    GenerationResult::Text(text) => text,
                    GenerationResult::Structured(value) => value.to_string(),
                };
                self.finish(SessionState::Succeeded);
                Ok(Some(line))
            }
            Err(error) => {
                warn!(error = %error, "motivation generation failed");
                self.push_message(hooks, MessageRole::Assistant, CHAT_FAILURE_NOTICE.to_owned());
                self.finish(SessionState::Failed);
                Err(error.into())
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enter `Requesting` unless a generation is already in flight
    fn try_begin(&self) -> bool {
        let mut inner = self.lock();
        if inner.state == SessionState::Requesting {
            return false;
        }
        inner.state = SessionState::Requesting;
        true
    }

    /// Record the outcome and return the machine to `Idle`
    fn finish(&self, outcome: SessionState) {
        let mut inner = self.lock();
        inner.last_outcome = Some(outcome);
        inner.state = SessionState::Idle;
    }

    /// Assign the next sequence position and hand the message to the caller
    fn push_message(&self, hooks: &mut dyn CoachHooks, role: MessageRole, content: String) {
        let sequence = {
            let mut inner = self.lock();
            inner.sequence += 1;
            inner.sequence
        };
        hooks.append_message(ConversationMessage {
            id: format!("msg-{sequence}"),
            role,
            content,
            sequence,
        });
    }
}

/// Confirmation appended to the conversation after a plan is merged
#[must_use]
pub fn plan_confirmation(title: &str) -> String {
    format!(
        "Protocolo \"{title}\" activado. He incluido videos técnicos para que cada repetición \
         sea perfecta. ¡A por ello!"
    )
}
