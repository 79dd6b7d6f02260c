// ABOUTME: Shared test doubles and fixtures for the pipeline integration tests
// ABOUTME: Scripted generation client, recording hooks, and a seed plan payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use fit_elite_coach::errors::GenerationError;
use fit_elite_coach::llm::{GenerationClient, GenerationRequest, GenerationResult};
use fit_elite_coach::models::{ConversationMessage, WorkoutPlan};
use fit_elite_coach::session::CoachHooks;

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct ScriptedInner {
    responses: Mutex<VecDeque<Result<GenerationResult, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

/// Generation client double that replays scripted responses in order and
/// records every request it receives
///
/// Clones share the same script and request log, so a test can keep a probe
/// handle after moving the client into a session.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    inner: Arc<ScriptedInner>,
    delay: Option<Duration>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Result<GenerationResult, GenerationError>) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Hold each exchange open for the given duration before responding
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every request the double has seen, in order
    pub fn seen_requests(&self) -> Vec<GenerationRequest> {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::network("script exhausted")))
    }
}

/// Hooks double recording everything the session hands over
#[derive(Default)]
pub struct RecordingHooks {
    pub messages: Vec<ConversationMessage>,
    pub plans: Vec<WorkoutPlan>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoachHooks for RecordingHooks {
    fn append_message(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    fn prepend_plan(&mut self, plan: WorkoutPlan) {
        self.plans.insert(0, plan);
    }
}

/// A conforming two-exercise plan payload, mirroring the application's seed
/// push-day routine
pub fn plan_payload() -> Value {
    json!({
        "title": "Push Day - Hipertrofia",
        "exercises": [
            {
                "name": "Press de Banca con Barra",
                "sets": 4,
                "reps": 10,
                "muscleGroup": "Pecho",
                "description": "Bajada controlada y fase concéntrica explosiva.",
                "proTips": [
                    "Retrae las escápulas",
                    "Mantén los pies firmes en el suelo",
                    "No bloquees los codos al subir"
                ],
                "videoUrl": "https://www.youtube.com/embed/rT7DgVCn7iY",
                "imageKey": "benchpress"
            },
            {
                "name": "Press Militar con Mancuernas",
                "sets": 3,
                "reps": 12,
                "muscleGroup": "Hombros",
                "description": "Control del core y subida en forma de arco.",
                "proTips": [
                    "Aprieta el abdomen",
                    "Sube las mancuernas en arco",
                    "Controla el descenso"
                ],
                "videoUrl": "https://www.youtube.com/embed/qEwK6jnzpxk",
                "imageKey": "shoulder-press"
            }
        ]
    })
}
