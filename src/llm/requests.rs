// ABOUTME: Request builders for the three generation variants
// ABOUTME: Pure transformations from caller parameters to GenerationRequest values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Request Builders
//!
//! Pure functions producing a [`GenerationRequest`] per use case. Caller
//! misuse (blank chat prompt, profile without a goal) is rejected here with
//! [`CoachError::InvalidParameters`], before anything touches the network.

use crate::errors::CoachError;
use crate::llm::{prompts, GenerationRequest, Schema};
use crate::models::{Goal, MotivationKind};

/// Sampling temperature for chat replies
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Build a chat-reply request: verbatim user text under the coach persona
///
/// # Errors
///
/// Returns [`CoachError::InvalidParameters`] for a blank prompt.
pub fn chat(prompt: &str) -> Result<GenerationRequest, CoachError> {
    if prompt.trim().is_empty() {
        return Err(CoachError::InvalidParameters(
            "chat prompt must not be blank".to_owned(),
        ));
    }
    Ok(GenerationRequest::new(prompt)
        .with_system_preamble(prompts::COACH_SYSTEM_PROMPT)
        .with_temperature(CHAT_TEMPERATURE))
}

/// Build a structured plan-generation request
#[must_use]
pub fn plan() -> GenerationRequest {
    GenerationRequest::new(prompts::PLAN_INSTRUCTION)
        .with_system_preamble(prompts::PLAN_SYSTEM_PROMPT)
        .with_output_schema(plan_schema())
}

/// The output schema a plan response must conform to
///
/// The required lists here are exactly the fields ingestion dereferences
/// unconditionally; `proTips` stays optional end to end.
#[must_use]
pub fn plan_schema() -> Schema {
    let exercise = Schema::object(
        vec![
            ("name", Schema::String),
            ("sets", Schema::Number),
            ("reps", Schema::Number),
            ("muscleGroup", Schema::String),
            ("description", Schema::String),
            ("proTips", Schema::array(Schema::String)),
            ("videoUrl", Schema::String),
            ("imageKey", Schema::String),
        ],
        &[
            "name",
            "sets",
            "reps",
            "muscleGroup",
            "description",
            "imageKey",
            "videoUrl",
        ],
    );
    Schema::object(
        vec![
            ("title", Schema::String),
            ("exercises", Schema::array(exercise)),
        ],
        &["title", "exercises"],
    )
}

/// Build a motivational-line request from the profile goal
///
/// # Errors
///
/// Returns [`CoachError::InvalidParameters`] when the profile has no goal
/// set; the templated variants cannot be built without one.
pub fn motivation(
    goal: Option<Goal>,
    kind: MotivationKind,
) -> Result<GenerationRequest, CoachError> {
    let goal = goal.ok_or_else(|| {
        CoachError::InvalidParameters("a profile goal is required for motivational lines".to_owned())
    })?;
    Ok(GenerationRequest::new(prompts::motivation_instruction(
        goal, kind,
    )))
}
