// ABOUTME: Response ingestion, converting service output into domain records
// ABOUTME: Re-validates structured payloads and assigns local identifiers, all-or-nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Response Ingestion
//!
//! The service is trusted to attempt schema conformance, never to achieve
//! it. Ingestion runs the schema validator explicitly, then constructs the
//! domain record in one pass: any missing required field or shape violation
//! rejects the entire payload, so a partial plan never reaches caller state.
//!
//! Identifiers are always assigned locally. Exercises get `"ai-" + index`;
//! the plan id is drawn from the injectable [`IdGenerator`] until it avoids
//! the caller's existing collection.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::errors::IngestionError;
use crate::ids::IdGenerator;
use crate::llm::requests;
use crate::models::{Exercise, WorkoutPlan};

/// Fixed substitute for an empty or whitespace-only reply
pub const EMPTY_REPLY_FALLBACK: &str = "no response";

/// Pass a free-text reply through, substituting the fixed fallback for
/// emptiness so the conversation surface never renders a blank bubble
#[must_use]
pub fn chat_reply(raw: &str) -> String {
    if raw.trim().is_empty() {
        EMPTY_REPLY_FALLBACK.to_owned()
    } else {
        raw.to_owned()
    }
}

/// Convert a structured plan payload into a [`WorkoutPlan`]
///
/// Content fields are copied verbatim; only identifiers and the
/// `completed` flag are injected.
///
/// # Errors
///
/// Returns an [`IngestionError`] naming the first violation; on any error
/// the caller's collection must remain untouched.
pub fn workout_plan(
    payload: &Value,
    ids: &dyn IdGenerator,
    existing_plan_ids: &[String],
) -> Result<WorkoutPlan, IngestionError> {
    requests::plan_schema().validate(payload, "")?;

    let root = payload.as_object().ok_or_else(|| mismatch("$", "object"))?;
    let title = required_str(root, "title", "")?;

    let raw_exercises = root
        .get("exercises")
        .and_then(Value::as_array)
        .ok_or_else(|| mismatch("exercises", "list"))?;
    if raw_exercises.is_empty() {
        return Err(IngestionError::EmptyCollection("exercises"));
    }

    let mut exercises = Vec::with_capacity(raw_exercises.len());
    for (index, entry) in raw_exercises.iter().enumerate() {
        let path = format!("exercises[{index}]");
        let map = entry.as_object().ok_or_else(|| mismatch(&path, "object"))?;
        exercises.push(Exercise {
            id: format!("ai-{index}"),
            name: required_str(map, "name", &path)?,
            sets: required_count(map, "sets", &path)?,
            reps: required_count(map, "reps", &path)?,
            muscle_group: required_str(map, "muscleGroup", &path)?,
            description: required_str(map, "description", &path)?,
            pro_tips: optional_strings(map, "proTips", &path)?,
            video_url: Some(required_str(map, "videoUrl", &path)?),
            image_key: required_str(map, "imageKey", &path)?,
            completed: false,
        });
    }

    Ok(WorkoutPlan {
        id: fresh_plan_id(ids, existing_plan_ids),
        title,
        created_at: Utc::now(),
        exercises,
    })
}

/// Draw plan ids until one avoids the caller's existing collection
fn fresh_plan_id(ids: &dyn IdGenerator, existing: &[String]) -> String {
    let mut id = ids.plan_id();
    while existing.contains(&id) {
        id = ids.plan_id();
    }
    id
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn mismatch(field: &str, expected: &'static str) -> IngestionError {
    IngestionError::TypeMismatch {
        field: field.to_owned(),
        expected,
    }
}

fn required_str(
    map: &Map<String, Value>,
    name: &str,
    prefix: &str,
) -> Result<String, IngestionError> {
    let path = field_path(prefix, name);
    map.get(name)
        .ok_or_else(|| IngestionError::MissingField(path.clone()))?
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| mismatch(&path, "string"))
}

/// Coerce a count field to `u32`; fractional or negative numbers cannot be
/// represented in the domain record and are rejected as mismatches
fn required_count(
    map: &Map<String, Value>,
    name: &str,
    prefix: &str,
) -> Result<u32, IngestionError> {
    let path = field_path(prefix, name);
    map.get(name)
        .ok_or_else(|| IngestionError::MissingField(path.clone()))?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch(&path, "whole number"))
}

fn optional_strings(
    map: &Map<String, Value>,
    name: &str,
    prefix: &str,
) -> Result<Option<Vec<String>>, IngestionError> {
    let Some(value) = map.get(name) else {
        return Ok(None);
    };
    let path = field_path(prefix, name);
    let entries = value.as_array().ok_or_else(|| mismatch(&path, "list"))?;
    let mut strings = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let text = entry
            .as_str()
            .ok_or_else(|| mismatch(&format!("{path}[{index}]"), "string"))?;
        strings.push(text.to_owned());
    }
    Ok(Some(strings))
}
