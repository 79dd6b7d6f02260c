// ABOUTME: Domain records handed to the caller's state layer
// ABOUTME: Workout plans, exercises, conversation messages, and the profile goal enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Domain Models
//!
//! Everything the pipeline produces is owned by the caller from the moment
//! it is returned. Serialization uses the application's wire casing
//! (`muscleGroup`, `proTips`, `videoUrl`, `imageKey`) so records round-trip
//! with the client state layer unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Training goal stated in the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Cut body weight
    LoseWeight,
    /// Hypertrophy-focused training
    BuildMuscle,
    /// General fitness maintenance
    Fitness,
}

impl Goal {
    /// Serialized identifier, as stored in the user profile
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::BuildMuscle => "build_muscle",
            Self::Fitness => "fitness",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which motivational surface requested the line
///
/// The two variants differ only in template tone and word ceiling; the
/// ceiling is part of the instruction, never enforced on the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationKind {
    /// Community feed quote, capped at 20 words in the instruction
    Social,
    /// Mindset mantra, capped at 15 words in the instruction
    Mindset,
}

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Direct user input
    User,
    /// Produced by ingestion (replies, confirmations, failure notices)
    Assistant,
}

impl MessageRole {
    /// String representation used by the chat surface
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One entry in the append-only conversation log
///
/// Messages are never mutated and never deleted; the log itself is owned by
/// the caller, the pipeline only hands entries over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Session-local identifier
    pub id: String,
    /// Who produced the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Monotonic position within the session
    pub sequence: u64,
}

/// A single exercise within a workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Locally assigned identifier, unique within the plan
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Primary muscle group worked
    pub muscle_group: String,
    /// Technique explanation
    pub description: String,
    /// Coaching tips, when the plan carries them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_tips: Option<Vec<String>>,
    /// Embeddable tutorial video reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// English keyword used to pick an illustration
    pub image_key: String,
    /// Completion state, owned by the UI after ingestion
    #[serde(default)]
    pub completed: bool,
}

/// A workout plan as merged into the caller's collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Locally assigned identifier, unique across the caller's collection
    pub id: String,
    /// Plan title
    pub title: String,
    /// Ingestion timestamp
    pub created_at: DateTime<Utc>,
    /// Ordered exercises
    pub exercises: Vec<Exercise>,
}
