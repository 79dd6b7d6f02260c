// ABOUTME: Injectable identifier generation for workout plans
// ABOUTME: Random uuids in production, deterministic counters in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Plan Identifiers
//!
//! Plan identifiers are assigned locally, never trusted from the generation
//! service. The generator is injectable so tests can assert deterministic
//! ids; ingestion re-draws until the id avoids the caller's existing
//! collection, so any generator that eventually produces a fresh value is a
//! valid implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh plan identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce the next candidate plan identifier
    fn plan_id(&self) -> String;
}

/// Random identifiers for production use
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn plan_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `plan-{n}` identifiers for tests and offline tooling
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting from zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn plan_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("plan-{n}")
    }
}
