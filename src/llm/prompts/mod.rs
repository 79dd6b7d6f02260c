// ABOUTME: Prompt text for the three generation variants
// ABOUTME: Persona loaded at compile time, templates parameterized by profile goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Prompts
//!
//! All instruction and preamble text for the pipeline, in the application's
//! voice (Spanish). The chat persona is loaded at compile time from a
//! markdown file so copy edits never touch code.

use crate::models::{Goal, MotivationKind};

/// Fixed persona preamble for chat replies
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Preamble for structured plan generation
pub const PLAN_SYSTEM_PROMPT: &str =
    "Eres un master coach de gimnasio. Generas rutinas efectivas y seguras.";

/// Fixed instruction requesting an advanced routine with technique notes,
/// three coaching tips, a video reference, and an English image keyword
pub const PLAN_INSTRUCTION: &str = "Genera una rutina avanzada de gimnasio. Devuelve un objeto \
JSON con title y exercises. Cada ejercicio debe tener: name, sets, reps, muscleGroup, \
description (explicación técnica detallada), proTips (array de 3 consejos clave), videoUrl \
(un link de YouTube embed válido como \"https://www.youtube.com/embed/XXXXX\" para ese \
ejercicio), e imageKey (palabra clave en inglés).";

/// Opening line a caller can seed a fresh conversation with
pub const COACH_GREETING: &str = "¡Listo para el combate! Soy tu sistema de entrenamiento \
táctico. ¿Generamos tu nueva sesión con videos explicativos hoy?";

/// Word ceiling requested for community-feed motivation
pub const SOCIAL_WORD_LIMIT: usize = 20;

/// Word ceiling requested for mindset mantras
pub const MINDSET_WORD_LIMIT: usize = 15;

/// Goal-parameterized instruction for a motivational line
///
/// The word ceiling is part of the request only; responses are passed
/// through unmodified, so display truncation stays a caller concern.
#[must_use]
pub fn motivation_instruction(goal: Goal, kind: MotivationKind) -> String {
    match kind {
        MotivationKind::Social => format!(
            "Genera una frase de motivación corta, potente y agresiva (estilo militar/atleta \
             de élite) en español para un usuario cuyo objetivo es {goal}. Máximo \
             {SOCIAL_WORD_LIMIT} palabras."
        ),
        MotivationKind::Mindset => format!(
            "Genera una frase de mentalidad para un atleta de alto rendimiento. Objetivo: \
             {goal}. Tono: Estoico, poderoso, corto. Máximo {MINDSET_WORD_LIMIT} palabras. \
             En español."
        ),
    }
}
