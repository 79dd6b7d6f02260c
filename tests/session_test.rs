// ABOUTME: Behavioral tests for the coach session state machine
// ABOUTME: Covers message flow, failure notices, re-entrancy, and per-variant semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use common::{plan_payload, RecordingHooks, ScriptedClient};
use fit_elite_coach::errors::{CoachError, GenerationError, GenerationErrorKind};
use fit_elite_coach::ids::SequentialIds;
use fit_elite_coach::llm::GenerationResult;
use fit_elite_coach::models::{Goal, MessageRole, MotivationKind};
use fit_elite_coach::session::{
    CoachSession, SessionState, CHAT_FAILURE_NOTICE, PLAN_FAILURE_NOTICE, PLAN_TRIGGER_MESSAGE,
};

fn session(client: ScriptedClient) -> CoachSession<ScriptedClient> {
    CoachSession::new(client).with_id_generator(Box::new(SequentialIds::new()))
}

// ============================================================================
// Chat Variant
// ============================================================================

#[tokio::test]
async fn chat_reply_appends_user_and_assistant_messages() {
    common::init_tracing();
    let client = ScriptedClient::new()
        .respond_with(Ok(GenerationResult::Text("¡Vamos con todo!".to_owned())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let reply = session
        .generate_chat_reply("¿Cuántas series para pecho?", &mut hooks)
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("¡Vamos con todo!"));
    assert_eq!(hooks.messages.len(), 2);
    assert_eq!(hooks.messages[0].role, MessageRole::User);
    assert_eq!(hooks.messages[0].content, "¿Cuántas series para pecho?");
    assert_eq!(hooks.messages[0].sequence, 1);
    assert_eq!(hooks.messages[1].role, MessageRole::Assistant);
    assert_eq!(hooks.messages[1].content, "¡Vamos con todo!");
    assert_eq!(hooks.messages[1].sequence, 2);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.last_outcome(), Some(SessionState::Succeeded));
}

#[tokio::test]
async fn chat_reply_is_never_empty() {
    let client =
        ScriptedClient::new().respond_with(Ok(GenerationResult::Text("   \n".to_owned())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let reply = session
        .generate_chat_reply("¿sigues ahí?", &mut hooks)
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("no response"));
    assert_eq!(hooks.messages[1].content, "no response");
}

#[tokio::test]
async fn blank_prompt_is_rejected_before_any_exchange() {
    let client = ScriptedClient::new();
    let probe = client.clone();
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session
        .generate_chat_reply("   ", &mut hooks)
        .await
        .unwrap_err();

    assert!(matches!(error, CoachError::InvalidParameters(_)));
    assert!(hooks.messages.is_empty());
    assert!(probe.seen_requests().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn chat_failure_appends_exactly_one_notice() {
    let client =
        ScriptedClient::new().respond_with(Err(GenerationError::network("connection dropped")));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session
        .generate_chat_reply("hola", &mut hooks)
        .await
        .unwrap_err();

    match error {
        CoachError::Generation(generation) => {
            assert_eq!(generation.kind(), GenerationErrorKind::NetworkFailure);
        }
        other => panic!("expected a generation error, got {other}"),
    }
    let notices: Vec<_> = hooks
        .messages
        .iter()
        .filter(|message| message.content == CHAT_FAILURE_NOTICE)
        .collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].role, MessageRole::Assistant);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.last_outcome(), Some(SessionState::Failed));
}

#[tokio::test]
async fn timeout_surfaces_the_timeout_kind() {
    let client = ScriptedClient::new()
        .respond_with(Err(GenerationError::timeout(Duration::from_secs(30))));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session
        .generate_chat_reply("hola", &mut hooks)
        .await
        .unwrap_err();

    match error {
        CoachError::Generation(generation) => {
            assert_eq!(generation.kind(), GenerationErrorKind::Timeout);
        }
        other => panic!("expected a generation error, got {other}"),
    }
    assert_eq!(session.last_outcome(), Some(SessionState::Failed));
}

// ============================================================================
// State Machine
// ============================================================================

#[tokio::test(start_paused = true)]
async fn state_is_observable_while_requesting() {
    let client = ScriptedClient::new()
        .with_delay(Duration::from_millis(100))
        .respond_with(Ok(GenerationResult::Text("listo".to_owned())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let (outcome, observed) = tokio::join!(
        session.generate_chat_reply("estado", &mut hooks),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.state()
        }
    );

    assert_eq!(observed, SessionState::Requesting);
    assert_eq!(outcome.unwrap().as_deref(), Some("listo"));
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn second_trigger_while_requesting_is_discarded() {
    let client = ScriptedClient::new()
        .with_delay(Duration::from_millis(100))
        .respond_with(Ok(GenerationResult::Structured(plan_payload())));
    let probe = client.clone();
    let session = session(client);
    let mut first_hooks = RecordingHooks::new();
    let mut second_hooks = RecordingHooks::new();

    let (first, second) = tokio::join!(
        session.generate_plan(&mut first_hooks, &[]),
        session.generate_plan(&mut second_hooks, &[]),
    );

    assert!(first.unwrap().is_some());
    assert!(second.unwrap().is_none());
    // the discarded trigger left no trace: no messages, no plan, no exchange
    assert!(second_hooks.messages.is_empty());
    assert!(second_hooks.plans.is_empty());
    assert_eq!(first_hooks.plans.len(), 1);
    assert_eq!(probe.seen_requests().len(), 1);
}

// ============================================================================
// Plan Variant
// ============================================================================

#[tokio::test]
async fn plan_success_merges_and_confirms() {
    let client =
        ScriptedClient::new().respond_with(Ok(GenerationResult::Structured(plan_payload())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let plan = session
        .generate_plan(&mut hooks, &[])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(plan.id, "plan-0");
    assert_eq!(plan.title, "Push Day - Hipertrofia");
    assert_eq!(plan.exercises.len(), 2);
    assert_eq!(plan.exercises[0].id, "ai-0");
    assert_eq!(plan.exercises[1].id, "ai-1");
    assert!(plan.exercises.iter().all(|exercise| !exercise.completed));

    assert_eq!(hooks.plans.len(), 1);
    assert_eq!(hooks.plans[0], plan);
    assert_eq!(hooks.messages.len(), 2);
    assert_eq!(hooks.messages[0].content, PLAN_TRIGGER_MESSAGE);
    assert!(hooks.messages[1]
        .content
        .contains("\"Push Day - Hipertrofia\""));
    assert_eq!(session.last_outcome(), Some(SessionState::Succeeded));
}

#[tokio::test]
async fn plan_id_avoids_the_existing_collection() {
    let client =
        ScriptedClient::new().respond_with(Ok(GenerationResult::Structured(plan_payload())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();
    let existing = vec!["plan-0".to_owned(), "plan-1".to_owned()];

    let plan = session
        .generate_plan(&mut hooks, &existing)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(plan.id, "plan-2");
}

#[tokio::test]
async fn plan_with_missing_field_is_rejected_whole() {
    let mut payload = plan_payload();
    payload["exercises"][1]
        .as_object_mut()
        .unwrap()
        .remove("muscleGroup");
    let client = ScriptedClient::new().respond_with(Ok(GenerationResult::Structured(payload)));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session.generate_plan(&mut hooks, &[]).await.unwrap_err();

    match error {
        CoachError::Ingestion(ingestion) => {
            assert!(ingestion.to_string().contains("muscleGroup"));
        }
        other => panic!("expected an ingestion error, got {other}"),
    }
    // idempotent rejection: the collection is untouched, one notice recorded
    assert!(hooks.plans.is_empty());
    assert_eq!(hooks.messages.len(), 2);
    assert_eq!(hooks.messages[1].content, PLAN_FAILURE_NOTICE);
    assert_eq!(session.last_outcome(), Some(SessionState::Failed));
}

#[tokio::test]
async fn plan_rejects_a_free_text_response() {
    let client = ScriptedClient::new()
        .respond_with(Ok(GenerationResult::Text("aquí tienes tu rutina".to_owned())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session.generate_plan(&mut hooks, &[]).await.unwrap_err();

    match error {
        CoachError::Generation(generation) => {
            assert_eq!(generation.kind(), GenerationErrorKind::MalformedResponse);
        }
        other => panic!("expected a generation error, got {other}"),
    }
    assert!(hooks.plans.is_empty());
}

#[tokio::test]
async fn plan_failure_leaves_the_collection_untouched() {
    let client =
        ScriptedClient::new().respond_with(Err(GenerationError::network("link down")));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session.generate_plan(&mut hooks, &[]).await.unwrap_err();

    assert!(matches!(error, CoachError::Generation(_)));
    assert!(hooks.plans.is_empty());
    assert_eq!(hooks.messages[1].content, PLAN_FAILURE_NOTICE);
}

// ============================================================================
// Motivation Variant
// ============================================================================

#[tokio::test]
async fn motivation_requires_a_goal_and_never_reaches_the_client() {
    let client = ScriptedClient::new();
    let probe = client.clone();
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session
        .generate_motivational_line(None, MotivationKind::Social, &mut hooks)
        .await
        .unwrap_err();

    assert!(matches!(error, CoachError::InvalidParameters(_)));
    assert!(hooks.messages.is_empty());
    assert!(probe.seen_requests().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn motivation_passes_long_responses_through_unmodified() {
    // 20 words, over the 15-word mindset ceiling: the pipeline never trims
    let long_line = "Uno dos tres cuatro cinco seis siete ocho nueve diez \
                     once doce trece catorce quince dieciséis diecisiete \
                     dieciocho diecinueve veinte";
    let client =
        ScriptedClient::new().respond_with(Ok(GenerationResult::Text(long_line.to_owned())));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let line = session
        .generate_motivational_line(Some(Goal::BuildMuscle), MotivationKind::Mindset, &mut hooks)
        .await
        .unwrap();

    assert_eq!(line.as_deref(), Some(long_line));
    // success writes nothing to the conversation
    assert!(hooks.messages.is_empty());
}

#[tokio::test]
async fn motivation_instruction_carries_goal_and_ceiling() {
    let client =
        ScriptedClient::new().respond_with(Ok(GenerationResult::Text("Disciplina.".to_owned())));
    let probe = client.clone();
    let session = CoachSession::new(client);
    let mut hooks = RecordingHooks::new();

    session
        .generate_motivational_line(Some(Goal::BuildMuscle), MotivationKind::Mindset, &mut hooks)
        .await
        .unwrap();
    let requests = probe.seen_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].instruction.contains("build_muscle"));
    assert!(requests[0].instruction.contains("15 palabras"));
    assert!(requests[0].output_schema.is_none());
}

#[tokio::test]
async fn motivation_failure_appends_the_central_link_notice() {
    let client =
        ScriptedClient::new().respond_with(Err(GenerationError::network("link down")));
    let session = session(client);
    let mut hooks = RecordingHooks::new();

    let error = session
        .generate_motivational_line(Some(Goal::LoseWeight), MotivationKind::Social, &mut hooks)
        .await
        .unwrap_err();

    assert!(matches!(error, CoachError::Generation(_)));
    assert_eq!(hooks.messages.len(), 1);
    assert_eq!(hooks.messages[0].content, CHAT_FAILURE_NOTICE);
    assert_eq!(session.last_outcome(), Some(SessionState::Failed));
}
