#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use polya_api::{
    config::Config,
    create_router,
    models::progress::{LearningModule, LearningStats, ProblemSolvingRecord, ProgressRecord},
    services::{memory_store::MemoryActivityStore, AppState},
};

pub async fn create_test_app() -> Router {
    create_test_app_with(seeded_store().await).await
}

pub async fn create_test_app_with(store: MemoryActivityStore) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::with_store(Config::in_memory(), Arc::new(store)));
    create_router(app_state)
}

/// Seeded learners:
/// - `strong-learner`: high scores, fast, long study time
/// - `weak-learner`: low theory and practice scores
/// - `peer-a` / `peer-b`: score patterns correlated with `strong-learner`
pub async fn seeded_store() -> MemoryActivityStore {
    let store = MemoryActivityStore::new();

    for (lesson, module, score) in [
        ("theory_1", LearningModule::Theory, 90),
        ("theory_2", LearningModule::Theory, 95),
        ("practice_basic_1", LearningModule::Practice, 88),
    ] {
        store
            .upsert_progress(
                ProgressRecord::new("strong-learner", module, lesson, true, score)
                    .with_time_spent(1200),
            )
            .await;
    }
    for (problem_type, seconds, rate) in [("math", 300, 0.9), ("math", 420, 0.85), ("logic", 500, 0.6)] {
        store
            .append_problem_record(ProblemSolvingRecord::new(
                "strong-learner",
                problem_type,
                "p-1",
                seconds,
                rate,
            ))
            .await;
    }
    let mut stats = LearningStats::new("strong-learner");
    stats.total_time_spent = 7200;
    stats.skill_levels.planning = 3.0;
    store.put_learning_stats(stats).await;

    for (lesson, module, score) in [
        ("theory_1", LearningModule::Theory, 50),
        ("practice_basic_1", LearningModule::Practice, 55),
        ("case_math_1", LearningModule::Cases, 60),
    ] {
        store
            .upsert_progress(ProgressRecord::new("weak-learner", module, lesson, true, score))
            .await;
    }

    for (user, extra_lesson, extra_score) in [("peer-a", "case_logic_1", 92), ("peer-b", "theory_3", 85)] {
        for (lesson, module, score) in [
            ("theory_1", LearningModule::Theory, 85),
            ("theory_2", LearningModule::Theory, 92),
            ("practice_basic_1", LearningModule::Practice, 80),
        ] {
            store
                .upsert_progress(ProgressRecord::new(user, module, lesson, true, score))
                .await;
        }
        let module = if extra_lesson.starts_with("case") {
            LearningModule::Cases
        } else {
            LearningModule::Theory
        };
        store
            .upsert_progress(ProgressRecord::new(user, module, extra_lesson, true, extra_score))
            .await;
    }

    store
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
