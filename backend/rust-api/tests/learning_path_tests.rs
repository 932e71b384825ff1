// Learning path endpoint tests
use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app, get_json};

fn phase_names(body: &serde_json::Value) -> Vec<String> {
    body["learning_path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|phase| phase["phase"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_newcomer_path() {
    let app = create_test_app().await;

    let (status, body) = get_json(&app, "/api/v1/recommendations/learning-path?user_id=nobody").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(phase_names(&body), vec!["foundations", "case_practice"]);
    assert_eq!(body["estimated_total_time"], 100);
    assert_eq!(body["user_level"], 1.0);

    let foundations = &body["learning_path"][0];
    assert_eq!(foundations["label"], "Foundations");
    assert_eq!(
        foundations["items"][0],
        json!({ "id": "theory_1", "title": "Overview of the Four-Step Method", "type": "theory" })
    );
}

#[tokio::test]
async fn test_weak_learner_gets_reinforcement() {
    let app = create_test_app().await;

    let (status, body) =
        get_json(&app, "/api/v1/recommendations/learning-path?user_id=weak-learner").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        phase_names(&body),
        vec!["foundations", "reinforcement", "case_practice"]
    );

    let reinforcement: Vec<&str> = body["learning_path"][1]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        reinforcement,
        vec!["theory_3", "theory_4", "practice_basic_1", "practice_logic_1"]
    );

    assert_eq!(body["estimated_total_time"], 200);
    assert_eq!(
        body["personalization_factors"]["weak_areas"],
        json!(["theory", "cases", "practice"])
    );
    assert_eq!(body["personalization_factors"]["learning_pace"], "normal");
}

#[tokio::test]
async fn test_experienced_learner_skips_foundations() {
    let app = create_test_app().await;

    let (_, body) =
        get_json(&app, "/api/v1/recommendations/learning-path?user_id=strong-learner").await;

    assert_eq!(phase_names(&body), vec!["case_practice"]);
    assert_eq!(body["estimated_total_time"], 50);
    assert_eq!(body["user_level"], 2.0);
    assert_eq!(
        body["personalization_factors"]["strong_areas"],
        json!(["theory", "practice"])
    );
}

#[tokio::test]
async fn test_missing_user_id() {
    let app = create_test_app().await;

    let (status, body) = get_json(&app, "/api/v1/recommendations/learning-path").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "user_id is required");
}
