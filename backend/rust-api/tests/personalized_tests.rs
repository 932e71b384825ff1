// Personalized recommendation endpoint tests
use axum::http::StatusCode;
use polya_api::services::memory_store::MemoryActivityStore;

mod common;
use common::{create_test_app, create_test_app_with, get_json};

#[tokio::test]
async fn test_new_user_gets_content_but_no_collaborative() {
    let app = create_test_app_with(MemoryActivityStore::new()).await;

    let (status, body) = get_json(&app, "/api/v1/recommendations/personalized?user_id=newcomer").await;
    assert_eq!(status, StatusCode::OK);

    let content = body["content_based_recommendations"].as_array().unwrap();
    assert!(!content.is_empty());
    assert!(content.len() <= 10);
    assert_eq!(
        body["collaborative_recommendations"].as_array().unwrap().len(),
        0
    );

    assert_eq!(body["user_profile"]["preferred_difficulty"], 1.0);
    assert_eq!(body["user_profile"]["learning_pace"], "normal");
    assert_eq!(body["user_profile"]["completion_rate"], 0.0);
    assert!(body["timestamp"].is_string());

    let first = &content[0];
    assert_eq!(first["id"], "theory_1");
    assert_eq!(first["content_type"], "theory_lesson");
    assert_eq!(first["reasons"][0], "difficulty_match");
    assert!(first["topics"].is_array());
}

#[tokio::test]
async fn test_scores_are_sorted_and_rounded() {
    let app = create_test_app().await;

    let (status, body) =
        get_json(&app, "/api/v1/recommendations/personalized?user_id=strong-learner").await;
    assert_eq!(status, StatusCode::OK);

    let scores: Vec<f64> = body["content_based_recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|rec| rec["score"].as_f64().unwrap())
        .collect();

    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    for score in scores {
        assert_eq!((score * 1000.0).round() / 1000.0, score);
    }
}

#[tokio::test]
async fn test_profile_reflects_activity() {
    let app = create_test_app().await;

    let (_, body) =
        get_json(&app, "/api/v1/recommendations/personalized?user_id=strong-learner").await;
    let profile = &body["user_profile"];

    assert_eq!(profile["preferred_difficulty"], 2.0);
    assert_eq!(profile["learning_pace"], "fast");
    assert_eq!(profile["preferred_problem_types"], serde_json::json!(["math"]));
    assert_eq!(
        profile["strong_areas"],
        serde_json::json!(["theory", "practice"])
    );
    assert_eq!(profile["total_time_spent"], 7200);
    assert_eq!(profile["skill_levels"]["planning"], 3.0);
    assert_eq!(profile["completion_rate"], 1.0);
}

#[tokio::test]
async fn test_collaborative_recommendations_from_similar_peers() {
    let app = create_test_app().await;

    let (_, body) =
        get_json(&app, "/api/v1/recommendations/personalized?user_id=strong-learner").await;
    let collaborative = body["collaborative_recommendations"].as_array().unwrap();

    let ids: Vec<&str> = collaborative
        .iter()
        .map(|rec| rec["item_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["case_logic_1", "theory_3"]);
    assert!(collaborative[0]["reason"]
        .as_str()
        .unwrap()
        .contains("similarity"));

    // Anti-correlated with everyone
    let (_, weak) =
        get_json(&app, "/api/v1/recommendations/personalized?user_id=weak-learner").await;
    assert_eq!(
        weak["collaborative_recommendations"].as_array().unwrap().len(),
        0
    );
}

#[tokio::test]
async fn test_content_type_filter() {
    let app = create_test_app().await;

    let (status, body) = get_json(
        &app,
        "/api/v1/recommendations/personalized?user_id=strong-learner&content_type=case_studies",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let content = body["content_based_recommendations"].as_array().unwrap();
    assert_eq!(content.len(), 5);
    assert!(content
        .iter()
        .all(|rec| rec["content_type"] == "case_study"));

    let (status, _) = get_json(
        &app,
        "/api/v1/recommendations/personalized?user_id=strong-learner&content_type=all",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let app = create_test_app().await;

    let (status, body) = get_json(&app, "/api/v1/recommendations/personalized").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = get_json(&app, "/api/v1/recommendations/personalized?user_id=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(
        &app,
        "/api/v1/recommendations/personalized?user_id=u-1&content_type=videos",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("videos"));
}
