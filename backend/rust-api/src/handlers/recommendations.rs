use axum::{extract::State, Json};
use std::sync::Arc;

use super::ApiError;
use crate::extractors::{AppJson, AppQuery};
use crate::models::content::ContentTypeFilter;
use crate::models::recommendation::{
    AdaptiveDifficultyRequest, AdaptiveDifficultyResponse, LearningPathQuery,
    LearningPathResponse, NextRecommendationRequest, NextRecommendationResponse,
    PersonalizedQuery, PersonalizedRecommendationsResponse,
};
use crate::services::AppState;

fn required_user_id(user_id: Option<String>) -> Result<String, ApiError> {
    user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("user_id is required"))
}

/// GET /api/v1/recommendations/personalized
pub async fn get_personalized(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<PersonalizedQuery>,
) -> Result<Json<PersonalizedRecommendationsResponse>, ApiError> {
    let user_id = required_user_id(query.user_id)?;
    let filter = match query.content_type.as_deref() {
        Some(raw) => raw.parse::<ContentTypeFilter>().map_err(ApiError::bad_request)?,
        None => ContentTypeFilter::All,
    };

    let response = state.recommendations.personalized(&user_id, filter).await?;
    Ok(Json(response))
}

/// GET /api/v1/recommendations/learning-path
pub async fn get_learning_path(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<LearningPathQuery>,
) -> Result<Json<LearningPathResponse>, ApiError> {
    let user_id = required_user_id(query.user_id)?;
    let response = state.recommendations.learning_path(&user_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/recommendations/next
pub async fn next_recommendation(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<NextRecommendationRequest>,
) -> Result<Json<NextRecommendationResponse>, ApiError> {
    let response = state.recommendations.next_recommendation(&payload).await?;
    Ok(Json(response))
}

/// POST /api/v1/recommendations/adaptive-difficulty
pub async fn adaptive_difficulty(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<AdaptiveDifficultyRequest>,
) -> Result<Json<AdaptiveDifficultyResponse>, ApiError> {
    let response = state.recommendations.adaptive_difficulty(&payload)?;
    Ok(Json(response))
}
