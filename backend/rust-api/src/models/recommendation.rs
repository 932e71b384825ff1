use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::content::ContentType;
use super::profile::{LearningPace, UserProfile};
use super::progress::LearningModule;

/// Why an item was proposed. Derived from the scoring factors that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    DifficultyMatch,
    AdequateChallenge,
    PreferredType,
    StrengthensWeakArea,
    LeveragesStrength,
    WorthTrying,
}

#[derive(Debug, Deserialize)]
pub struct PersonalizedQuery {
    pub user_id: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LearningPathQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentRecommendation {
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    pub difficulty: u8,
    pub estimated_time: u32,
    pub topics: Vec<String>,
    /// Rounded to three decimals
    pub score: f64,
    pub reasons: Vec<RecommendationReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaborativeRecommendation {
    pub item_id: String,
    pub predicted_score: f64,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct PersonalizedRecommendationsResponse {
    pub user_profile: UserProfile,
    pub content_based_recommendations: Vec<ContentRecommendation>,
    pub collaborative_recommendations: Vec<CollaborativeRecommendation>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathPhase {
    Foundations,
    Reinforcement,
    CasePractice,
    AdvancedChallenge,
}

impl PathPhase {
    pub fn label(&self) -> &'static str {
        match self {
            PathPhase::Foundations => "Foundations",
            PathPhase::Reinforcement => "Reinforcement",
            PathPhase::CasePractice => "Case Practice",
            PathPhase::AdvancedChallenge => "Advanced Challenge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathItem {
    pub id: String,
    pub title: String,
    /// theory | case | practice
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPhase {
    pub phase: PathPhase,
    pub label: String,
    pub items: Vec<PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalizationFactors {
    pub weak_areas: Vec<LearningModule>,
    pub strong_areas: Vec<LearningModule>,
    pub learning_pace: LearningPace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPathResponse {
    pub learning_path: Vec<LearningPhase>,
    /// Minutes
    pub estimated_total_time: u32,
    pub user_level: f64,
    pub personalization_factors: PersonalizationFactors,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NextRecommendationRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    #[serde(default)]
    pub completed_item_id: Option<String>,
    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "performance_score must be between 0 and 100"
    ))]
    pub performance_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextItem {
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    pub difficulty: u8,
    pub estimated_time: u32,
    pub reasons: Vec<RecommendationReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceFeedback {
    pub score: f64,
    /// Preferred difficulty after applying this result
    pub level_adjustment: f64,
    pub encouragement: String,
}

#[derive(Debug, Serialize)]
pub struct NextRecommendationResponse {
    pub next_recommendation: Option<NextItem>,
    pub performance_feedback: PerformanceFeedback,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdaptiveDifficultyRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "recent_scores must contain at least one score"))]
    pub recent_scores: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    NeedsImprovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Increase,
    Maintain,
    Decrease,
}

#[derive(Debug, Serialize)]
pub struct CurrentPerformance {
    pub average_score: f64,
    pub trend: f64,
    pub performance_level: PerformanceLevel,
}

#[derive(Debug, Serialize)]
pub struct DifficultyAdjustment {
    pub adjustment: i8,
    #[serde(rename = "type")]
    pub kind: AdjustmentType,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AdaptiveDifficultyResponse {
    pub current_performance: CurrentPerformance,
    pub difficulty_adjustment: DifficultyAdjustment,
    pub recommended_actions: Vec<String>,
}
