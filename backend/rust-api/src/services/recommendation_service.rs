use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::activity_store::ActivityStore;
use super::catalog::{catalog, ContentCatalog};
use super::collaborative_filter::recommend_collaborative;
use super::content_scorer::ContentScorer;
use super::difficulty_adjuster::{adjust, encouragement_message};
use super::errors::EngineError;
use super::learning_path::plan_learning_path;
use super::profile_builder::build_profile;
use crate::metrics::record_recommendation;
use crate::models::content::ContentTypeFilter;
use crate::models::recommendation::{
    AdaptiveDifficultyRequest, AdaptiveDifficultyResponse, ContentRecommendation,
    LearningPathResponse, NextItem, NextRecommendationRequest, NextRecommendationResponse,
    PerformanceFeedback, PersonalizedRecommendationsResponse,
};

/// Score at or above which the next item is picked one half-level harder.
pub const NEXT_RAISE_SCORE: f64 = 85.0;
/// Score below which the next item is picked one half-level easier.
pub const NEXT_LOWER_SCORE: f64 = 70.0;
pub const NEXT_DIFFICULTY_STEP: f64 = 0.5;

pub struct RecommendationService {
    store: Arc<dyn ActivityStore>,
    catalog: &'static ContentCatalog,
    scorer: ContentScorer,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self {
            store,
            catalog: catalog(),
            scorer: ContentScorer::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: ContentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub async fn personalized(
        &self,
        user_id: &str,
        filter: ContentTypeFilter,
    ) -> Result<PersonalizedRecommendationsResponse, EngineError> {
        require_user_id(user_id)?;

        let (profile, collaborative) = tokio::try_join!(
            build_profile(self.store.as_ref(), user_id),
            recommend_collaborative(self.store.as_ref(), user_id),
        )?;

        let content_based: Vec<ContentRecommendation> = self
            .scorer
            .rank(&profile, self.catalog.partition(filter))
            .iter()
            .map(ContentRecommendation::from)
            .collect();

        record_recommendation("content_based");
        record_recommendation("collaborative");
        tracing::info!(
            user_id,
            content_based = content_based.len(),
            collaborative = collaborative.len(),
            "Personalized recommendations served"
        );

        Ok(PersonalizedRecommendationsResponse {
            user_profile: profile,
            content_based_recommendations: content_based,
            collaborative_recommendations: collaborative,
            timestamp: Utc::now(),
        })
    }

    pub async fn learning_path(&self, user_id: &str) -> Result<LearningPathResponse, EngineError> {
        require_user_id(user_id)?;

        let profile = build_profile(self.store.as_ref(), user_id).await?;
        let path = plan_learning_path(&profile, self.catalog);

        record_recommendation("learning_path");
        tracing::info!(
            user_id,
            phases = path.learning_path.len(),
            estimated_total_time = path.estimated_total_time,
            "Learning path served"
        );

        Ok(path)
    }

    pub async fn next_recommendation(
        &self,
        request: &NextRecommendationRequest,
    ) -> Result<NextRecommendationResponse, EngineError> {
        request.validate()?;
        let score = request.performance_score;

        let mut profile = build_profile(self.store.as_ref(), &request.user_id).await?;
        if score >= NEXT_RAISE_SCORE {
            profile.shift_difficulty(NEXT_DIFFICULTY_STEP);
        } else if score < NEXT_LOWER_SCORE {
            profile.shift_difficulty(-NEXT_DIFFICULTY_STEP);
        }

        let ranked = self
            .scorer
            .rank(&profile, self.catalog.partition(ContentTypeFilter::All));
        let next = ranked
            .iter()
            .find(|scored| request.completed_item_id.as_deref() != Some(scored.item.id.as_str()))
            .map(NextItem::from);

        record_recommendation("next");
        tracing::info!(
            user_id = %request.user_id,
            completed_item_id = ?request.completed_item_id,
            next_item_id = ?next.as_ref().map(|item| item.id.as_str()),
            level = profile.preferred_difficulty,
            "Next recommendation served"
        );

        Ok(NextRecommendationResponse {
            next_recommendation: next,
            performance_feedback: PerformanceFeedback {
                score,
                level_adjustment: profile.preferred_difficulty,
                encouragement: encouragement_message(score).to_string(),
            },
        })
    }

    /// Pure computation over the supplied scores; the store is not consulted.
    pub fn adaptive_difficulty(
        &self,
        request: &AdaptiveDifficultyRequest,
    ) -> Result<AdaptiveDifficultyResponse, EngineError> {
        request.validate()?;
        let assessment = adjust(&request.recent_scores)?;

        record_recommendation("adaptive");
        tracing::debug!(
            user_id = ?request.user_id,
            average = assessment.average,
            trend = assessment.trend,
            adjustment = ?assessment.adjustment,
            "Difficulty assessed"
        );

        Ok(assessment.into())
    }
}

fn require_user_id(user_id: &str) -> Result<(), EngineError> {
    if user_id.trim().is_empty() {
        return Err(EngineError::validation("user_id is required"));
    }
    Ok(())
}
