use crate::models::content::ContentItem;
use crate::models::profile::{LearningPace, UserProfile};
use crate::models::recommendation::{ContentRecommendation, NextItem, RecommendationReason};

pub const MAX_CONTENT_RECOMMENDATIONS: usize = 10;
/// Fraction of the difficulty factor lost per level of distance.
pub const DIFFICULTY_PENALTY_PER_LEVEL: f64 = 0.3;
/// Fraction of the topic factor earned per overlapping topic.
pub const TOPIC_CREDIT_PER_MATCH: f64 = 0.5;
/// Minutes
pub const SHORT_ITEM_MAX_MINUTES: u32 = 15;
/// Minutes
pub const LONG_ITEM_MIN_MINUTES: u32 = 25;

/// Weight of each scoring factor. The defaults sum to 1.0 but nothing enforces that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub difficulty: f64,
    pub topic: f64,
    pub problem_type: f64,
    pub pace: f64,
    pub weak_area: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            difficulty: 0.30,
            topic: 0.20,
            problem_type: 0.20,
            pace: 0.15,
            weak_area: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a> {
    pub item: &'a ContentItem,
    pub score: f64,
    pub reasons: Vec<RecommendationReason>,
}

impl From<&ScoredItem<'_>> for ContentRecommendation {
    fn from(scored: &ScoredItem<'_>) -> Self {
        ContentRecommendation {
            id: scored.item.id.clone(),
            title: scored.item.title.clone(),
            content_type: scored.item.content_type,
            difficulty: scored.item.difficulty,
            estimated_time: scored.item.estimated_time,
            topics: scored.item.topics.clone(),
            score: (scored.score * 1000.0).round() / 1000.0,
            reasons: scored.reasons.clone(),
        }
    }
}

impl From<&ScoredItem<'_>> for NextItem {
    fn from(scored: &ScoredItem<'_>) -> Self {
        NextItem {
            id: scored.item.id.clone(),
            title: scored.item.title.clone(),
            content_type: scored.item.content_type,
            difficulty: scored.item.difficulty,
            estimated_time: scored.item.estimated_time,
            reasons: scored.reasons.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentScorer {
    weights: ScoringWeights,
}

impl ContentScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, profile: &UserProfile, item: &ContentItem) -> f64 {
        let w = &self.weights;

        let distance = (f64::from(item.difficulty) - profile.preferred_difficulty).abs();
        let difficulty = (1.0 - distance * DIFFICULTY_PENALTY_PER_LEVEL).max(0.0) * w.difficulty;

        let overlap = item
            .topics
            .iter()
            .filter(|topic| profile.preferred_topics.contains(*topic))
            .count();
        let topic = (overlap as f64 * TOPIC_CREDIT_PER_MATCH).min(1.0) * w.topic;

        let problem_type = if matches_preferred_type(profile, item) {
            w.problem_type
        } else {
            0.0
        };

        let pace = if fits_pace(profile.learning_pace, item.estimated_time) {
            w.pace
        } else {
            0.0
        };

        let weak_area = if touches_weak_area(profile, item) {
            w.weak_area
        } else {
            0.0
        };

        difficulty + topic + problem_type + pace + weak_area
    }

    /// Scores every candidate, sorts by score descending (ties keep input
    /// order) and keeps the top [`MAX_CONTENT_RECOMMENDATIONS`].
    pub fn rank<'a>(
        &self,
        profile: &UserProfile,
        candidates: impl IntoIterator<Item = &'a ContentItem>,
    ) -> Vec<ScoredItem<'a>> {
        let mut scored: Vec<ScoredItem<'a>> = candidates
            .into_iter()
            .map(|item| ScoredItem {
                item,
                score: self.score(profile, item),
                reasons: recommendation_reasons(profile, item),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(MAX_CONTENT_RECOMMENDATIONS);
        scored
    }
}

pub fn recommendation_reasons(
    profile: &UserProfile,
    item: &ContentItem,
) -> Vec<RecommendationReason> {
    let mut reasons = Vec::new();
    let difficulty = f64::from(item.difficulty);

    if difficulty == profile.preferred_difficulty {
        reasons.push(RecommendationReason::DifficultyMatch);
    } else if difficulty == profile.preferred_difficulty + 1.0 {
        reasons.push(RecommendationReason::AdequateChallenge);
    }

    if matches_preferred_type(profile, item) {
        reasons.push(RecommendationReason::PreferredType);
    }

    if touches_weak_area(profile, item) {
        reasons.push(RecommendationReason::StrengthensWeakArea);
    }

    if profile
        .strong_areas
        .iter()
        .any(|module| item.has_topic(module.as_str()))
    {
        reasons.push(RecommendationReason::LeveragesStrength);
    }

    if reasons.is_empty() {
        reasons.push(RecommendationReason::WorthTrying);
    }
    reasons
}

fn matches_preferred_type(profile: &UserProfile, item: &ContentItem) -> bool {
    item.problem_type
        .as_ref()
        .is_some_and(|t| profile.preferred_problem_types.contains(t))
}

fn touches_weak_area(profile: &UserProfile, item: &ContentItem) -> bool {
    profile
        .weak_areas
        .iter()
        .any(|module| item.has_topic(module.as_str()))
}

fn fits_pace(pace: LearningPace, minutes: u32) -> bool {
    match pace {
        LearningPace::Fast => minutes <= SHORT_ITEM_MAX_MINUTES,
        LearningPace::Slow => minutes >= LONG_ITEM_MIN_MINUTES,
        LearningPace::Normal => (SHORT_ITEM_MAX_MINUTES..=LONG_ITEM_MIN_MINUTES).contains(&minutes),
    }
}
