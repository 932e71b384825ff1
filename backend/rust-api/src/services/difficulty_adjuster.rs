use super::errors::EngineError;
use crate::models::recommendation::{
    AdaptiveDifficultyResponse, AdjustmentType, CurrentPerformance, DifficultyAdjustment,
    PerformanceLevel,
};

pub const EXCELLENT_AVERAGE: f64 = 85.0;
pub const GOOD_AVERAGE: f64 = 75.0;
pub const STRUGGLING_AVERAGE: f64 = 70.0;
pub const STEEP_DECLINE: f64 = -10.0;
pub const DECLINE: f64 = -5.0;
/// Scores needed before a trend is computed.
pub const MIN_SCORES_FOR_TREND: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyAssessment {
    pub average: f64,
    pub trend: f64,
    pub level: PerformanceLevel,
    pub adjustment: AdjustmentType,
    pub message: &'static str,
    pub actions: Vec<&'static str>,
}

impl AdjustmentType {
    pub fn delta(&self) -> i8 {
        match self {
            AdjustmentType::Increase => 1,
            AdjustmentType::Maintain => 0,
            AdjustmentType::Decrease => -1,
        }
    }
}

pub fn adjust(recent_scores: &[f64]) -> Result<DifficultyAssessment, EngineError> {
    if recent_scores.is_empty() {
        return Err(EngineError::validation(
            "recent_scores must contain at least one score",
        ));
    }
    if recent_scores.iter().any(|s| !s.is_finite()) {
        return Err(EngineError::validation("recent_scores must be finite numbers"));
    }

    let average = recent_scores.iter().sum::<f64>() / recent_scores.len() as f64;
    let trend = score_trend(recent_scores);

    let level = if average >= EXCELLENT_AVERAGE {
        PerformanceLevel::Excellent
    } else if average >= GOOD_AVERAGE {
        PerformanceLevel::Good
    } else {
        PerformanceLevel::NeedsImprovement
    };

    let adjustment = if average >= EXCELLENT_AVERAGE && trend >= 0.0 {
        AdjustmentType::Increase
    } else if average < STRUGGLING_AVERAGE || trend < STEEP_DECLINE {
        AdjustmentType::Decrease
    } else {
        AdjustmentType::Maintain
    };

    Ok(DifficultyAssessment {
        average,
        trend,
        level,
        adjustment,
        message: adjustment_message(adjustment),
        actions: recommended_actions(average, trend),
    })
}

/// Mean of the last two scores minus mean of the first two.
fn score_trend(scores: &[f64]) -> f64 {
    let n = scores.len();
    if n < MIN_SCORES_FOR_TREND {
        return 0.0;
    }
    (scores[n - 1] + scores[n - 2]) / 2.0 - (scores[0] + scores[1]) / 2.0
}

fn adjustment_message(adjustment: AdjustmentType) -> &'static str {
    match adjustment {
        AdjustmentType::Increase => {
            "You are performing very well. Try some more challenging content."
        }
        AdjustmentType::Decrease => {
            "Consolidate the current difficulty level first to build a solid foundation."
        }
        AdjustmentType::Maintain => "The current difficulty suits you well. Keep it up.",
    }
}

fn recommended_actions(average: f64, trend: f64) -> Vec<&'static str> {
    let mut actions = if average >= EXCELLENT_AVERAGE {
        vec![
            "Attempt harder challenge problems",
            "Study advanced problem-solving techniques",
        ]
    } else if average >= GOOD_AVERAGE {
        vec![
            "Keep your current study rhythm",
            "Add a little more practice",
        ]
    } else {
        vec![
            "Review the foundational theory",
            "Work through more basic exercises",
            "Ask the AI tutor for help",
        ]
    };

    if trend < DECLINE {
        actions.push("Analyze the causes of recent mistakes");
        actions.push("Adjust your study strategy");
    }
    actions
}

/// Encouragement shown after a single completed item.
pub fn encouragement_message(score: f64) -> &'static str {
    if score >= 90.0 {
        "Outstanding work! You have mastered this and are ready for harder content."
    } else if score >= 80.0 {
        "Great job! Keep up this learning pace."
    } else if score >= 70.0 {
        "Good progress! A few more rounds of practice and you will have it."
    } else {
        "That's okay, learning takes time. Consolidate the basics first."
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl From<DifficultyAssessment> for AdaptiveDifficultyResponse {
    fn from(assessment: DifficultyAssessment) -> Self {
        AdaptiveDifficultyResponse {
            current_performance: CurrentPerformance {
                average_score: round1(assessment.average),
                trend: round1(assessment.trend),
                performance_level: assessment.level,
            },
            difficulty_adjustment: DifficultyAdjustment {
                adjustment: assessment.adjustment.delta(),
                kind: assessment.adjustment,
                message: assessment.message.to_string(),
            },
            recommended_actions: assessment
                .actions
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
