use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::progress::{LearningModule, SkillLevels};

pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningPace {
    Fast,
    #[default]
    Normal,
    Slow,
}

/// Behavioral summary derived from a user's activity. Rebuilt on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub skill_levels: SkillLevels,
    /// Never populated from activity data; scoring treats it as an input hook.
    pub preferred_topics: BTreeSet<String>,
    /// Always within [MIN_DIFFICULTY, MAX_DIFFICULTY]
    pub preferred_difficulty: f64,
    pub preferred_problem_types: BTreeSet<String>,
    pub learning_pace: LearningPace,
    pub weak_areas: BTreeSet<LearningModule>,
    pub strong_areas: BTreeSet<LearningModule>,
    /// Seconds
    pub total_time_spent: i64,
    /// 0.0..=1.0
    pub completion_rate: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            skill_levels: SkillLevels::default(),
            preferred_topics: BTreeSet::new(),
            preferred_difficulty: MIN_DIFFICULTY,
            preferred_problem_types: BTreeSet::new(),
            learning_pace: LearningPace::Normal,
            weak_areas: BTreeSet::new(),
            strong_areas: BTreeSet::new(),
            total_time_spent: 0,
            completion_rate: 0.0,
        }
    }
}

impl UserProfile {
    pub fn shift_difficulty(&mut self, delta: f64) {
        self.preferred_difficulty =
            (self.preferred_difficulty + delta).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_difficulty_stays_in_range() {
        let mut profile = UserProfile::default();
        for delta in [-1.0, 0.5, 3.0, 2.0, -0.5, -10.0, 0.5] {
            profile.shift_difficulty(delta);
            assert!(profile.preferred_difficulty >= MIN_DIFFICULTY);
            assert!(profile.preferred_difficulty <= MAX_DIFFICULTY);
        }
        assert_eq!(profile.preferred_difficulty, 1.5);
    }

    #[test]
    fn serializes_sets_as_arrays() {
        let mut profile = UserProfile::default();
        profile.weak_areas.insert(LearningModule::Theory);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["weak_areas"], serde_json::json!(["theory"]));
        assert_eq!(json["learning_pace"], "normal");
        assert_eq!(json["preferred_topics"], serde_json::json!([]));
    }
}
