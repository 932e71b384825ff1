use std::collections::BTreeMap;

use super::activity_store::ActivityStore;
use super::errors::StoreError;
use crate::metrics::PROFILE_BUILD_DURATION_SECONDS;
use crate::models::profile::{LearningPace, UserProfile};
use crate::models::progress::{
    LearningModule, LearningStats, ProblemSolvingRecord, ProgressRecord,
};

/// Average completed score at or above which the preferred difficulty is raised.
pub const RAISE_DIFFICULTY_SCORE: f64 = 85.0;
/// Average completed score below which the preferred difficulty is lowered.
pub const LOWER_DIFFICULTY_SCORE: f64 = 70.0;
pub const STRONG_AREA_SCORE: f64 = 80.0;
pub const WEAK_AREA_SCORE: f64 = 70.0;
pub const PREFERRED_TYPE_SUCCESS_RATE: f64 = 0.8;
/// Seconds
pub const FAST_PACE_MAX_SECS: f64 = 600.0;
/// Seconds
pub const SLOW_PACE_MIN_SECS: f64 = 1800.0;

/// Fetches the user's activity and derives a fresh profile. Missing rows
/// degrade to the default profile; only store failures are errors.
pub async fn build_profile(
    store: &dyn ActivityStore,
    user_id: &str,
) -> Result<UserProfile, StoreError> {
    let timer = PROFILE_BUILD_DURATION_SECONDS.start_timer();

    let (progress, records, stats) = tokio::try_join!(
        store.get_progress(user_id),
        store.get_problem_records(user_id),
        store.get_learning_stats(user_id),
    )?;

    let profile = derive_profile(&progress, &records, stats.as_ref());
    timer.observe_duration();

    tracing::debug!(
        user_id,
        progress_rows = progress.len(),
        problem_records = records.len(),
        preferred_difficulty = profile.preferred_difficulty,
        pace = ?profile.learning_pace,
        "User profile built"
    );

    Ok(profile)
}

pub fn derive_profile(
    progress: &[ProgressRecord],
    records: &[ProblemSolvingRecord],
    stats: Option<&LearningStats>,
) -> UserProfile {
    let mut profile = UserProfile::default();

    if let Some(stats) = stats {
        profile.skill_levels = stats.skill_levels;
        profile.total_time_spent = stats.total_time_spent;
    }

    if !progress.is_empty() {
        apply_progress(&mut profile, progress);
    }

    if !records.is_empty() {
        apply_problem_records(&mut profile, records);
    }

    profile
}

fn apply_progress(profile: &mut UserProfile, progress: &[ProgressRecord]) {
    let completed: Vec<&ProgressRecord> = progress.iter().filter(|p| p.completed).collect();
    profile.completion_rate = completed.len() as f64 / progress.len() as f64;

    if completed.is_empty() {
        return;
    }

    let avg_score = mean(completed.iter().map(|p| f64::from(p.score)));
    if avg_score >= RAISE_DIFFICULTY_SCORE {
        profile.shift_difficulty(1.0);
    } else if avg_score < LOWER_DIFFICULTY_SCORE {
        profile.shift_difficulty(-1.0);
    }

    let mut by_module: BTreeMap<LearningModule, Vec<f64>> = BTreeMap::new();
    for record in &completed {
        by_module
            .entry(record.module)
            .or_default()
            .push(f64::from(record.score));
    }

    for (module, scores) in by_module {
        let module_avg = mean(scores.into_iter());
        if module_avg >= STRONG_AREA_SCORE {
            profile.strong_areas.insert(module);
        } else if module_avg < WEAK_AREA_SCORE {
            profile.weak_areas.insert(module);
        }
    }
}

fn apply_problem_records(profile: &mut UserProfile, records: &[ProblemSolvingRecord]) {
    let mut by_type: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_type
            .entry(record.problem_type.as_str())
            .or_default()
            .push(record.success_rate);
    }

    for (problem_type, rates) in by_type {
        if mean(rates.into_iter()) >= PREFERRED_TYPE_SUCCESS_RATE {
            profile
                .preferred_problem_types
                .insert(problem_type.to_string());
        }
    }

    let avg_time = mean(records.iter().map(|r| r.completion_time as f64));
    profile.learning_pace = if avg_time < FAST_PACE_MAX_SECS {
        LearningPace::Fast
    } else if avg_time > SLOW_PACE_MIN_SECS {
        LearningPace::Slow
    } else {
        LearningPace::Normal
    };
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::SkillLevels;
    use crate::services::memory_store::MemoryActivityStore;

    fn progress(module: LearningModule, lesson: &str, completed: bool, score: i32) -> ProgressRecord {
        ProgressRecord::new("u-1", module, lesson, completed, score)
    }

    fn attempt(problem_type: &str, seconds: i64, success_rate: f64) -> ProblemSolvingRecord {
        ProblemSolvingRecord::new("u-1", problem_type, "p", seconds, success_rate)
    }

    #[test]
    fn empty_history_yields_default_profile() {
        let profile = derive_profile(&[], &[], None);
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.skill_levels, SkillLevels::default());
        assert_eq!(profile.learning_pace, LearningPace::Normal);
        assert_eq!(profile.completion_rate, 0.0);
        assert_eq!(profile.preferred_difficulty, 1.0);
    }

    #[test]
    fn stats_row_supplies_skills_and_time() {
        let mut stats = LearningStats::new("u-1");
        stats.total_time_spent = 5400;
        stats.skill_levels.planning = 3.0;

        let profile = derive_profile(&[], &[], Some(&stats));
        assert_eq!(profile.total_time_spent, 5400);
        assert_eq!(profile.skill_levels.planning, 3.0);
        assert_eq!(profile.skill_levels.reflection, 1.0);
    }

    #[test]
    fn high_scores_raise_difficulty_and_mark_strong_areas() {
        let rows = vec![
            progress(LearningModule::Theory, "theory_1", true, 90),
            progress(LearningModule::Theory, "theory_2", true, 95),
            progress(LearningModule::Practice, "practice_basic_1", true, 85),
            progress(LearningModule::Cases, "case_math_1", false, 0),
        ];

        let profile = derive_profile(&rows, &[], None);
        assert_eq!(profile.completion_rate, 0.75);
        assert_eq!(profile.preferred_difficulty, 2.0);
        assert!(profile.strong_areas.contains(&LearningModule::Theory));
        assert!(profile.strong_areas.contains(&LearningModule::Practice));
        assert!(profile.weak_areas.is_empty());
    }

    #[test]
    fn low_scores_keep_difficulty_floor_and_mark_weak_areas() {
        let rows = vec![
            progress(LearningModule::Theory, "theory_1", true, 50),
            progress(LearningModule::Practice, "practice_basic_1", true, 60),
            progress(LearningModule::Cases, "case_math_1", true, 75),
        ];

        let profile = derive_profile(&rows, &[], None);
        assert_eq!(profile.preferred_difficulty, 1.0);
        assert!(profile.weak_areas.contains(&LearningModule::Theory));
        assert!(profile.weak_areas.contains(&LearningModule::Practice));
        // 75 sits between the thresholds
        assert!(!profile.weak_areas.contains(&LearningModule::Cases));
        assert!(!profile.strong_areas.contains(&LearningModule::Cases));
    }

    #[test]
    fn incomplete_rows_only_affect_completion_rate() {
        let rows = vec![
            progress(LearningModule::Theory, "theory_1", false, 10),
            progress(LearningModule::Theory, "theory_2", false, 20),
        ];

        let profile = derive_profile(&rows, &[], None);
        assert_eq!(profile.completion_rate, 0.0);
        assert_eq!(profile.preferred_difficulty, 1.0);
        assert!(profile.weak_areas.is_empty());
    }

    #[test]
    fn problem_records_drive_types_and_pace() {
        let records = vec![
            attempt("math", 300, 0.9),
            attempt("math", 400, 0.8),
            attempt("logic", 500, 0.5),
        ];

        let profile = derive_profile(&[], &records, None);
        assert_eq!(
            profile.preferred_problem_types.iter().collect::<Vec<_>>(),
            vec!["math"]
        );
        assert_eq!(profile.learning_pace, LearningPace::Fast);
    }

    #[test]
    fn pace_boundaries() {
        let slow = derive_profile(&[], &[attempt("work", 2400, 0.5)], None);
        assert_eq!(slow.learning_pace, LearningPace::Slow);

        let at_fast_edge = derive_profile(&[], &[attempt("work", 600, 0.5)], None);
        assert_eq!(at_fast_edge.learning_pace, LearningPace::Normal);

        let at_slow_edge = derive_profile(&[], &[attempt("work", 1800, 0.5)], None);
        assert_eq!(at_slow_edge.learning_pace, LearningPace::Normal);
    }

    #[tokio::test]
    async fn build_profile_reads_from_store() {
        let store = MemoryActivityStore::new();
        store
            .upsert_progress(progress(LearningModule::Practice, "practice_logic_1", true, 92))
            .await;
        store.append_problem_record(attempt("logic", 2000, 0.85)).await;

        let profile = build_profile(&store, "u-1").await.unwrap();
        assert_eq!(profile.preferred_difficulty, 2.0);
        assert_eq!(profile.learning_pace, LearningPace::Slow);
        assert!(profile.preferred_problem_types.contains("logic"));

        let stranger = build_profile(&store, "someone-else").await.unwrap();
        assert_eq!(stranger, UserProfile::default());
    }
}
