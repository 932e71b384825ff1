use super::catalog::ContentCatalog;
use crate::models::profile::UserProfile;
use crate::models::progress::LearningModule;
use crate::models::recommendation::{
    LearningPathResponse, LearningPhase, PathItem, PathPhase, PersonalizationFactors,
};

/// Seconds of total study below which a learner starts with the foundations.
pub const NEWCOMER_TIME_SECS: i64 = 3600;
pub const ADVANCED_DIFFICULTY: f64 = 3.0;
/// Flat per-item estimate in minutes; item durations are ignored.
pub const MINUTES_PER_ITEM: u32 = 25;

const FOUNDATION_ITEMS: &[&str] = &["theory_1", "theory_2"];
const CASE_PRACTICE_ITEMS: &[&str] = &["case_math_1", "case_logic_1"];
const ADVANCED_ITEMS: &[&str] = &["practice_advanced_1", "case_work_1"];

fn remedial_items(module: LearningModule) -> &'static [&'static str] {
    match module {
        LearningModule::Theory => &["theory_3", "theory_4"],
        LearningModule::Practice => &["practice_basic_1", "practice_logic_1"],
        LearningModule::Cases => &[],
    }
}

pub fn plan_learning_path(profile: &UserProfile, catalog: &ContentCatalog) -> LearningPathResponse {
    let mut phases = Vec::new();

    if profile.total_time_spent < NEWCOMER_TIME_SECS {
        push_phase(&mut phases, catalog, PathPhase::Foundations, FOUNDATION_ITEMS.iter().copied());
    }

    let remedial: Vec<&str> = profile
        .weak_areas
        .iter()
        .flat_map(|module| remedial_items(*module).iter().copied())
        .collect();
    if !remedial.is_empty() {
        push_phase(&mut phases, catalog, PathPhase::Reinforcement, remedial.into_iter());
    }

    push_phase(&mut phases, catalog, PathPhase::CasePractice, CASE_PRACTICE_ITEMS.iter().copied());

    if profile.preferred_difficulty >= ADVANCED_DIFFICULTY {
        push_phase(&mut phases, catalog, PathPhase::AdvancedChallenge, ADVANCED_ITEMS.iter().copied());
    }

    let item_count: usize = phases.iter().map(|phase| phase.items.len()).sum();

    LearningPathResponse {
        learning_path: phases,
        estimated_total_time: MINUTES_PER_ITEM * item_count as u32,
        user_level: profile.preferred_difficulty,
        personalization_factors: PersonalizationFactors {
            weak_areas: profile.weak_areas.iter().copied().collect(),
            strong_areas: profile.strong_areas.iter().copied().collect(),
            learning_pace: profile.learning_pace,
        },
    }
}

fn push_phase<'a>(
    phases: &mut Vec<LearningPhase>,
    catalog: &ContentCatalog,
    phase: PathPhase,
    ids: impl Iterator<Item = &'a str>,
) {
    let items = ids
        .filter_map(|id| match catalog.get(id) {
            Some(item) => Some(PathItem {
                id: item.id.clone(),
                title: item.title.clone(),
                kind: item.content_type.short_label().to_string(),
            }),
            None => {
                tracing::warn!(item_id = id, phase = phase.label(), "Learning path item missing from catalog");
                None
            }
        })
        .collect();

    phases.push(LearningPhase {
        phase,
        label: phase.label().to_string(),
        items,
    });
}
