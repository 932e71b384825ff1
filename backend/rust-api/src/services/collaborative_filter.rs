use std::collections::BTreeMap;

use super::activity_store::ActivityStore;
use super::errors::StoreError;
use crate::models::progress::ProgressRecord;
use crate::models::recommendation::CollaborativeRecommendation;

pub const MAX_COLLABORATIVE_RECOMMENDATIONS: usize = 5;
pub const SIMILARITY_THRESHOLD: f64 = 0.5;
pub const LIKED_SCORE: f64 = 80.0;
pub const MIN_SHARED_ITEMS: usize = 2;

/// user id -> lesson id -> score
pub type UserItemMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// Re-reads every progress row on each call. O(all rows); a precomputed
/// matrix would need invalidation on every progress write.
pub async fn recommend_collaborative(
    store: &dyn ActivityStore,
    user_id: &str,
) -> Result<Vec<CollaborativeRecommendation>, StoreError> {
    let rows = store.get_all_progress().await?;
    let matrix = build_user_item_matrix(&rows);
    let recommendations = recommend_from_matrix(&matrix, user_id);

    tracing::debug!(
        user_id,
        users = matrix.len(),
        rows = rows.len(),
        recommended = recommendations.len(),
        "Collaborative filter finished"
    );

    Ok(recommendations)
}

pub fn build_user_item_matrix(rows: &[ProgressRecord]) -> UserItemMatrix {
    let mut matrix = UserItemMatrix::new();
    for row in rows {
        matrix
            .entry(row.user_id.clone())
            .or_default()
            .insert(row.lesson_id.clone(), f64::from(row.score));
    }
    matrix
}

/// Pearson correlation over the items both users rated. Returns 0 when
/// fewer than two items are shared or either side has no variance.
pub fn pearson_similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let shared: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|(item, &x)| b.get(item).map(|&y| (x, y)))
        .collect();

    if shared.len() < MIN_SHARED_ITEMS {
        return 0.0;
    }

    let n = shared.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_yy, mut sum_xy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in &shared {
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_yy += y * y;
        sum_xy += x * y;
    }

    let numerator = sum_xy - sum_x * sum_y / n;
    let variance_product = (sum_xx - sum_x * sum_x / n) * (sum_yy - sum_y * sum_y / n);
    if variance_product <= 0.0 {
        return 0.0;
    }

    let similarity = numerator / variance_product.sqrt();
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

pub fn recommend_from_matrix(
    matrix: &UserItemMatrix,
    user_id: &str,
) -> Vec<CollaborativeRecommendation> {
    let empty = BTreeMap::new();
    let target = matrix.get(user_id).unwrap_or(&empty);

    let mut candidates = Vec::new();
    for (other_id, other_items) in matrix {
        if other_id == user_id {
            continue;
        }

        let similarity = pearson_similarity(target, other_items);
        if similarity <= SIMILARITY_THRESHOLD {
            continue;
        }

        // Several similar users may propose the same item; each proposal is kept.
        for (item_id, &score) in other_items {
            if score >= LIKED_SCORE && !target.contains_key(item_id) {
                candidates.push(CollaborativeRecommendation {
                    item_id: item_id.clone(),
                    predicted_score: score * similarity,
                    reason: format!(
                        "Learners with similar results rated this highly (similarity: {:.2})",
                        similarity
                    ),
                });
            }
        }
    }

    candidates.sort_by(|a, b| b.predicted_score.total_cmp(&a.predicted_score));
    candidates.truncate(MAX_COLLABORATIVE_RECOMMENDATIONS);
    candidates
}
