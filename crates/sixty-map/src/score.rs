//! Similarity ranking of target fields.
//!
//! Uses Jaro-Winkler similarity on normalized names to order the target
//! vocabulary for a column. Ranking only feeds the alternatives offered for
//! manual overrides; auto-mapping stays first-match-wins.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;
use sixty_model::TargetField;

use crate::patterns::target_patterns;
use crate::utils::normalize;

/// A target field with its similarity to a column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTarget {
    pub name: String,
    /// Similarity in `0.0..=1.0`.
    pub score: f32,
}

/// Engine for ranking targets against a column name.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    targets: Vec<TargetField>,
}

impl ScoringEngine {
    pub fn new(targets: Vec<TargetField>) -> Self {
        Self { targets }
    }

    /// Similarity of a column name to one target, best of its name and key.
    pub fn score(&self, column: &str, target: &TargetField) -> f32 {
        let normalized = normalize(column);
        if normalized.is_empty() {
            return 0.0;
        }
        target_patterns(target)
            .iter()
            .map(|pattern| jaro_winkler::similarity(normalized.chars(), pattern.chars()) as f32)
            .fold(0.0, f32::max)
    }

    /// Returns up to `limit` targets, highest score first.
    ///
    /// Ties keep vocabulary order.
    pub fn rank_targets(&self, column: &str, limit: usize) -> Vec<RankedTarget> {
        let mut ranked: Vec<RankedTarget> = self
            .targets
            .iter()
            .map(|target| RankedTarget {
                name: target.name.clone(),
                score: self.score(column, target),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(names: &[&str]) -> ScoringEngine {
        ScoringEngine::new(
            names
                .iter()
                .map(|name| TargetField::optional(*name).unwrap())
                .collect(),
        )
    }

    #[test]
    fn identical_names_score_one() {
        let engine = engine(&["email"]);
        let score = engine.score("Email", &engine.targets[0]);
        assert!((score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ranks_closest_first() {
        let engine = engine(&["company_name", "first_name", "phone"]);
        let ranked = engine.rank_targets("First", 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "first_name");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn empty_column_scores_zero() {
        let engine = engine(&["email"]);
        assert_eq!(engine.score("--", &engine.targets[0]), 0.0);
    }
}
