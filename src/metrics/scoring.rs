use serde::{Deserialize, Serialize};

use crate::metrics::MetricStore;
use crate::types::analysis::ScoreTable;
use crate::types::{Category, CategoryScores};

/// Weighted sum of a category's metric values.
///
/// No normalization beyond the weights themselves; the store guarantees the
/// weights sum to 1, so the result stays within 0..=100.
pub fn aggregate(store: &MetricStore, category: Category) -> f64 {
    store
        .definitions(category)
        .iter()
        .map(|def| def.weighted())
        .sum()
}

pub fn aggregate_all(store: &MetricStore) -> CategoryScores {
    let mut scores = CategoryScores::default();
    for category in Category::ALL {
        scores.set(category, aggregate(store, category));
    }
    scores
}

/// Re-apply the store's current weights to previously recorded raw values.
///
/// Metrics missing from the store's schema contribute nothing.
pub fn score_table(values: &ScoreTable, store: &MetricStore) -> CategoryScores {
    let mut scores = CategoryScores::default();
    for (category, metrics) in values {
        let total = metrics
            .iter()
            .map(|(id, value)| value * store.weight(*id))
            .sum();
        scores.set(*category, total);
    }
    scores
}

/// Improvement advice for a category scoring under its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub score: f64,
    pub threshold: f64,
    pub suggestions: Vec<String>,
}

fn threshold(category: Category) -> f64 {
    match category {
        Category::UxUi => 70.0,
        Category::Seo => 60.0,
        Category::Content => 50.0,
    }
}

fn suggestions(category: Category) -> [&'static str; 3] {
    match category {
        Category::UxUi => [
            "Strengthen the visual hierarchy of page elements",
            "Check color contrast for accessibility",
            "Simplify site navigation",
        ],
        Category::Seo => [
            "Improve page load speed",
            "Optimize meta tags (title, description)",
            "Improve semantic markup",
        ],
        Category::Content => [
            "Increase the amount of useful content",
            "Check texts for uniqueness",
            "Update information regularly",
        ],
    }
}

pub fn recommendations(scores: &CategoryScores) -> Vec<Recommendation> {
    Category::ALL
        .into_iter()
        .filter(|c| scores.get(*c) < threshold(*c))
        .map(|c| Recommendation {
            category: c,
            score: scores.get(c),
            threshold: threshold(c),
            suggestions: suggestions(c).iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::WeightOverrides;
    use crate::types::MetricId;

    fn store_with_all(value: f64) -> MetricStore {
        let mut store = MetricStore::default();
        for id in MetricId::ALL {
            store.set_value(id, value);
        }
        store
    }

    #[test]
    fn all_hundreds_aggregate_to_hundred() {
        let scores = aggregate_all(&store_with_all(100.0));
        for category in Category::ALL {
            assert!((scores.get(category) - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_store_aggregates_to_zero() {
        let scores = aggregate_all(&MetricStore::default());
        assert_eq!(scores, CategoryScores::default());
    }

    #[test]
    fn aggregate_is_weighted_sum() {
        let mut store = MetricStore::default();
        store.set_value(MetricId::ContentQuality, 50.0);
        store.set_value(MetricId::Uniqueness, 80.0);
        store.set_value(MetricId::Freshness, 80.0);
        // 50*0.4 + 80*0.3 + 80*0.3
        assert!((aggregate(&store, Category::Content) - 68.0).abs() < 1e-9);
    }

    #[test]
    fn score_table_uses_given_weights() {
        let mut store = MetricStore::default();
        store.set_value(MetricId::ContentQuality, 100.0);
        let values = store.values();

        let mut overrides = WeightOverrides::new();
        overrides.insert(MetricId::ContentQuality, 0.6);
        overrides.insert(MetricId::Uniqueness, 0.1);
        let reweighted = MetricStore::with_weights(&overrides).unwrap();

        assert!((score_table(&values, &store).content - 40.0).abs() < 1e-9);
        assert!((score_table(&values, &reweighted).content - 60.0).abs() < 1e-9);
    }

    #[test]
    fn recommendations_follow_category_thresholds() {
        let scores = CategoryScores {
            ux_ui: 69.9,
            seo: 60.0,
            content: 10.0,
        };
        let recs = recommendations(&scores);
        let cats: Vec<Category> = recs.iter().map(|r| r.category).collect();
        assert_eq!(cats, vec![Category::UxUi, Category::Content]);
        assert!(recs.iter().all(|r| r.suggestions.len() == 3));
    }
}
