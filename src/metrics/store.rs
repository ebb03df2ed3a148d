use std::collections::BTreeMap;

use crate::error::{Result, SitegradeError};
use crate::types::analysis::ScoreTable;
use crate::types::{Category, MetricDefinition, MetricId};

/// Allowed deviation of a category's weight sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Per-metric weight overrides, keyed by metric id.
pub type WeightOverrides = BTreeMap<MetricId, f64>;

/// The three categories with their weighted metric definitions.
///
/// A fresh store has every value at zero. An analysis run owns its store and
/// fills it in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricStore {
    categories: BTreeMap<Category, Vec<MetricDefinition>>,
}

impl Default for MetricStore {
    fn default() -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let defs = category
                    .metrics()
                    .iter()
                    .map(|id| MetricDefinition::new(*id, id.default_weight()))
                    .collect();
                (category, defs)
            })
            .collect();
        Self { categories }
    }
}

impl MetricStore {
    /// Build a store with some weights replaced, rejecting any category whose
    /// weights no longer sum to 1.
    pub fn with_weights(overrides: &WeightOverrides) -> Result<Self> {
        let mut store = Self::default();
        for (id, weight) in overrides {
            if !(0.0..=1.0).contains(weight) {
                return Err(SitegradeError::metric(format!(
                    "weight for {id} must be within 0..=1, got {weight}"
                )));
            }
            if let Some(def) = store.definition_mut(*id) {
                def.weight = *weight;
            }
        }
        store.validate()?;
        Ok(store)
    }

    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let sum = self.weight_sum(category);
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(SitegradeError::metric(format!(
                    "weights for {category} sum to {sum:.4}, expected 1.0"
                )));
            }
        }
        Ok(())
    }

    pub fn weight_sum(&self, category: Category) -> f64 {
        self.definitions(category).iter().map(|d| d.weight).sum()
    }

    pub fn definitions(&self, category: Category) -> &[MetricDefinition] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn definition(&self, id: MetricId) -> Option<&MetricDefinition> {
        self.definitions(id.category()).iter().find(|d| d.id == id)
    }

    fn definition_mut(&mut self, id: MetricId) -> Option<&mut MetricDefinition> {
        self.categories
            .get_mut(&id.category())
            .and_then(|defs| defs.iter_mut().find(|d| d.id == id))
    }

    pub fn value(&self, id: MetricId) -> f64 {
        self.definition(id).map(|d| d.value).unwrap_or(0.0)
    }

    pub fn weight(&self, id: MetricId) -> f64 {
        self.definition(id).map(|d| d.weight).unwrap_or(0.0)
    }

    /// Set a metric value, clamped to 0..=100.
    pub fn set_value(&mut self, id: MetricId, value: f64) {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            0.0
        };
        if let Some(def) = self.definition_mut(id) {
            def.value = value;
        }
    }

    /// Snapshot of every value, grouped by category.
    pub fn values(&self) -> ScoreTable {
        self.categories
            .iter()
            .map(|(category, defs)| {
                let metrics = defs.iter().map(|d| (d.id, d.value)).collect();
                (*category, metrics)
            })
            .collect()
    }
}
