//! Session-scoped state: history, competitor cache, clock and provider.
//!
//! Nothing here outlives the [`Session`] value; callers own it and pass it
//! to each analysis run by `&mut`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::debug;

use crate::metrics::{score_table, MetricStore};
use crate::provider::{RandomProvider, ScoringProvider};
use crate::types::{AnalysisResult, CategoryScores, CompetitorScore};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock advancing by a fixed step on every read.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicI64,
    step_secs: i64,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: AtomicI64::new(start.timestamp()),
            step_secs: step.num_seconds(),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.next.fetch_add(self.step_secs, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
    }
}

/// Append-only record of analysis runs, oldest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<AnalysisResult>,
}

impl HistoryLog {
    pub fn append(&mut self, result: AnalysisResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[AnalysisResult] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&AnalysisResult> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&AnalysisResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recompute every entry's aggregates from its raw values with `store`'s
    /// weights instead of the ones captured at analysis time.
    pub fn rescore(&self, store: &MetricStore) -> Vec<CategoryScores> {
        self.entries
            .iter()
            .map(|entry| score_table(&entry.scores, store))
            .collect()
    }
}

/// Competitor scores memoized per URL.
#[derive(Debug, Clone, Default)]
pub struct ComparisonCache {
    scores: HashMap<String, CompetitorScore>,
}

impl ComparisonCache {
    pub fn get(&self, url: &str) -> Option<&CompetitorScore> {
        self.scores.get(url)
    }

    pub fn get_or_score(
        &mut self,
        url: &str,
        provider: &mut dyn ScoringProvider,
    ) -> CompetitorScore {
        if let Some(score) = self.scores.get(url) {
            debug!(url, "competitor score cache hit");
            return *score;
        }
        let score = provider.competitor_score(url);
        self.scores.insert(url.to_string(), score);
        score
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

pub struct Session {
    pub history: HistoryLog,
    pub competitors: ComparisonCache,
    clock: Box<dyn Clock + Send + Sync>,
    provider: Box<dyn ScoringProvider + Send>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            Box::new(SystemClock),
            Box::new(RandomProvider::from_entropy()),
        )
    }
}

impl Session {
    pub fn new(
        clock: Box<dyn Clock + Send + Sync>,
        provider: Box<dyn ScoringProvider + Send>,
    ) -> Self {
        Self {
            history: HistoryLog::default(),
            competitors: ComparisonCache::default(),
            clock,
            provider,
        }
    }

    /// Wall clock with a provider seeded for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(SystemClock), Box::new(RandomProvider::seeded(seed)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn provider(&mut self) -> &mut dyn ScoringProvider {
        self.provider.as_mut()
    }

    /// Scores for `main_url` followed by each competitor, duplicates collapsed.
    pub fn compare(
        &mut self,
        main_url: &str,
        competitors: &[String],
    ) -> Vec<(String, CompetitorScore)> {
        let mut results: Vec<(String, CompetitorScore)> = Vec::new();
        for url in std::iter::once(main_url).chain(competitors.iter().map(String::as_str)) {
            if results.iter().any(|(seen, _)| seen == url) {
                continue;
            }
            let score = self.competitors.get_or_score(url, self.provider.as_mut());
            results.push((url.to_string(), score));
        }
        results
    }
}
