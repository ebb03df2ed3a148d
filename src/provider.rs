//! Stand-ins for integrations this tool does not have.
//!
//! Page-speed audits, competitor crawling and content scoring are all
//! simulated. They sit behind [`ScoringProvider`] so a real backend can be
//! dropped in without touching collection or aggregation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{CompetitorScore, PageAudit};

pub trait ScoringProvider {
    /// Page-speed style audit of the target.
    fn page_audit(&mut self, url: &str) -> PageAudit;

    fn competitor_score(&mut self, url: &str) -> CompetitorScore;

    fn keyword_relevance(&mut self, url: &str, html: &str) -> f64;

    fn link_mass(&mut self, url: &str) -> f64;

    fn uniqueness(&mut self, html: &str) -> f64;

    fn freshness(&mut self, html: &str) -> f64;
}

/// Uniform-random placeholder scores. Keyword relevance and freshness are
/// constants. Ranges are half-open.
#[derive(Debug, Clone)]
pub struct RandomProvider<R = StdRng> {
    rng: R,
}

impl RandomProvider<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn between(&mut self, low: u32, high: u32) -> f64 {
        self.rng.gen_range(low..high) as f64
    }
}

impl<R: Rng> ScoringProvider for RandomProvider<R> {
    fn page_audit(&mut self, _url: &str) -> PageAudit {
        PageAudit {
            performance: self.between(30, 90),
            accessibility: self.between(40, 95),
            best_practices: self.between(50, 90),
            seo: self.between(40, 95),
        }
    }

    fn competitor_score(&mut self, _url: &str) -> CompetitorScore {
        CompetitorScore {
            total: self.between(40, 85),
            speed: self.between(30, 90),
            seo: self.between(40, 80),
            ux: self.between(50, 95),
        }
    }

    fn keyword_relevance(&mut self, _url: &str, _html: &str) -> f64 {
        70.0
    }

    fn link_mass(&mut self, _url: &str) -> f64 {
        self.between(20, 80)
    }

    fn uniqueness(&mut self, _html: &str) -> f64 {
        self.between(60, 95)
    }

    fn freshness(&mut self, _html: &str) -> f64 {
        80.0
    }
}
