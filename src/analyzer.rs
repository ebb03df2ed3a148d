//! One analysis run, top to bottom.
//!
//! Acquire inputs, run the oracle and collectors, fill a fresh metric store,
//! aggregate, and append the result to the session history. The only error a
//! run can return is an unusable target URL; everything else degrades.

use tracing::{debug, info, warn};

use crate::collectors::{
    color_score, content_quality_score, navigation_score, seo_tag_score, text_score,
};
use crate::error::Result;
use crate::metrics::{aggregate_all, MetricStore};
use crate::ocr::TextExtractor;
use crate::session::Session;
use crate::source::SiteSource;
use crate::target::parse_target;
use crate::types::{AnalysisResult, Collected, Degradation, MetricId, SiteComparison};

pub struct Analyzer {
    source: Box<dyn SiteSource>,
    extractor: Box<dyn TextExtractor + Send + Sync>,
    template: MetricStore,
}

impl Analyzer {
    pub fn new(
        source: Box<dyn SiteSource>,
        extractor: Box<dyn TextExtractor + Send + Sync>,
        template: MetricStore,
    ) -> Self {
        Self {
            source,
            extractor,
            template,
        }
    }

    /// Weights every run starts from.
    pub fn weights(&self) -> &MetricStore {
        &self.template
    }

    pub async fn full_analysis(
        &self,
        session: &mut Session,
        url: &str,
        competitors: &[String],
    ) -> Result<AnalysisResult> {
        let target = parse_target(url)?;
        // Competitors share the main site's normalized form so the cache sees one key per site.
        let competitor_urls = competitors
            .iter()
            .map(|c| parse_target(c).map(|t| t.address))
            .collect::<Result<Vec<_>>>()?;
        let timestamp = session.now();
        let mut degradations = Vec::new();
        info!(url = %target.address, competitors = competitor_urls.len(), "starting analysis");

        let screenshot = self.source.screenshot(&target.url).await;
        note(&mut degradations, "screenshot", &screenshot);
        let screenshot = screenshot.into_value();

        let html = self.source.html(&target.url).await;
        note(&mut degradations, "html", &html);
        let html = html.into_value();
        debug!(chars = html.chars().count(), "html acquired");

        let audit = session.provider().page_audit(&target.address);
        let competitor_scores = if competitor_urls.is_empty() {
            Vec::new()
        } else {
            session
                .compare(&target.address, &competitor_urls)
                .into_iter()
                .map(|(url, score)| SiteComparison { url, score })
                .collect()
        };

        let mut store = self.template.clone();

        let color = color_score(&screenshot);
        note(&mut degradations, MetricId::ColorScheme.as_str(), &color);
        let typography = text_score(self.extractor.as_ref(), &screenshot);
        note(&mut degradations, MetricId::Typography.as_str(), &typography);

        store.set_value(MetricId::VisualHierarchy, audit.accessibility);
        store.set_value(MetricId::ColorScheme, color.score());
        store.set_value(MetricId::Typography, typography.score());
        store.set_value(MetricId::Navigation, navigation_score(&html));
        store.set_value(MetricId::Responsiveness, audit.best_practices);

        let provider = session.provider();
        store.set_value(MetricId::LoadSpeed, audit.performance);
        store.set_value(MetricId::SeoMetadata, seo_tag_score(&html));
        store.set_value(MetricId::HtmlSemantics, audit.seo);
        store.set_value(
            MetricId::Keywords,
            provider.keyword_relevance(&target.address, &html),
        );
        store.set_value(MetricId::LinkMass, provider.link_mass(&target.address));

        store.set_value(MetricId::ContentQuality, content_quality_score(&html));
        store.set_value(MetricId::Uniqueness, provider.uniqueness(&html));
        store.set_value(MetricId::Freshness, provider.freshness(&html));

        let summary = aggregate_all(&store);
        info!(
            ux_ui = summary.ux_ui,
            seo = summary.seo,
            content = summary.content,
            degraded = degradations.len(),
            "analysis complete"
        );

        let result = AnalysisResult {
            url: target.address,
            timestamp,
            scores: store.values(),
            competitor_urls,
            summary,
            competitor_scores,
            degradations,
        };
        session.history.append(result.clone());
        Ok(result)
    }
}

fn note<T>(degradations: &mut Vec<Degradation>, source: &str, collected: &Collected<T>) {
    if let Some(reason) = collected.reason() {
        warn!(source, reason, "using fallback value");
        degradations.push(Degradation {
            source: source.to_string(),
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::{COLOR_FLOOR, OCR_FALLBACK};
    use crate::ocr::NoOcr;
    use crate::provider::RandomProvider;
    use crate::session::SteppingClock;
    use crate::source::FileSource;
    use crate::types::{Category, CompetitorScore, PageAudit};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    /// Provider returning the same fixed numbers for everything.
    struct Flat(f64);

    impl crate::provider::ScoringProvider for Flat {
        fn page_audit(&mut self, _url: &str) -> PageAudit {
            PageAudit {
                performance: self.0,
                accessibility: self.0,
                best_practices: self.0,
                seo: self.0,
            }
        }
        fn competitor_score(&mut self, _url: &str) -> CompetitorScore {
            CompetitorScore {
                total: self.0,
                speed: self.0,
                seo: self.0,
                ux: self.0,
            }
        }
        fn keyword_relevance(&mut self, _url: &str, _html: &str) -> f64 {
            self.0
        }
        fn link_mass(&mut self, _url: &str) -> f64 {
            self.0
        }
        fn uniqueness(&mut self, _html: &str) -> f64 {
            self.0
        }
        fn freshness(&mut self, _html: &str) -> f64 {
            self.0
        }
    }

    fn session(provider: Box<dyn crate::provider::ScoringProvider + Send>) -> Session {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Session::new(
            Box::new(SteppingClock::new(start, Duration::minutes(5))),
            provider,
        )
    }

    fn offline_analyzer(html: Option<std::path::PathBuf>) -> Analyzer {
        Analyzer::new(
            Box::new(FileSource::offline(None, html)),
            Box::new(NoOcr),
            MetricStore::default(),
        )
    }

    #[tokio::test]
    async fn offline_run_degrades_but_completes() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(Flat(50.0)));

        let result = analyzer
            .full_analysis(&mut session, "example.com", &[])
            .await
            .expect("analysis");

        assert_eq!(result.url, "https://example.com");
        let sources: Vec<&str> = result.degradations.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["screenshot", "html", "typography"]);
        assert_eq!(result.value(MetricId::ColorScheme), Some(COLOR_FLOOR));
        assert_eq!(result.value(MetricId::Typography), Some(OCR_FALLBACK));
        assert_eq!(result.value(MetricId::SeoMetadata), Some(0.0));
        assert_eq!(result.value(MetricId::Navigation), Some(60.0));
        assert_eq!(result.value(MetricId::ContentQuality), Some(0.0));
        assert!(result.competitor_scores.is_empty());
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn summary_matches_weighted_values() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("page.html");
        let body = format!(
            "<html><head><title>T</title><meta name=\"description\" content=\"d\"></head><body><h1>H</h1>{}</body></html>",
            "x".repeat(30_000)
        );
        std::fs::write(&page, body).unwrap();

        let analyzer = offline_analyzer(Some(page));
        let mut session = session(Box::new(Flat(100.0)));
        let result = analyzer
            .full_analysis(&mut session, "https://site.test", &[])
            .await
            .unwrap();

        assert_eq!(result.value(MetricId::SeoMetadata), Some(100.0));
        assert_eq!(result.value(MetricId::Navigation), Some(80.0));
        assert_eq!(result.value(MetricId::ContentQuality), Some(100.0));
        assert!((result.summary.seo - 100.0).abs() < 1e-9);
        assert!((result.summary.content - 100.0).abs() < 1e-9);
        // 100 * 0.25 + color 20 * 0.15 + typography 50 * 0.15 + navigation 80 * 0.2 + 100 * 0.25
        assert!((result.summary.get(Category::UxUi) - 76.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn history_keeps_every_run_in_order() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(RandomProvider::seeded(4)));
        let urls = ["https://one.test", "https://two.test", "https://three.test"];
        for url in urls {
            analyzer.full_analysis(&mut session, url, &[]).await.unwrap();
        }

        let entries = session.history.entries();
        assert_eq!(entries.len(), 3);
        for (i, (entry, url)) in entries.iter().zip(urls).enumerate() {
            assert_eq!(entry.url, url);
            let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::minutes(5 * i as i64);
            assert_eq!(entry.timestamp, expected);
        }
    }

    #[tokio::test]
    async fn competitor_scores_are_stable_across_runs() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(RandomProvider::seeded(8)));
        let competitors = vec!["https://rival.test".to_string()];

        let first = analyzer
            .full_analysis(&mut session, "https://me.test", &competitors)
            .await
            .unwrap();
        let second = analyzer
            .full_analysis(&mut session, "https://me.test", &competitors)
            .await
            .unwrap();

        assert_eq!(first.competitor_scores.len(), 2);
        assert_eq!(first.competitor_scores, second.competitor_scores);
        assert_eq!(second.competitor_urls, competitors);
    }

    #[tokio::test]
    async fn site_keeps_its_score_as_main_and_as_competitor() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(RandomProvider::seeded(21)));

        let first = analyzer
            .full_analysis(&mut session, "rival.test", &["other.test".to_string()])
            .await
            .unwrap();
        let second = analyzer
            .full_analysis(&mut session, "me.test", &["rival.test".to_string()])
            .await
            .unwrap();

        let as_main = &first.competitor_scores[0];
        let as_competitor = &second.competitor_scores[1];
        assert_eq!(as_main.url, "https://rival.test");
        assert_eq!(as_competitor.url, "https://rival.test");
        assert_eq!(as_main.score, as_competitor.score);
        assert_eq!(session.competitors.len(), 3);
        assert_eq!(second.competitor_urls, vec!["https://rival.test".to_string()]);
    }

    #[tokio::test]
    async fn comparison_rows_follow_listing_order() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(Flat(10.0)));
        let competitors = vec!["a.test".to_string(), "m.test".to_string(), "a.test".to_string()];

        let result = analyzer
            .full_analysis(&mut session, "z.test", &competitors)
            .await
            .unwrap();

        let urls: Vec<&str> = result.competitor_scores.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://z.test", "https://a.test", "https://m.test"]);
    }

    #[tokio::test]
    async fn bad_competitor_url_is_rejected_before_recording() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(Flat(1.0)));
        let err = analyzer
            .full_analysis(&mut session, "me.test", &["ftp://x.test".to_string()])
            .await;
        assert!(err.is_err());
        assert!(session.history.is_empty());
        assert!(session.competitors.is_empty());
    }

    #[tokio::test]
    async fn invalid_url_is_an_error_and_leaves_history_untouched() {
        let analyzer = offline_analyzer(None);
        let mut session = session(Box::new(Flat(1.0)));
        assert!(analyzer
            .full_analysis(&mut session, "ftp://files.test", &[])
            .await
            .is_err());
        assert!(session.history.is_empty());
    }
}
