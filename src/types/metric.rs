//! Fixed metric schema.
//!
//! Three categories, each with a closed set of metrics and hard-coded default
//! weights. The identifiers double as the stable keys used in JSON output and
//! config overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level scoring group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UxUi,
    Seo,
    Content,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::UxUi, Category::Seo, Category::Content];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UxUi => "ux_ui",
            Category::Seo => "seo",
            Category::Content => "content",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::UxUi => "UX/UI",
            Category::Seo => "SEO",
            Category::Content => "Content",
        }
    }

    /// Metrics belonging to this category, in display order.
    pub fn metrics(&self) -> &'static [MetricId] {
        match self {
            Category::UxUi => &[
                MetricId::VisualHierarchy,
                MetricId::ColorScheme,
                MetricId::Typography,
                MetricId::Navigation,
                MetricId::Responsiveness,
            ],
            Category::Seo => &[
                MetricId::LoadSpeed,
                MetricId::SeoMetadata,
                MetricId::HtmlSemantics,
                MetricId::Keywords,
                MetricId::LinkMass,
            ],
            Category::Content => &[
                MetricId::ContentQuality,
                MetricId::Uniqueness,
                MetricId::Freshness,
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}' (expected ux_ui, seo or content)"))
    }
}

/// A single named sub-metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    VisualHierarchy,
    ColorScheme,
    Typography,
    Navigation,
    Responsiveness,
    LoadSpeed,
    SeoMetadata,
    HtmlSemantics,
    Keywords,
    LinkMass,
    ContentQuality,
    Uniqueness,
    Freshness,
}

impl MetricId {
    pub const ALL: [MetricId; 13] = [
        MetricId::VisualHierarchy,
        MetricId::ColorScheme,
        MetricId::Typography,
        MetricId::Navigation,
        MetricId::Responsiveness,
        MetricId::LoadSpeed,
        MetricId::SeoMetadata,
        MetricId::HtmlSemantics,
        MetricId::Keywords,
        MetricId::LinkMass,
        MetricId::ContentQuality,
        MetricId::Uniqueness,
        MetricId::Freshness,
    ];

    pub fn category(&self) -> Category {
        match self {
            MetricId::VisualHierarchy
            | MetricId::ColorScheme
            | MetricId::Typography
            | MetricId::Navigation
            | MetricId::Responsiveness => Category::UxUi,
            MetricId::LoadSpeed
            | MetricId::SeoMetadata
            | MetricId::HtmlSemantics
            | MetricId::Keywords
            | MetricId::LinkMass => Category::Seo,
            MetricId::ContentQuality | MetricId::Uniqueness | MetricId::Freshness => {
                Category::Content
            }
        }
    }

    pub fn default_weight(&self) -> f64 {
        match self {
            MetricId::VisualHierarchy => 0.25,
            MetricId::ColorScheme => 0.15,
            MetricId::Typography => 0.15,
            MetricId::Navigation => 0.2,
            MetricId::Responsiveness => 0.25,
            MetricId::LoadSpeed => 0.3,
            MetricId::SeoMetadata => 0.2,
            MetricId::HtmlSemantics => 0.15,
            MetricId::Keywords => 0.2,
            MetricId::LinkMass => 0.15,
            MetricId::ContentQuality => 0.4,
            MetricId::Uniqueness => 0.3,
            MetricId::Freshness => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::VisualHierarchy => "visual_hierarchy",
            MetricId::ColorScheme => "color_scheme",
            MetricId::Typography => "typography",
            MetricId::Navigation => "navigation",
            MetricId::Responsiveness => "responsiveness",
            MetricId::LoadSpeed => "load_speed",
            MetricId::SeoMetadata => "seo_metadata",
            MetricId::HtmlSemantics => "html_semantics",
            MetricId::Keywords => "keywords",
            MetricId::LinkMass => "link_mass",
            MetricId::ContentQuality => "content_quality",
            MetricId::Uniqueness => "uniqueness",
            MetricId::Freshness => "freshness",
        }
    }

    /// Human-readable label for pretty output.
    pub fn label(&self) -> &'static str {
        match self {
            MetricId::VisualHierarchy => "Visual hierarchy",
            MetricId::ColorScheme => "Color scheme",
            MetricId::Typography => "Typography",
            MetricId::Navigation => "Navigation",
            MetricId::Responsiveness => "Responsiveness",
            MetricId::LoadSpeed => "Load speed",
            MetricId::SeoMetadata => "SEO metadata",
            MetricId::HtmlSemantics => "HTML semantics",
            MetricId::Keywords => "Keywords",
            MetricId::LinkMass => "Link mass",
            MetricId::ContentQuality => "Content quality",
            MetricId::Uniqueness => "Uniqueness",
            MetricId::Freshness => "Freshness",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

/// A weighted 0-100 score contributing to its category aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub id: MetricId,
    /// Score in 0..=100
    pub value: f64,
    /// Weight in 0..=1
    pub weight: f64,
}

impl MetricDefinition {
    pub fn new(id: MetricId, weight: f64) -> Self {
        Self {
            id,
            value: 0.0,
            weight,
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn weighted(&self) -> f64 {
        self.value * self.weight
    }
}
