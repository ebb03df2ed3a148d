use scraper::{Html, Selector};

/// HTML longer than this (in characters) counts as having real navigation.
pub const NAVIGATION_THRESHOLD: usize = 5000;

fn has_element(doc: &Html, css: &str) -> bool {
    Selector::parse(css)
        .map(|selector| doc.select(&selector).next().is_some())
        .unwrap_or(false)
}

/// 40 for a `<title>`, 30 for a meta description, 30 for an `<h1>`.
pub fn seo_tag_score(html: &str) -> f64 {
    let doc = Html::parse_document(html);
    let mut score = 0.0;
    if has_element(&doc, "title") {
        score += 40.0;
    }
    if has_element(&doc, r#"meta[name="description"]"#) {
        score += 30.0;
    }
    if has_element(&doc, "h1") {
        score += 30.0;
    }
    score
}

pub fn navigation_score(html: &str) -> f64 {
    if html.chars().count() > NAVIGATION_THRESHOLD {
        80.0
    } else {
        60.0
    }
}

/// `min(100, chars / 300)`
pub fn content_quality_score(html: &str) -> f64 {
    (html.chars().count() as f64 / 300.0).min(100.0)
}
