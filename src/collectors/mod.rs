//! Signal collectors.
//!
//! Each collector turns one raw input into a 0-100 score. None of them fail:
//! problems are reported through [`Collected::Fallback`](crate::types::Collected).

mod color;
mod html;
mod text;

pub use color::{color_score, hue_histogram, COLOR_FLOOR};
pub use html::{content_quality_score, navigation_score, seo_tag_score, NAVIGATION_THRESHOLD};
pub use text::{text_length_score, text_score, OCR_FALLBACK, TEXT_FLOOR};
