use image::DynamicImage;
use palette::{FromColor, Hsv, Srgb};

use crate::types::Collected;

/// Lowest score the color heuristic reports.
pub const COLOR_FLOOR: f64 = 20.0;

/// 2-degree hue buckets, the resolution of 8-bit HSV.
const HUE_BUCKETS: usize = 180;

/// Pixel counts per hue bucket.
pub fn hue_histogram(img: &DynamicImage) -> [u64; HUE_BUCKETS] {
    let mut hist = [0u64; HUE_BUCKETS];
    for pixel in img.to_rgb8().pixels() {
        let rgb = Srgb::new(pixel[0], pixel[1], pixel[2]).into_format::<f32>();
        let hsv: Hsv = Hsv::from_color(rgb);
        let degrees = hsv.hue.into_positive_degrees();
        let bucket = ((degrees / 2.0) as usize).min(HUE_BUCKETS - 1);
        hist[bucket] += 1;
    }
    hist
}

fn gray_std_dev(img: &DynamicImage) -> f64 {
    let gray = img.to_luma8();
    let n = gray.pixels().len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = gray.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
    let variance = gray
        .pixels()
        .map(|p| {
            let d = p[0] as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Color scheme heuristic: hue variety plus grayscale contrast.
///
/// `min(100, nonzero_bucket_fraction * 40 + gray_std_dev * 0.6)`, floored at 20.
pub fn color_score(img: &DynamicImage) -> Collected<f64> {
    if img.width() == 0 || img.height() == 0 {
        return Collected::fallback(COLOR_FLOOR, "screenshot has no pixels");
    }

    let hist = hue_histogram(img);
    let variety = hist.iter().filter(|c| **c > 0).count() as f64 / HUE_BUCKETS as f64;
    let contrast = gray_std_dev(img);

    let score = (variety * 40.0 + contrast * 0.6).min(100.0);
    Collected::Measured(score.max(COLOR_FLOOR))
}
