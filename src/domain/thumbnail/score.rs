//! Frame scoring heuristic.
//!
//! A decoded frame is reduced to a single non-negative score measuring
//! how visually informative it is. Frames that fail the minimum
//! brightness/variation thresholds are classified black and score
//! exactly 0. The thresholds are empirical, not contractual; the
//! qualitative behavior (reject near-black, prefer bright and varied,
//! early-exit on clearly good frames) is what matters.

/// Only the top-left region of the frame is sampled, at most this many
/// pixels on each axis.
pub const SAMPLE_REGION: usize = 300;

/// Every Nth pixel of the region is sampled (16-byte stride in RGBA).
pub const PIXEL_STEP: usize = 4;

/// A capture scoring above this ends the candidate scan immediately.
pub const EARLY_EXIT_SCORE: f64 = 80.0;

const BRIGHT_CHANNEL_MIN: u8 = 25;
const COLOR_VARIATION_MIN: u8 = 15;
const BLACK_PEAK_MAX: u8 = 30;
const FLAT_PEAK_MAX: u8 = 50;
const BRIGHT_RATIO_MIN: f64 = 0.05;
const EDGE_DIFF_MIN: f64 = 20.0;

/// Score a tightly-packed RGBA frame buffer.
///
/// Returns 0.0 for black/invalid frames. Non-black frames combine mean
/// brightness, successive-sample variation, edge density, and color
/// richness; the practical ceiling is around 400.
pub fn score_frame(rgba: &[u8], width: u32, height: u32) -> f64 {
    let width = width as usize;
    let region_w = width.min(SAMPLE_REGION);
    let region_h = (height as usize).min(SAMPLE_REGION);
    if region_w == 0 || region_h == 0 || rgba.len() < width * region_h * 4 {
        return 0.0;
    }

    let mut samples = 0usize;
    let mut bright_pixels = 0usize;
    let mut peak: u8 = 0;
    let mut color_varied = false;
    let mut brightness_sum = 0.0;
    let mut variation_sum = 0.0;
    let mut edge_count = 0usize;
    let mut pair_diff_sum = 0.0;
    let mut prev_brightness: Option<f64> = None;

    for linear in (0..region_w * region_h).step_by(PIXEL_STEP) {
        let x = linear % region_w;
        let y = linear / region_w;
        let off = (y * width + x) * 4;
        let (r, g, b) = (rgba[off], rgba[off + 1], rgba[off + 2]);

        let max_channel = r.max(g).max(b);
        peak = peak.max(max_channel);
        if max_channel > BRIGHT_CHANNEL_MIN {
            bright_pixels += 1;
        }

        let pair_diff = r
            .abs_diff(g)
            .max(r.abs_diff(b))
            .max(g.abs_diff(b));
        if pair_diff > COLOR_VARIATION_MIN {
            color_varied = true;
        }
        pair_diff_sum += f64::from(pair_diff);

        let brightness = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
        brightness_sum += brightness;
        if let Some(prev) = prev_brightness {
            let diff = (brightness - prev).abs();
            variation_sum += diff;
            if diff > EDGE_DIFF_MIN {
                edge_count += 1;
            }
        }
        prev_brightness = Some(brightness);
        samples += 1;
    }

    if samples == 0 {
        return 0.0;
    }

    let bright_ratio = bright_pixels as f64 / samples as f64;
    let black = peak < BLACK_PEAK_MAX
        || bright_ratio < BRIGHT_RATIO_MIN
        || (!color_varied && peak < FLAT_PEAK_MAX);
    if black {
        return 0.0;
    }

    let mut score = 0.0;

    // Brightness: up to 150 points, only for a sane mid range.
    let avg_brightness = brightness_sum / samples as f64;
    if avg_brightness > 30.0 && avg_brightness < 240.0 {
        score += avg_brightness / 1.6;
    }

    if samples > 1 {
        let transitions = (samples - 1) as f64;
        // Successive-sample variation as a crude edge proxy: up to 100.
        score += (variation_sum / transitions).min(100.0);
        // Edge-pixel ratio: up to 100.
        score += (edge_count as f64 / transitions * 1000.0).min(100.0);
    }

    // Color richness: up to 50.
    score += (pair_diff_sum / samples as f64 * 2.0).min(50.0);

    score
}
