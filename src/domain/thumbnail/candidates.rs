//! Candidate timestamp generation for thumbnail sampling.
//!
//! Recordings frequently open on a black or fade-in frame, so a single
//! "frame zero" poster is useless. Instead we derive a handful of seek
//! points spread across the video, tiered by duration: short clips get
//! dense early points, long recordings skip the intro entirely.

/// Candidates never land closer than this to either end of the video.
pub const MIN_EDGE_OFFSET: f64 = 0.5;

/// Minimum gap between consecutive seek points.
pub const MIN_SPACING: f64 = 0.5;

/// Generate the duration-tiered candidate points, clamped to
/// `[0.5, duration - 0.5]`. Order follows the tier definition, not
/// playback order.
pub fn tier_points(duration: f64) -> Vec<f64> {
    let d = duration;
    let raw = if d <= 3.0 {
        vec![0.5, 0.30 * d, 0.60 * d, d - 0.5]
    } else if d <= 10.0 {
        vec![1.0, 0.20 * d, 0.40 * d, 0.60 * d, 0.80 * d, d - 0.5]
    } else if d <= 60.0 {
        vec![2.0, 0.15 * d, 0.30 * d, 0.50 * d, 0.70 * d, 0.85 * d, d - 0.5]
    } else {
        // Long recordings: fixed early probes, then spread, and stop
        // well short of the end where credits/black tails live.
        vec![5.0, 15.0, 0.20 * d, 0.40 * d, 0.60 * d, 0.80 * d, d - 5.0]
    };

    raw.into_iter().map(|t| clamp_to_edges(t, d)).collect()
}

/// Build the seek plan: tier points sorted ascending with a minimum
/// spacing enforced between consecutive points. Clamping can collapse
/// several points onto the same half-second for very short clips; the
/// spacing pass drops those duplicates.
pub fn seek_plan(duration: f64) -> Vec<f64> {
    let mut points = tier_points(duration);
    points.sort_by(|a, b| a.partial_cmp(b).expect("candidate timestamps are finite"));

    let mut plan: Vec<f64> = Vec::with_capacity(points.len());
    for t in points {
        match plan.last() {
            Some(&last) if t - last < MIN_SPACING => {}
            _ => plan.push(t),
        }
    }
    plan
}

fn clamp_to_edges(t: f64, duration: f64) -> f64 {
    let upper = (duration - MIN_EDGE_OFFSET).max(MIN_EDGE_OFFSET);
    t.clamp(MIN_EDGE_OFFSET, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_points_two_seconds() {
        let points = tier_points(2.0);
        assert_eq!(points.len(), 4);
        for p in &points {
            assert!(*p >= 0.5 && *p <= 1.5, "point {} outside [0.5, 1.5]", p);
        }
    }

    #[test]
    fn test_tier_points_mid_duration_counts() {
        assert_eq!(tier_points(8.0).len(), 6);
        assert_eq!(tier_points(30.0).len(), 7);
        assert_eq!(tier_points(600.0).len(), 7);
    }

    #[test]
    fn test_seek_plan_thirty_seconds_spacing() {
        let plan = seek_plan(30.0);
        assert!(!plan.is_empty());
        for pair in plan.windows(2) {
            assert!(pair[1] > pair[0], "plan must be strictly increasing");
            assert!(
                pair[1] - pair[0] >= MIN_SPACING,
                "gap {} below minimum spacing",
                pair[1] - pair[0]
            );
        }
    }

    #[test]
    fn test_seek_plan_collapses_short_clip() {
        // Everything clamps onto 0.5 for a clip this short.
        let plan = seek_plan(1.0);
        assert_eq!(plan, vec![0.5]);
    }

    #[test]
    fn test_tier_points_long_video_skips_tail() {
        let points = tier_points(3600.0);
        let last = points.iter().cloned().fold(f64::MIN, f64::max);
        assert!(last <= 3595.0, "last candidate {} lands in the tail", last);
    }

    #[test]
    fn test_seek_plan_within_bounds() {
        for d in [2.0, 3.0, 5.0, 10.0, 25.0, 60.0, 61.0, 7200.0] {
            for p in seek_plan(d) {
                assert!(p >= MIN_EDGE_OFFSET);
                assert!(p <= d - MIN_EDGE_OFFSET + 1e-9);
            }
        }
    }
}
