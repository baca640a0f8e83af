//! Representative-frame ("poster") extraction for uploaded videos.
//!
//! Naive frame-zero thumbnails are frequently black because recordings
//! open on a fade-in. This module samples a handful of candidate
//! timestamps, scores each decoded frame for visual information, and
//! returns the best capture as a JPEG, all within a fixed wall-clock
//! budget.

pub mod candidates;
pub mod extract;
pub mod score;

pub use candidates::{seek_plan, tier_points};
pub use extract::{
    extract_thumbnail, extract_thumbnail_with_budget, EncodedFrame, ThumbnailError,
    EXTRACT_BUDGET,
};
pub use score::{score_frame, EARLY_EXIT_SCORE};
