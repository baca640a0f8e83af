use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Everything a share page needs to render one meeting, stored as JSON
/// in the key-value repository under the slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub title: String,
    pub video_url: String,
    pub transcription_url: String,
    pub summary_url: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
}

/// Derive a URL-friendly slug from a meeting title: trim, lowercase,
/// whitespace runs become hyphens, everything else outside `[a-z0-9-]`
/// is dropped. Returns `None` when nothing survives.
pub fn slugify(title: &str) -> Option<String> {
    let lowered = title.trim().to_lowercase();
    let whitespace = Regex::new(r"\s+").expect("static pattern");
    let invalid = Regex::new(r"[^a-z0-9-]").expect("static pattern");

    let hyphenated = whitespace.replace_all(&lowered, "-");
    let slug = invalid.replace_all(&hyphenated, "").to_string();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Project Kickoff Q3"), Some("project-kickoff-q3".to_string()));
    }

    #[test]
    fn test_slugify_trims_and_collapses_whitespace() {
        assert_eq!(slugify("  weekly   sync  "), Some("weekly-sync".to_string()));
    }

    #[test]
    fn test_slugify_strips_invalid_characters() {
        assert_eq!(slugify("Q3! Review (final)"), Some("q3-review-final".to_string()));
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("all-hands"), Some("all-hands".to_string()));
    }

    #[test]
    fn test_slugify_rejects_empty_result() {
        assert_eq!(slugify("???"), None);
        assert_eq!(slugify("   "), None);
        assert_eq!(slugify("会议"), None);
    }

    #[test]
    fn test_record_json_field_names() {
        let record = MeetingRecord {
            title: "Weekly Sync".to_string(),
            video_url: "/blob/weekly-sync.mp4".to_string(),
            transcription_url: "/blob/weekly-sync-transcription.txt".to_string(),
            summary_url: "/blob/weekly-sync-summary.txt".to_string(),
            thumbnail_url: "/blob/weekly-sync-thumbnail.jpg".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("videoUrl").is_some());
        assert!(json.get("transcriptionUrl").is_some());
        assert!(json.get("summaryUrl").is_some());
        assert!(json.get("thumbnailUrl").is_some());
        assert!(json.get("createdAt").is_some());

        let back: MeetingRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
