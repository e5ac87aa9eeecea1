//! Portfolio post rules: types, listing sort orders, tag and date parsing.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::media::MediaKind;

// ---------------------------------------------------------------------------
// Post types
// ---------------------------------------------------------------------------

pub const POST_TYPE_PHOTO: &str = "photo";
pub const POST_TYPE_VIDEO: &str = "video";

/// All valid post types.
pub const VALID_POST_TYPES: &[&str] = &[POST_TYPE_PHOTO, POST_TYPE_VIDEO];

/// Category value the frontend sends to mean "no filter".
pub const CATEGORY_ALL: &str = "all";

/// Maximum title length (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate that a post type is one of the known types.
pub fn validate_post_type(post_type: &str) -> Result<(), CoreError> {
    if VALID_POST_TYPES.contains(&post_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid post type '{post_type}'. Must be one of: {VALID_POST_TYPES:?}"
        )))
    }
}

/// Post type implied by an uploaded file.
pub fn post_type_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => POST_TYPE_PHOTO,
        MediaKind::Video => POST_TYPE_VIDEO,
    }
}

/// Validate a post title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Normalise a category query parameter: `None` for "all" or blank.
pub fn category_filter(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(CATEGORY_ALL))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Whitelisted sort orders for post listings.
///
/// Parsed from the frontend's field syntax (`-createdAt`, `views`, ...) where a
/// leading `-` means descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    NewestFirst,
    OldestFirst,
    MostViewed,
    MostLiked,
    ShotDateDesc,
    ShotDateAsc,
    TitleAsc,
}

impl PostSort {
    /// Parse a sort expression. Unknown expressions fall back to newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "createdAt" | "created_at" => Self::OldestFirst,
            "-views" => Self::MostViewed,
            "-likes" => Self::MostLiked,
            "-date" | "-shot_date" => Self::ShotDateDesc,
            "date" | "shot_date" => Self::ShotDateAsc,
            "title" => Self::TitleAsc,
            _ => Self::NewestFirst,
        }
    }

    /// SQL `ORDER BY` body. Every variant ends with `id` so paging is stable.
    pub fn order_by(self) -> &'static str {
        match self {
            Self::NewestFirst => "created_at DESC, id DESC",
            Self::OldestFirst => "created_at ASC, id ASC",
            Self::MostViewed => "views DESC, id DESC",
            Self::MostLiked => "likes DESC, id DESC",
            Self::ShotDateDesc => "shot_date DESC, id DESC",
            Self::ShotDateAsc => "shot_date ASC, id ASC",
            Self::TitleAsc => "title ASC, id ASC",
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a tag list sent either as a JSON array (`["a","b"]`) or as a
/// comma-separated string (`a, b`). Tags are trimmed, blanks dropped, and
/// duplicates removed while keeping first-seen order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let candidates: Vec<String> = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => list,
        Err(_) => raw.split(',').map(str::to_string).collect(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Parse a calendar date from `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| CoreError::Validation(format!("Invalid date '{raw}'. Expected YYYY-MM-DD")))
}

/// Parse a boolean form value (`true/false`, `1/0`, `on/off`, `yes/no`).
pub fn parse_flag(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        other => Err(CoreError::Validation(format!("Invalid boolean value '{other}'"))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_types() {
        assert!(validate_post_type("photo").is_ok());
        assert!(validate_post_type("video").is_ok());
        assert!(validate_post_type("audio").is_err());
        assert_eq!(post_type_for(MediaKind::Video), POST_TYPE_VIDEO);
    }

    #[test]
    fn titles() {
        assert!(validate_title("Golden Hour").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }

    #[test]
    fn category_all_means_no_filter() {
        assert_eq!(category_filter(Some("all")), None);
        assert_eq!(category_filter(Some("ALL")), None);
        assert_eq!(category_filter(Some("  ")), None);
        assert_eq!(category_filter(None), None);
        assert_eq!(category_filter(Some("landscape")).as_deref(), Some("landscape"));
    }

    #[test]
    fn sort_parsing() {
        assert_eq!(PostSort::parse(None), PostSort::NewestFirst);
        assert_eq!(PostSort::parse(Some("-createdAt")), PostSort::NewestFirst);
        assert_eq!(PostSort::parse(Some("createdAt")), PostSort::OldestFirst);
        assert_eq!(PostSort::parse(Some("-views")), PostSort::MostViewed);
        assert_eq!(PostSort::parse(Some("title")), PostSort::TitleAsc);
        assert_eq!(PostSort::parse(Some("; DROP TABLE posts")), PostSort::NewestFirst);
    }

    #[test]
    fn tags_from_json_array() {
        assert_eq!(parse_tags(r#"["sunset", "greece", "sunset"]"#), vec!["sunset", "greece"]);
    }

    #[test]
    fn tags_from_comma_list() {
        assert_eq!(parse_tags("  portrait, studio ,, bw "), vec!["portrait", "studio", "bw"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("2024-06-21").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
        );
        assert_eq!(
            parse_date("2024-06-21T18:30:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
        );
        assert!(parse_date("21/06/2024").is_err());
    }

    #[test]
    fn flags() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("On").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
