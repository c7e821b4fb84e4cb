//! Raw feed record to [`SocialPost`] hydration.
//!
//! Feed records look like:
//!
//! ```json
//! {"id": "1", "from_name": "Ana", "from_id": "user_1", "message": "hi",
//!  "type": "status", "created_time": "2023-04-11T11:00:00+03:00"}
//! ```
//!
//! `created_time` keeps its UTC offset so calendar arithmetic downstream runs
//! in the author's local calendar.

use crate::error::{Error, Result};
use crate::types::SocialPost;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A post as delivered by the feed, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub from_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub post_type: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (`2023-04-11T11:00:00+03:00`) and the compact offset
/// form some exports use (`2023-04-11T11:00:00+0300`).
pub fn parse_created_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

fn required(field: Option<String>, name: &str, source_name: &str) -> Result<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Parse {
            source_name: source_name.to_string(),
            message: format!("missing {name}"),
        }),
    }
}

/// Validate a raw record and turn it into a [`SocialPost`].
///
/// `from_id` and `created_time` are required; the remaining fields default
/// to empty strings.
pub fn hydrate(raw: RawPost, source_name: &str) -> Result<SocialPost> {
    let author_id = required(raw.from_id, "from_id", source_name)?;
    let created_time = required(raw.created_time, "created_time", source_name)?;
    let date = parse_created_time(&created_time).ok_or_else(|| Error::Parse {
        source_name: source_name.to_string(),
        message: format!("invalid created_time: {created_time}"),
    })?;

    Ok(SocialPost {
        id: raw.id.unwrap_or_default(),
        author_id,
        author_name: raw.from_name.unwrap_or_default(),
        message: raw.message.unwrap_or_default(),
        post_type: raw.post_type.unwrap_or_default(),
        date,
    })
}

/// Hydrate a JSON value holding one raw record.
pub fn hydrate_value(value: serde_json::Value, source_name: &str) -> Result<SocialPost> {
    let raw: RawPost = serde_json::from_value(value).map_err(|e| Error::Parse {
        source_name: source_name.to_string(),
        message: format!("malformed record: {e}"),
    })?;
    hydrate(raw, source_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_hydrate_full_record() {
        let post = hydrate_value(
            json!({
                "id": "post5f9e",
                "from_name": "Lael Vassel",
                "from_id": "user_1",
                "message": "hello",
                "type": "status",
                "created_time": "2023-04-11T11:00:00+03:00"
            }),
            "test",
        )
        .unwrap();

        assert_eq!(post.id, "post5f9e");
        assert_eq!(post.author_id, "user_1");
        assert_eq!(post.author_name, "Lael Vassel");
        assert_eq!(post.post_type, "status");
        assert_eq!(post.date.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(post.date.hour(), 11);
        assert_eq!(post.date.month(), 4);
    }

    #[test]
    fn test_compact_offset_is_accepted() {
        let date = parse_created_time("2023-01-31T23:30:00-0200").unwrap();
        assert_eq!(date.day(), 31);
        assert_eq!(date.offset().local_minus_utc(), -2 * 3600);
    }

    #[test]
    fn test_missing_author_is_rejected() {
        let err = hydrate(
            RawPost {
                created_time: Some("2023-04-11T11:00:00+03:00".to_string()),
                ..Default::default()
            },
            "feed.jsonl:3",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Parse { ref source_name, ref message }
                if source_name == "feed.jsonl:3" && message == "missing from_id"
        ));
    }

    #[test]
    fn test_mistyped_field_names_its_source() {
        let err = hydrate_value(
            json!({"from_id": 42, "created_time": "2023-04-11T11:00:00+03:00"}),
            "feed.json[2]",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Parse { ref source_name, ref message }
                if source_name == "feed.json[2]" && message.starts_with("malformed record")
        ));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = hydrate(
            RawPost {
                from_id: Some("user_1".to_string()),
                created_time: Some("last tuesday".to_string()),
                ..Default::default()
            },
            "test",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid created_time"));
    }
}
