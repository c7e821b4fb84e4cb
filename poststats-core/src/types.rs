//! Core domain types for poststats
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Post** | A single status update published on the social feed |
//! | **Author** | The account a post was published from, identified by `author_id` |
//! | **Statistic** | A named aggregate computed over in-scope posts |
//!
//! Posts arrive already hydrated (see [`crate::ingest`]) with their timestamp
//! resolved to a fixed UTC offset. The offset is preserved so that calendar
//! arithmetic happens in the author's local calendar.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ============================================
// Post
// ============================================

/// A normalized social media post.
///
/// Calculators only ever see `&SocialPost`; a post is never modified once
/// it has been handed over for accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    /// Post identifier from the source feed
    pub id: String,
    /// Stable identifier of the publishing account
    pub author_id: String,
    /// Display name of the publishing account
    pub author_name: String,
    /// Post body
    pub message: String,
    /// Source post type (e.g. "status")
    pub post_type: String,
    /// Creation timestamp, offset preserved
    pub date: DateTime<FixedOffset>,
}

impl SocialPost {
    /// Length of the post body in characters (not bytes).
    pub fn character_count(&self) -> usize {
        self.message.chars().count()
    }
}
