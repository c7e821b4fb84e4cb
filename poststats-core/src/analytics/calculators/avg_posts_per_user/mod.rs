//! Average Posts per Author per Month
//!
//! For every author, divides the number of posts by the number of calendar
//! months between their first and last post (both months included).
//!
//! ## Output
//!
//! One leaf per author, in the order authors were first seen:
//!
//! | Field | Value |
//! |-------|-------|
//! | `name` | `average-posts-per-user` |
//! | `split_key` | author id |
//! | `value` | `round(posts / month_span, 2)` |
//! | `units` | `posts` |
//!
//! ## Example
//!
//! `user_1` posts twice in January 2023 and once in each of February, March
//! and April: 5 posts over 4 months, average `1.25`. A post on the 1st and a
//! post on the 28th of the same month count as one month of activity.

use crate::analytics::calculator::StatisticCalculator;
use crate::analytics::calendar::{month_span, round_ratio};
use crate::analytics::params::StatName;
use crate::analytics::tree::StatisticsNode;
use crate::types::SocialPost;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Name of every per-author leaf.
pub const LEAF_NAME: &str = "average-posts-per-user";

const UNITS: &str = "posts";

/// First and last post timestamps seen for one author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDateRange {
    pub earliest: DateTime<FixedOffset>,
    pub latest: DateTime<FixedOffset>,
}

impl PostDateRange {
    pub fn new(date: DateTime<FixedOffset>) -> Self {
        Self {
            earliest: date,
            latest: date,
        }
    }

    /// Widen the range to include `date`.
    pub fn extend(&mut self, date: DateTime<FixedOffset>) {
        if date < self.earliest {
            self.earliest = date;
        }
        if date > self.latest {
            self.latest = date;
        }
    }

    pub fn months(&self) -> u32 {
        month_span(&self.earliest, &self.latest)
    }
}

#[derive(Debug)]
struct AuthorActivity {
    post_count: u64,
    range: PostDateRange,
}

/// Per-author running state for the monthly average.
#[derive(Debug, Default)]
pub struct AvgPostsPerUserCalculator {
    activity: HashMap<String, AuthorActivity>,
    // first-seen order, drives leaf order
    authors: Vec<String>,
}

impl AvgPostsPerUserCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date range tracked for `author_id`, if any post of theirs was seen.
    pub fn date_range(&self, author_id: &str) -> Option<PostDateRange> {
        self.activity.get(author_id).map(|a| a.range)
    }

    /// Posts seen for `author_id`.
    pub fn post_count(&self, author_id: &str) -> u64 {
        self.activity.get(author_id).map_or(0, |a| a.post_count)
    }

    fn average(activity: &AuthorActivity) -> f64 {
        round_ratio(activity.post_count, u64::from(activity.range.months()), 2)
    }
}

impl StatisticCalculator for AvgPostsPerUserCalculator {
    fn stat_name(&self) -> StatName {
        StatName::AveragePostsPerUserPerMonth
    }

    fn units(&self) -> &'static str {
        UNITS
    }

    fn accumulate_post(&mut self, post: &SocialPost) {
        match self.activity.get_mut(&post.author_id) {
            Some(activity) => {
                activity.post_count += 1;
                activity.range.extend(post.date);
            }
            None => {
                self.authors.push(post.author_id.clone());
                self.activity.insert(
                    post.author_id.clone(),
                    AuthorActivity {
                        post_count: 1,
                        range: PostDateRange::new(post.date),
                    },
                );
            }
        }
    }

    fn finalize(&mut self, group: &mut StatisticsNode) {
        for author_id in &self.authors {
            let Some(activity) = self.activity.get(author_id) else {
                continue;
            };

            group.add_child(
                StatisticsNode::new(LEAF_NAME)
                    .with_split_key(author_id.as_str())
                    .with_value(Self::average(activity))
                    .with_units(UNITS),
            );
        }
    }
}
