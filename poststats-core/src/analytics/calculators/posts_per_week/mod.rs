//! Total posts per ISO week.
//!
//! Weeks are taken from each post's local calendar and labelled
//! `Week WW, YYYY` using the ISO week-numbering year, so 2023-01-01 (a
//! Sunday) lands in `Week 52, 2022`.

use crate::analytics::calculator::StatisticCalculator;
use crate::analytics::params::StatName;
use crate::analytics::tree::StatisticsNode;
use crate::types::SocialPost;
use chrono::{DateTime, Datelike, FixedOffset};
use std::collections::HashMap;

const UNITS: &str = "posts";

/// Label for the ISO week containing `date`.
pub fn week_label(date: &DateTime<FixedOffset>) -> String {
    let week = date.iso_week();
    format!("Week {:02}, {}", week.week(), week.year())
}

#[derive(Debug, Default)]
pub struct PostsPerWeekCalculator {
    counts: HashMap<String, u64>,
    weeks: Vec<String>,
}

impl PostsPerWeekCalculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticCalculator for PostsPerWeekCalculator {
    fn stat_name(&self) -> StatName {
        StatName::TotalPostsPerWeek
    }

    fn units(&self) -> &'static str {
        UNITS
    }

    fn accumulate_post(&mut self, post: &SocialPost) {
        let label = week_label(&post.date);
        match self.counts.get_mut(&label) {
            Some(count) => *count += 1,
            None => {
                self.weeks.push(label.clone());
                self.counts.insert(label, 1);
            }
        }
    }

    fn finalize(&mut self, group: &mut StatisticsNode) {
        for week in &self.weeks {
            let count = self.counts.get(week).copied().unwrap_or(0);
            group.add_child(
                StatisticsNode::new(StatName::TotalPostsPerWeek.as_str())
                    .with_split_key(week.as_str())
                    .with_value(count as f64)
                    .with_units(UNITS),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn post(created_time: &str) -> SocialPost {
        SocialPost {
            id: created_time.to_string(),
            author_id: "user_1".to_string(),
            author_name: "bla".to_string(),
            message: "m".to_string(),
            post_type: "status".to_string(),
            date: ts(created_time),
        }
    }

    #[test]
    fn test_week_label_uses_iso_year() {
        assert_eq!(week_label(&ts("2023-01-01T12:00:00+00:00")), "Week 52, 2022");
        assert_eq!(week_label(&ts("2023-01-02T12:00:00+00:00")), "Week 01, 2023");
        assert_eq!(week_label(&ts("2023-04-11T11:00:00+03:00")), "Week 15, 2023");
    }

    #[test]
    fn test_counts_per_week_in_first_seen_order() {
        let mut calculator = PostsPerWeekCalculator::new();
        for created_time in [
            "2023-04-11T11:00:00+03:00",
            "2023-01-02T08:00:00+00:00",
            "2023-04-12T09:00:00+03:00",
            "2023-04-16T23:00:00+03:00",
        ] {
            calculator.accumulate_post(&post(created_time));
        }

        let mut group = StatisticsNode::new("total-posts-per-week");
        calculator.finalize(&mut group);

        let rows: Vec<_> = group
            .children()
            .iter()
            .map(|c| (c.split_key().unwrap(), c.value().unwrap()))
            .collect();
        assert_eq!(rows, vec![("Week 15, 2023", 3.0), ("Week 01, 2023", 1.0)]);
    }
}
