//! Post length statistics.
//!
//! Lengths are counted in characters, not bytes. Both statistics report a
//! single value on the grouping node itself rather than per-author leaves.

use crate::analytics::calculator::StatisticCalculator;
use crate::analytics::calendar::round_ratio;
use crate::analytics::params::StatName;
use crate::analytics::tree::StatisticsNode;
use crate::types::SocialPost;

const UNITS: &str = "characters";

/// Mean post length over all accumulated posts.
#[derive(Debug, Default)]
pub struct AveragePostLengthCalculator {
    total_length: u64,
    post_count: u64,
}

impl AveragePostLengthCalculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticCalculator for AveragePostLengthCalculator {
    fn stat_name(&self) -> StatName {
        StatName::AverageCharacterLength
    }

    fn units(&self) -> &'static str {
        UNITS
    }

    fn accumulate_post(&mut self, post: &SocialPost) {
        self.total_length += post.character_count() as u64;
        self.post_count += 1;
    }

    fn finalize(&mut self, group: &mut StatisticsNode) {
        group.set_value(round_ratio(self.total_length, self.post_count, 2));
        group.set_units(UNITS);
    }
}

/// Longest post length seen.
#[derive(Debug, Default)]
pub struct MaxPostLengthCalculator {
    max_length: usize,
}

impl MaxPostLengthCalculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticCalculator for MaxPostLengthCalculator {
    fn stat_name(&self) -> StatName {
        StatName::MaxCharacterLength
    }

    fn units(&self) -> &'static str {
        UNITS
    }

    fn accumulate_post(&mut self, post: &SocialPost) {
        self.max_length = self.max_length.max(post.character_count());
    }

    fn finalize(&mut self, group: &mut StatisticsNode) {
        group.set_value(self.max_length as f64);
        group.set_units(UNITS);
    }
}
