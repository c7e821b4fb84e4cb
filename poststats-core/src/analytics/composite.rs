//! Drives several calculators over one post stream.
//!
//! The composite is where date scoping happens: a post reaches a calculator
//! only if it falls inside that calculator's [`DateWindow`]. Calculators
//! themselves never filter.

use super::calculator::{Calculator, CalculatorPhase};
use super::params::StatName;
use super::tree::StatisticsNode;
use crate::error::Result;
use crate::types::SocialPost;

/// Name of the root node returned by [`CalculatorComposite::calculate`].
pub const ROOT_NAME: &str = "statistics";

/// Counts from feeding a batch of posts through a composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulateSummary {
    /// Posts offered to the composite
    pub posts_seen: usize,
    /// Posts accepted by at least one calculator
    pub posts_in_scope: usize,
}

/// Ordered collection of calculators sharing one input stream.
#[derive(Debug, Default)]
pub struct CalculatorComposite {
    calculators: Vec<Calculator>,
}

impl CalculatorComposite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a calculator; its grouping node appears in registration order.
    pub fn register(&mut self, calculator: Calculator) {
        tracing::info!(stat = %calculator.stat_name(), "Registered statistics calculator");
        self.calculators.push(calculator);
    }

    pub fn stat_names(&self) -> Vec<StatName> {
        self.calculators.iter().map(|c| c.stat_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Offer one post to every calculator whose window contains it.
    ///
    /// Returns how many calculators accepted the post.
    pub fn accumulate(&mut self, post: &SocialPost) -> Result<usize> {
        let mut accepted = 0;
        for calculator in &mut self.calculators {
            if !calculator.params().window().contains(&post.date) {
                continue;
            }
            calculator.accumulate(post)?;
            accepted += 1;
        }
        Ok(accepted)
    }

    /// Offer every post in `posts`, in order.
    pub fn accumulate_all<'a, I>(&mut self, posts: I) -> Result<AccumulateSummary>
    where
        I: IntoIterator<Item = &'a SocialPost>,
    {
        let mut summary = AccumulateSummary::default();
        for post in posts {
            summary.posts_seen += 1;
            if self.accumulate(post)? > 0 {
                summary.posts_in_scope += 1;
            }
        }

        tracing::debug!(
            posts_seen = summary.posts_seen,
            posts_in_scope = summary.posts_in_scope,
            "Accumulated post batch"
        );

        Ok(summary)
    }

    /// Finalize every calculator and collect their grouping nodes under a
    /// root named [`ROOT_NAME`].
    pub fn calculate(&mut self) -> Result<StatisticsNode> {
        let mut root = StatisticsNode::new(ROOT_NAME);
        for calculator in &mut self.calculators {
            tracing::debug!(
                stat = %calculator.stat_name(),
                phase = calculator.phase().as_str(),
                "Finalizing calculator"
            );
            root.add_child(calculator.calculate()?);
        }

        tracing::info!(statistics = root.children().len(), "Statistics calculated");
        Ok(root)
    }

    /// Whether every calculator has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.calculators
            .iter()
            .all(|c| c.phase() == CalculatorPhase::Finalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::calculators::create_composite;
    use crate::analytics::params::StatsParams;
    use crate::error::Error;
    use chrono::{DateTime, FixedOffset};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn post(id: &str, author_id: &str, created_time: &str) -> SocialPost {
        SocialPost {
            id: id.to_string(),
            author_id: author_id.to_string(),
            author_name: "bla".to_string(),
            message: "m".to_string(),
            post_type: "status".to_string(),
            date: ts(created_time),
        }
    }

    #[test]
    fn test_window_limits_each_calculator() {
        let mut composite = create_composite(&[
            StatsParams::new(StatName::AveragePostsPerUserPerMonth).with_window(
                Some(ts("2023-04-01T00:00:00+00:00")),
                Some(ts("2023-04-30T23:59:59+00:00")),
            ),
            StatsParams::new(StatName::MaxCharacterLength),
        ]);

        let posts = vec![
            post("1", "user_1", "2023-04-11T11:00:00+03:00"),
            post("2", "user_1", "2023-03-11T11:00:00+02:00"),
            post("3", "user_2", "2023-02-11T11:00:00+02:00"),
        ];
        let summary = composite.accumulate_all(&posts).unwrap();
        assert_eq!(summary.posts_seen, 3);
        assert_eq!(summary.posts_in_scope, 3);

        let root = composite.calculate().unwrap();
        assert_eq!(root.name(), ROOT_NAME);
        assert_eq!(root.children().len(), 2);

        let avg = &root.children()[0];
        assert_eq!(avg.name(), "average-posts-per-user");
        assert_eq!(avg.children().len(), 1);
        assert_eq!(avg.children()[0].split_key(), Some("user_1"));
        assert_eq!(avg.children()[0].value(), Some(1.0));
    }

    #[test]
    fn test_posts_outside_every_window_are_not_in_scope() {
        let mut composite = create_composite(&[StatsParams::new(StatName::TotalPostsPerWeek)
            .with_window(Some(ts("2024-01-01T00:00:00+00:00")), None)]);

        let posts = vec![post("1", "user_1", "2023-04-11T11:00:00+03:00")];
        let summary = composite.accumulate_all(&posts).unwrap();
        assert_eq!(summary.posts_in_scope, 0);

        let root = composite.calculate().unwrap();
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn test_empty_composite_returns_bare_root() {
        let mut composite = CalculatorComposite::new();
        assert!(composite.is_empty());
        let root = composite.calculate().unwrap();
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_composite_cannot_be_reused_after_calculate() {
        let mut composite =
            create_composite(&[StatsParams::new(StatName::AveragePostsPerUserPerMonth)]);
        composite.calculate().unwrap();
        assert!(composite.is_finalized());

        let err = composite
            .accumulate(&post("1", "user_1", "2023-04-11T11:00:00+03:00"))
            .unwrap_err();
        assert!(matches!(err, Error::CalculatorFinalized { .. }));
        assert!(composite.calculate().is_err());
    }
}
