//! Accumulate/finalize calculator framework
//!
//! Every statistic follows the same two-phase contract:
//!
//! ```text
//!   Fresh ──accumulate──▶ Accumulating ──calculate──▶ Finalized
//!     │                      ▲     │
//!     │                      └─────┘ accumulate
//!     └──────────────calculate──────────────▶ Finalized
//! ```
//!
//! - `accumulate(post)` is called once per in-scope post, in any order, and
//!   only updates the calculator's running state.
//! - `calculate()` is called exactly once and derives the result tree from
//!   that state alone.
//!
//! Using a calculator after it has been finalized is rejected with
//! [`Error::CalculatorFinalized`] rather than producing a stale or merged
//! result.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poststats_core::analytics::{create_calculator, StatName, StatsParams};
//!
//! let mut calculator = create_calculator(StatsParams::new(StatName::AveragePostsPerUserPerMonth));
//! for post in &posts {
//!     calculator.accumulate(post)?;
//! }
//! let group = calculator.calculate()?;
//! ```

use super::params::{StatName, StatsParams};
use super::tree::StatisticsNode;
use crate::error::{Error, Result};
use crate::types::SocialPost;

// ============================================
// Per-statistic capability
// ============================================

/// Trait that every statistic implements.
///
/// Implementations only hold running state; phase bookkeeping and naming of
/// the result live in [`Calculator`].
///
/// ## Example
///
/// ```rust,ignore
/// struct PostCount(u64);
///
/// impl StatisticCalculator for PostCount {
///     fn stat_name(&self) -> StatName { StatName::TotalPostsPerWeek }
///     fn units(&self) -> &'static str { "posts" }
///     fn accumulate_post(&mut self, _post: &SocialPost) { self.0 += 1; }
///     fn finalize(&mut self, group: &mut StatisticsNode) {
///         group.set_value(self.0 as f64);
///     }
/// }
/// ```
pub trait StatisticCalculator: Send {
    /// Statistic this implementation computes.
    fn stat_name(&self) -> StatName;

    /// Unit label attached to produced values.
    fn units(&self) -> &'static str;

    /// Fold one post into the running state.
    fn accumulate_post(&mut self, post: &SocialPost);

    /// Populate `group` (already named after the configured statistic) from
    /// the running state, either by setting its value or by adding leaves.
    fn finalize(&mut self, group: &mut StatisticsNode);
}

// ============================================
// Phase-tracking wrapper
// ============================================

/// Lifecycle of a [`Calculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorPhase {
    /// Constructed, nothing accumulated yet
    Fresh,
    /// At least one post accumulated
    Accumulating,
    /// `calculate()` has run; no further use allowed
    Finalized,
}

impl CalculatorPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorPhase::Fresh => "fresh",
            CalculatorPhase::Accumulating => "accumulating",
            CalculatorPhase::Finalized => "finalized",
        }
    }
}

/// A configured statistic together with its lifecycle state.
pub struct Calculator {
    params: StatsParams,
    phase: CalculatorPhase,
    posts_accumulated: u64,
    inner: Box<dyn StatisticCalculator>,
}

impl Calculator {
    pub fn new(params: StatsParams, inner: Box<dyn StatisticCalculator>) -> Self {
        debug_assert_eq!(inner.stat_name(), params.stat_name);
        Self {
            params,
            phase: CalculatorPhase::Fresh,
            posts_accumulated: 0,
            inner,
        }
    }

    pub fn params(&self) -> &StatsParams {
        &self.params
    }

    pub fn stat_name(&self) -> StatName {
        self.params.stat_name
    }

    pub fn phase(&self) -> CalculatorPhase {
        self.phase
    }

    pub fn posts_accumulated(&self) -> u64 {
        self.posts_accumulated
    }

    fn finalized_error(&self) -> Error {
        Error::CalculatorFinalized {
            stat: self.params.stat_name.to_string(),
        }
    }

    /// Fold one post into the running state.
    ///
    /// The caller decides which posts are in scope; no filtering happens here.
    pub fn accumulate(&mut self, post: &SocialPost) -> Result<()> {
        if self.phase == CalculatorPhase::Finalized {
            return Err(self.finalized_error());
        }

        self.inner.accumulate_post(post);
        self.posts_accumulated += 1;
        self.phase = CalculatorPhase::Accumulating;

        tracing::trace!(
            stat = %self.params.stat_name,
            post_id = %post.id,
            author_id = %post.author_id,
            "Accumulated post"
        );

        Ok(())
    }

    /// Produce the grouping node for this statistic.
    ///
    /// May be called with zero posts accumulated; the grouping node is then
    /// returned without children.
    pub fn calculate(&mut self) -> Result<StatisticsNode> {
        if self.phase == CalculatorPhase::Finalized {
            return Err(self.finalized_error());
        }

        let mut group = StatisticsNode::new(self.params.stat_name.as_str());
        self.inner.finalize(&mut group);
        self.phase = CalculatorPhase::Finalized;

        tracing::debug!(
            stat = %self.params.stat_name,
            posts = self.posts_accumulated,
            children = group.children().len(),
            "Calculated statistic"
        );

        Ok(group)
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("params", &self.params)
            .field("phase", &self.phase)
            .field("posts_accumulated", &self.posts_accumulated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    struct CountingCalculator {
        seen: u64,
    }

    impl StatisticCalculator for CountingCalculator {
        fn stat_name(&self) -> StatName {
            StatName::TotalPostsPerWeek
        }

        fn units(&self) -> &'static str {
            "posts"
        }

        fn accumulate_post(&mut self, _post: &SocialPost) {
            self.seen += 1;
        }

        fn finalize(&mut self, group: &mut StatisticsNode) {
            group.set_value(self.seen as f64);
            group.set_units(self.units());
        }
    }

    fn counting() -> Calculator {
        Calculator::new(
            StatsParams::new(StatName::TotalPostsPerWeek),
            Box::new(CountingCalculator { seen: 0 }),
        )
    }

    fn post(id: &str) -> SocialPost {
        SocialPost {
            id: id.to_string(),
            author_id: "user_1".to_string(),
            author_name: "bla".to_string(),
            message: "m".to_string(),
            post_type: "status".to_string(),
            date: DateTime::parse_from_rfc3339("2023-04-11T11:00:00+03:00").unwrap(),
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut calculator = counting();
        assert_eq!(calculator.phase(), CalculatorPhase::Fresh);

        calculator.accumulate(&post("1")).unwrap();
        assert_eq!(calculator.phase(), CalculatorPhase::Accumulating);
        calculator.accumulate(&post("2")).unwrap();
        assert_eq!(calculator.posts_accumulated(), 2);

        let group = calculator.calculate().unwrap();
        assert_eq!(calculator.phase(), CalculatorPhase::Finalized);
        assert_eq!(group.name(), "total-posts-per-week");
        assert_eq!(group.value(), Some(2.0));
    }

    #[test]
    fn test_calculate_from_fresh() {
        let mut calculator = counting();
        let group = calculator.calculate().unwrap();
        assert_eq!(group.value(), Some(0.0));
        assert_eq!(calculator.phase(), CalculatorPhase::Finalized);
    }

    #[test]
    fn test_accumulate_after_finalize_is_rejected() {
        let mut calculator = counting();
        calculator.accumulate(&post("1")).unwrap();
        calculator.calculate().unwrap();

        let err = calculator.accumulate(&post("2")).unwrap_err();
        assert!(matches!(
            err,
            Error::CalculatorFinalized { ref stat } if stat == "total-posts-per-week"
        ));
        assert_eq!(calculator.posts_accumulated(), 1);
    }

    #[test]
    fn test_double_calculate_is_rejected() {
        let mut calculator = counting();
        calculator.calculate().unwrap();
        assert!(matches!(
            calculator.calculate(),
            Err(Error::CalculatorFinalized { .. })
        ));
    }
}
