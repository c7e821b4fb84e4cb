//! Calculator parameters and the statistic-name enumeration.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Statistics known to the calculator factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatName {
    AverageCharacterLength,
    MaxCharacterLength,
    TotalPostsPerWeek,
    #[serde(rename = "average-posts-per-user")]
    AveragePostsPerUserPerMonth,
}

impl StatName {
    /// Every statistic, in report order.
    pub const ALL: [StatName; 4] = [
        StatName::AverageCharacterLength,
        StatName::MaxCharacterLength,
        StatName::TotalPostsPerWeek,
        StatName::AveragePostsPerUserPerMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::AverageCharacterLength => "average-character-length",
            StatName::MaxCharacterLength => "max-character-length",
            StatName::TotalPostsPerWeek => "total-posts-per-week",
            StatName::AveragePostsPerUserPerMonth => "average-posts-per-user",
        }
    }
}

impl std::fmt::Display for StatName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StatName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StatName::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| Error::UnknownStatistic(s.to_string()))
    }
}

/// Inclusive date bounds used to decide whether a post is in scope.
///
/// An absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl DateWindow {
    pub fn new(start: Option<DateTime<FixedOffset>>, end: Option<DateTime<FixedOffset>>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: &DateTime<FixedOffset>) -> bool {
        self.start.map_or(true, |start| *date >= start)
            && self.end.map_or(true, |end| *date <= end)
    }
}

/// Parameters a calculator is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsParams {
    /// Statistic to compute; also names the grouping node in the result
    pub stat_name: StatName,
    /// Earliest post date in scope (inclusive)
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Latest post date in scope (inclusive)
    pub end_date: Option<DateTime<FixedOffset>>,
}

impl StatsParams {
    /// Parameters with an unbounded date window.
    pub fn new(stat_name: StatName) -> Self {
        Self {
            stat_name,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_window(
        mut self,
        start_date: Option<DateTime<FixedOffset>>,
        end_date: Option<DateTime<FixedOffset>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_stat_name_round_trips_through_str() {
        for stat in StatName::ALL {
            assert_eq!(stat.as_str().parse::<StatName>().unwrap(), stat);
        }
    }

    #[test]
    fn test_unknown_stat_name() {
        let err = "posts-per-fortnight".parse::<StatName>().unwrap_err();
        assert!(matches!(err, Error::UnknownStatistic(name) if name == "posts-per-fortnight"));
    }

    #[test]
    fn test_stat_name_serde_matches_as_str() {
        for stat in StatName::ALL {
            let json = serde_json::to_string(&stat).unwrap();
            assert_eq!(json, format!("\"{}\"", stat.as_str()));
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow::new(
            Some(ts("2023-04-01T00:00:00+00:00")),
            Some(ts("2023-04-30T23:59:59+00:00")),
        );

        assert!(window.contains(&ts("2023-04-01T00:00:00+00:00")));
        assert!(window.contains(&ts("2023-04-30T23:59:59+00:00")));
        assert!(window.contains(&ts("2023-04-11T11:00:00+03:00")));
        assert!(!window.contains(&ts("2023-03-31T23:59:59+00:00")));
        // 00:30 local on May 1st is still April 30th in UTC
        assert!(window.contains(&ts("2023-05-01T00:30:00+01:00")));
    }

    #[test]
    fn test_open_window_contains_everything() {
        let window = StatsParams::new(StatName::TotalPostsPerWeek).window();
        assert!(window.contains(&ts("1999-12-31T23:59:59+00:00")));
        assert!(window.contains(&ts("2099-01-01T00:00:00+00:00")));
    }
}
