//! Analytics module for poststats
//!
//! Computes aggregate statistics over social media posts:
//! - Average posts per author per calendar month
//! - Average and maximum post length
//! - Post counts per ISO week
//!
//! ## Calculator Framework
//!
//! Each statistic is a [`StatisticCalculator`] wrapped in a [`Calculator`]
//! that enforces the accumulate-then-finalize lifecycle. A
//! [`CalculatorComposite`] feeds one post stream to several calculators,
//! applying each one's date window, and gathers their results into a single
//! [`StatisticsNode`] tree.
//!
//! See [`calculator`] for the lifecycle and [`calculators`] for the built-in
//! statistics.

pub mod calculator;
pub mod calculators;
pub mod calendar;
pub mod composite;
pub mod params;
pub mod tree;

pub use calculator::{Calculator, CalculatorPhase, StatisticCalculator};
pub use calculators::{create_calculator, create_composite};
pub use calendar::{month_span, round_ratio};
pub use composite::{AccumulateSummary, CalculatorComposite, ROOT_NAME};
pub use params::{DateWindow, StatName, StatsParams};
pub use tree::StatisticsNode;
