//! Built-in statistic calculators
//!
//! Each calculator lives in its own subdirectory.
//!
//! ## Built-in Calculators
//!
//! - [`avg_posts_per_user`]: average posts per author per calendar month
//! - [`character_length`]: average and maximum post length
//! - [`posts_per_week`]: post counts per ISO week
//!
//! ## Adding a Statistic
//!
//! 1. Add a variant to [`StatName`]
//! 2. Implement [`StatisticCalculator`] in a new module
//! 3. Map the variant to it in [`create_calculator`]

pub mod avg_posts_per_user;
pub mod character_length;
pub mod posts_per_week;

use super::calculator::{Calculator, StatisticCalculator};
use super::composite::CalculatorComposite;
use super::params::{StatName, StatsParams};

/// Build the calculator implementing `params.stat_name`.
pub fn create_calculator(params: StatsParams) -> Calculator {
    let inner: Box<dyn StatisticCalculator> = match params.stat_name {
        StatName::AverageCharacterLength => {
            Box::new(character_length::AveragePostLengthCalculator::new())
        }
        StatName::MaxCharacterLength => Box::new(character_length::MaxPostLengthCalculator::new()),
        StatName::TotalPostsPerWeek => Box::new(posts_per_week::PostsPerWeekCalculator::new()),
        StatName::AveragePostsPerUserPerMonth => {
            Box::new(avg_posts_per_user::AvgPostsPerUserCalculator::new())
        }
    };
    Calculator::new(params, inner)
}

/// Build a composite with one calculator per parameter set, in order.
///
/// ```rust,ignore
/// use poststats_core::analytics::{create_composite, StatName, StatsParams};
///
/// let composite = create_composite(&[StatsParams::new(StatName::AveragePostsPerUserPerMonth)]);
/// println!("Statistics: {:?}", composite.stat_names());
/// ```
pub fn create_composite(params: &[StatsParams]) -> CalculatorComposite {
    let mut composite = CalculatorComposite::new();
    for p in params {
        composite.register(create_calculator(p.clone()));
    }
    composite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_covers_every_stat() {
        for stat in StatName::ALL {
            let mut calculator = create_calculator(StatsParams::new(stat));
            assert_eq!(calculator.stat_name(), stat);

            let group = calculator.calculate().unwrap();
            assert_eq!(group.name(), stat.as_str());
        }
    }

    #[test]
    fn test_create_composite_keeps_param_order() {
        let composite = create_composite(&[
            StatsParams::new(StatName::TotalPostsPerWeek),
            StatsParams::new(StatName::AveragePostsPerUserPerMonth),
        ]);
        assert_eq!(
            composite.stat_names(),
            vec![
                StatName::TotalPostsPerWeek,
                StatName::AveragePostsPerUserPerMonth
            ]
        );
    }
}
