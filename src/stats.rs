//! Aggregate statistics over the results of repeated trials.
//!
//! Variance is the population variance (divisor = sample count): the series
//! is every trial that was run, not a sample of some larger population.

use crate::error::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStatistics {
    pub thread_count: usize,
    pub experiments: usize,
    pub successes: usize,
    pub failures: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl AggregateStatistics {
    /// Fraction of trials that lost at least one increment.
    pub fn failure_rate(&self) -> f64 {
        self.failures as f64 / self.experiments as f64
    }
}

/// Summarizes the counter values observed in trials of `thread_count` workers.
/// A trial succeeded iff its value equals `thread_count`.
pub fn aggregate(
    results: &[usize],
    thread_count: usize,
) -> Result<AggregateStatistics, StatsError> {
    let (&first, rest) = results.split_first().ok_or(StatsError::EmptySeries)?;

    let (min, max) = rest
        .iter()
        .fold((first, first), |(lo, hi), &r| (lo.min(r), hi.max(r)));

    let experiments = results.len();
    let failures = results.iter().filter(|&&r| r != thread_count).count();

    let count = experiments as f64;
    let mean = results.iter().map(|&r| r as f64).sum::<f64>() / count;
    let variance = results
        .iter()
        .map(|&r| (r as f64 - mean).powi(2))
        .sum::<f64>()
        / count;

    Ok(AggregateStatistics {
        thread_count,
        experiments,
        successes: experiments - failures,
        failures,
        min,
        max,
        mean,
        variance,
        std_dev: variance.sqrt(),
    })
}
