use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    config::RaceConfig,
    report,
    stats::{aggregate, AggregateStatistics},
    trial::TrialRunner,
};

/// Outcome of a complex-mode sweep.
#[derive(Debug, Default)]
pub struct Sweep {
    pub rows: Vec<AggregateStatistics>,
    /// The sweep stopped early because an interrupt was requested.
    pub interrupted: bool,
}

/// Runs one trial at `config.thread_count` and prints the raw counter value.
pub fn simple_mode<W: Write>(
    config: &RaceConfig,
    runner: &TrialRunner,
    out: &mut W,
) -> Result<usize> {
    report::write_banner(out, "Simple")?;
    info!(
        thread_count = config.thread_count,
        strategy = ?runner.strategy(),
        spin = ?runner.spin(),
        "simple mode"
    );

    let value = runner
        .run_trial(config.thread_count)
        .with_context(|| format!("simple-mode trial with {} threads", config.thread_count))?;
    writeln!(out, "{}", report::format_simple(config.thread_count, value))?;
    Ok(value)
}

/// Sweeps the thread count over `1..=config.max_threads`, running
/// `config.experiments` trials at each step and printing one row per step.
///
/// `config.thread_count` follows the sweep and is restored before returning,
/// whether the sweep finished, was interrupted, or failed.
pub fn complex_mode<W: Write>(
    config: &mut RaceConfig,
    runner: &TrialRunner,
    interrupted: &AtomicBool,
    out: &mut W,
) -> Result<Sweep> {
    let original = config.thread_count;
    let result = sweep(config, runner, interrupted, out);
    config.thread_count = original;
    result
}

fn sweep<W: Write>(
    config: &mut RaceConfig,
    runner: &TrialRunner,
    interrupted: &AtomicBool,
    out: &mut W,
) -> Result<Sweep> {
    report::write_banner(out, "Complex")?;
    report::write_complex_header(out)?;
    info!(
        max_threads = config.max_threads,
        experiments = config.experiments,
        strategy = ?runner.strategy(),
        spin = ?runner.spin(),
        "complex mode"
    );

    let mut outcome = Sweep::default();
    let mut results = Vec::with_capacity(config.experiments);

    for thread_count in 1..=config.max_threads {
        if interrupted.load(Ordering::Relaxed) {
            warn!(completed = outcome.rows.len(), "sweep interrupted");
            outcome.interrupted = true;
            break;
        }

        config.thread_count = thread_count;
        results.clear();
        for experiment in 0..config.experiments {
            let value = runner.run_trial(thread_count).with_context(|| {
                format!("experiment {} with {} threads", experiment, thread_count)
            })?;
            results.push(value);
        }

        let stats = aggregate(&results, thread_count)?;
        info!(
            thread_count,
            failures = stats.failures,
            failure_rate = stats.failure_rate(),
            mean = stats.mean,
            "sweep row"
        );
        report::write_row(out, &stats)?;
        out.flush()?;
        outcome.rows.push(stats);
    }

    Ok(outcome)
}

/// Runs the enabled modes in order: complex first, then simple.
pub fn run<W: Write>(
    config: &mut RaceConfig,
    interrupted: &AtomicBool,
    out: &mut W,
) -> Result<()> {
    let runner = TrialRunner::new(config.strategy, config.spin);

    if config.run_complex {
        complex_mode(config, &runner, interrupted, out)?;
    }
    if config.run_simple {
        if interrupted.load(Ordering::Relaxed) {
            warn!("skipping simple mode after interrupt");
        } else {
            simple_mode(config, &runner, out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{barrier::SpinPolicy, counter::IncrementStrategy};
    use std::io;

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn small_config(strategy: IncrementStrategy) -> RaceConfig {
        RaceConfig {
            max_threads: 4,
            experiments: 10,
            strategy,
            thread_count: 3,
            ..RaceConfig::default()
        }
    }

    #[test]
    fn sweep_restores_thread_count() {
        let mut config = small_config(IncrementStrategy::PlainLoadAddStore);
        let runner = TrialRunner::new(config.strategy, SpinPolicy::Busy);
        let mut out = Vec::new();

        let sweep =
            complex_mode(&mut config, &runner, &AtomicBool::new(false), &mut out).unwrap();

        assert_eq!(config.thread_count, 3);
        assert!(!sweep.interrupted);
        let counts: Vec<_> = sweep.rows.iter().map(|r| r.thread_count).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        assert!(sweep.rows.iter().all(|r| r.experiments == 10));
    }

    #[test]
    fn atomic_sweep_has_no_failures() {
        let mut config = small_config(IncrementStrategy::AtomicFetchAdd);
        let runner = TrialRunner::new(config.strategy, SpinPolicy::Busy);
        let mut out = Vec::new();

        let sweep =
            complex_mode(&mut config, &runner, &AtomicBool::new(false), &mut out).unwrap();

        for row in &sweep.rows {
            assert_eq!(row.failures, 0);
            assert_eq!(row.min, row.thread_count);
            assert_eq!(row.max, row.thread_count);
        }

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Complex Mode--------------------------");
        assert_eq!(lines[2], report::COMPLEX_HEADER);
        assert_eq!(lines.len(), 3 + 4);
    }

    #[test]
    fn interrupt_before_start_prints_no_rows() {
        let mut config = small_config(IncrementStrategy::AtomicFetchAdd);
        let runner = TrialRunner::new(config.strategy, SpinPolicy::Busy);
        let mut out = Vec::new();

        let sweep =
            complex_mode(&mut config, &runner, &AtomicBool::new(true), &mut out).unwrap();

        assert!(sweep.interrupted);
        assert!(sweep.rows.is_empty());
        assert_eq!(config.thread_count, 3);
    }

    #[test]
    fn failed_sweep_still_restores_thread_count() {
        let mut config = small_config(IncrementStrategy::AtomicFetchAdd);
        let runner = TrialRunner::new(config.strategy, SpinPolicy::Busy);

        let mut preamble = Vec::new();
        report::write_banner(&mut preamble, "Complex").unwrap();
        report::write_complex_header(&mut preamble).unwrap();
        let mut out = ShortWriter {
            budget: preamble.len(),
        };

        let result = complex_mode(&mut config, &runner, &AtomicBool::new(false), &mut out);

        assert!(result.is_err());
        assert_eq!(config.thread_count, 3);
    }

    #[test]
    fn simple_mode_uses_current_thread_count() {
        let config = small_config(IncrementStrategy::AtomicFetchAdd);
        let runner = TrialRunner::new(config.strategy, SpinPolicy::Busy);
        let mut out = Vec::new();

        let value = simple_mode(&config, &runner, &mut out).unwrap();

        assert_eq!(value, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nSimple Mode--------------------------\nthread_count = 3 = 3 = shared_data\n"
        );
    }

    #[test]
    fn run_skips_simple_mode_after_interrupt() {
        let mut config = small_config(IncrementStrategy::AtomicFetchAdd);
        let mut out = Vec::new();

        run(&mut config, &AtomicBool::new(true), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Complex Mode"));
        assert!(!text.contains("Simple Mode"));
    }
}
