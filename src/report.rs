//! Plain-text report lines written to stdout.

use std::io::{self, Write};

use crate::stats::AggregateStatistics;

pub const COMPLEX_HEADER: &str = "|Thread_Count | Experiments | Failures |      Min |    Average |      Max |   Variance |   Std Dev  | ";

pub fn write_banner<W: Write>(out: &mut W, mode: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} Mode--------------------------", mode)
}

pub fn write_complex_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", COMPLEX_HEADER)
}

pub fn format_row(stats: &AggregateStatistics) -> String {
    format!(
        "| {:>10}  | {:>10}  | {:>8} | {:>8} | {:>10.2} | {:>8} | {:>10.2} | {:>10.2} |",
        stats.thread_count,
        stats.experiments,
        stats.failures,
        stats.min,
        stats.mean,
        stats.max,
        stats.variance,
        stats.std_dev,
    )
}

pub fn write_row<W: Write>(out: &mut W, stats: &AggregateStatistics) -> io::Result<()> {
    writeln!(out, "{}", format_row(stats))
}

pub fn format_simple(thread_count: usize, value: usize) -> String {
    format!("thread_count = {} = {} = shared_data", thread_count, value)
}
