use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while running a single trial.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("a trial needs at least one worker thread")]
    NoThreads,

    #[error("failed to spawn worker {index} of {thread_count}")]
    Spawn {
        index: usize,
        thread_count: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker thread panicked during a {thread_count}-thread trial")]
    WorkerPanicked { thread_count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("cannot aggregate an empty result series")]
    EmptySeries,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must be at least 1")]
    NonPositive { field: &'static str },
}
