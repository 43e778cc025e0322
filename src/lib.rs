//! A harness that measures lost updates when several threads increment one
//! shared counter at the same instant.

pub mod barrier;
pub mod config;
pub mod counter;
pub mod driver;
pub mod error;
pub mod interrupt;
pub mod report;
pub mod stats;
pub mod trial;
pub mod worker;

pub use barrier::{SpinBarrier, SpinPolicy};
pub use config::RaceConfig;
pub use counter::{IncrementStrategy, SharedCounter};
pub use driver::{complex_mode, run, simple_mode, Sweep};
pub use error::{ConfigError, StatsError, TrialError};
pub use stats::{aggregate, AggregateStatistics};
pub use trial::{TrialContext, TrialRunner};
pub use worker::Worker;
