use std::{sync::Arc, thread};

use tracing::debug;

use crate::{
    barrier::{SpinBarrier, SpinPolicy},
    counter::{IncrementStrategy, SharedCounter},
    error::TrialError,
    worker::Worker,
};

/// All state shared by the workers of one trial.
#[derive(Debug)]
pub struct TrialContext {
    pub(crate) barrier: SpinBarrier,
    pub(crate) counter: SharedCounter,
    pub(crate) strategy: IncrementStrategy,
}

impl TrialContext {
    pub fn new(strategy: IncrementStrategy, spin: SpinPolicy) -> Self {
        Self {
            barrier: SpinBarrier::with_policy(spin),
            counter: SharedCounter::new(),
            strategy,
        }
    }

    pub fn strategy(&self) -> IncrementStrategy {
        self.strategy
    }

    pub fn spin(&self) -> SpinPolicy {
        self.barrier.policy()
    }

    fn reset(&self) {
        self.barrier.reset();
        self.counter.reset();
    }
}

/// Runs trials one after another, each on a fresh set of threads.
///
/// Trials never overlap: `run_trial` joins every worker before returning,
/// which is what makes resetting the shared context at the start of the next
/// trial sound.
pub struct TrialRunner {
    context: Arc<TrialContext>,
}

impl TrialRunner {
    pub fn new(strategy: IncrementStrategy, spin: SpinPolicy) -> Self {
        Self {
            context: Arc::new(TrialContext::new(strategy, spin)),
        }
    }

    pub fn strategy(&self) -> IncrementStrategy {
        self.context.strategy()
    }

    pub fn spin(&self) -> SpinPolicy {
        self.context.spin()
    }

    /// Races `thread_count` workers on a zeroed counter and returns the value
    /// it holds once they have all been joined. A fully correct trial returns
    /// `thread_count`.
    ///
    /// If a spawn fails, the workers already started stay parked at the
    /// barrier for good; the error is meant to end the run.
    pub fn run_trial(&self, thread_count: usize) -> Result<usize, TrialError> {
        if thread_count == 0 {
            return Err(TrialError::NoThreads);
        }

        self.context.reset();

        let mut handles = Vec::with_capacity(thread_count);
        for index in 0..thread_count {
            let worker = Worker::new(self.context.clone(), thread_count);
            let handle = thread::Builder::new()
                .name(format!("race-worker-{}", index))
                .spawn(move || worker.run())
                .map_err(|source| TrialError::Spawn {
                    index,
                    thread_count,
                    source,
                })?;
            handles.push(handle);
        }

        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if panicked {
            return Err(TrialError::WorkerPanicked { thread_count });
        }

        let value = self.context.counter.load();
        debug!(thread_count, value, "trial finished");
        Ok(value)
    }
}
