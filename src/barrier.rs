use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

/// How a waiting thread passes time while the barrier is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpinPolicy {
    /// Poll continuously with a spin-loop hint.
    #[default]
    Busy,
    /// Hand the CPU back to the scheduler between polls.
    Yield,
}

impl SpinPolicy {
    #[inline]
    fn relax(self) {
        match self {
            SpinPolicy::Busy => std::hint::spin_loop(),
            SpinPolicy::Yield => {
                if nix::sched::sched_yield().is_err() {
                    std::thread::yield_now();
                }
            }
        }
    }
}

/// One-shot start gate for a trial.
///
/// Every participant increments the arrival counter once and then polls it
/// until it reaches the expected participant count, so all of them leave
/// `arrive_and_wait` at roughly the same instant.
///
/// Arrivals use `AcqRel` and the polling loads use `Acquire`: a thread that
/// observes the final count has synchronized with every earlier arrival.
/// The barrier does nothing to order what the threads do afterwards.
#[derive(Debug, Default)]
pub struct SpinBarrier {
    arrived: AtomicUsize,
    policy: SpinPolicy,
}

impl SpinBarrier {
    pub const fn new() -> Self {
        Self::with_policy(SpinPolicy::Busy)
    }

    pub const fn with_policy(policy: SpinPolicy) -> Self {
        Self {
            arrived: AtomicUsize::new(0),
            policy,
        }
    }

    pub fn policy(&self) -> SpinPolicy {
        self.policy
    }

    /// Registers the caller and spins until `expected` callers have arrived.
    ///
    /// Never returns if fewer than `expected` threads call it before the next
    /// `reset`.
    pub fn arrive_and_wait(&self, expected: usize) {
        let previous = self.arrived.fetch_add(1, Ordering::AcqRel);
        debug_assert!(
            previous < expected,
            "barrier overrun: arrival {} of {}",
            previous + 1,
            expected
        );

        while self.arrived.load(Ordering::Acquire) != expected {
            self.policy.relax();
        }
    }

    pub fn arrived(&self) -> usize {
        self.arrived.load(Ordering::Acquire)
    }

    /// Closes the gate again. The caller must ensure no thread is still inside
    /// `arrive_and_wait`.
    pub fn reset(&self) {
        self.arrived.store(0, Ordering::Release);
    }
}
