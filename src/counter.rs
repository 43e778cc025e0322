use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

/// Access discipline used by workers when bumping the shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IncrementStrategy {
    /// Separate load, add and store. Concurrent increments can be lost.
    #[default]
    #[serde(rename = "plain")]
    PlainLoadAddStore,
    /// A single indivisible fetch-and-add.
    #[serde(rename = "atomic")]
    AtomicFetchAdd,
}

/// The cell every worker of a trial increments once.
///
/// The value always lives in an `AtomicUsize`. A genuinely unsynchronized
/// access to a plain integer from several threads is undefined behaviour in
/// Rust, and the optimizer is free to assume it never happens. The racy
/// discipline is therefore expressed as a `Relaxed` load followed by a
/// separate `Relaxed` store: the same load/add/store instruction sequence a
/// plain `+= 1` compiles to, with the lost-update window intact and the
/// behaviour still defined.
#[derive(Debug, Default)]
pub struct SharedCounter {
    value: AtomicUsize,
}

impl SharedCounter {
    pub const fn new() -> Self {
        Self {
            value: AtomicUsize::new(0),
        }
    }

    pub fn increment(&self, strategy: IncrementStrategy) {
        match strategy {
            IncrementStrategy::PlainLoadAddStore => {
                let current = self.value.load(Ordering::Relaxed);
                let next = current.wrapping_add(1);
                self.value.store(next, Ordering::Relaxed);
            }
            IncrementStrategy::AtomicFetchAdd => {
                self.value.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Reads the value. Only meaningful once every writer has been joined.
    pub fn load(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Release);
    }
}
