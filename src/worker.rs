use std::sync::Arc;

use crate::trial::TrialContext;

/// Body of one racing thread: wait at the gate, then increment once.
pub struct Worker {
    context: Arc<TrialContext>,
    expected: usize,
}

impl Worker {
    pub fn new(context: Arc<TrialContext>, expected: usize) -> Self {
        Self { context, expected }
    }

    pub fn run(self) {
        self.context.barrier.arrive_and_wait(self.expected);
        self.context.counter.increment(self.context.strategy);
    }
}
