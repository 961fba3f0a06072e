use std::collections::VecDeque;

use super::{ProcessId, ReadyPool, SchedCtx};
use crate::sim::Algorithm;

/// First-come first-served: strict arrival order, never preempts.
#[derive(Debug, Default)]
pub struct FcfsPool {
    queue: VecDeque<ProcessId>,
}

impl FcfsPool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadyPool for FcfsPool {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn admit(&mut self, _ctx: &SchedCtx, id: ProcessId) {
        self.queue.push_back(id);
    }

    fn peek_best(&self) -> Option<ProcessId> {
        self.queue.front().copied()
    }

    fn pop_best(&mut self) -> Option<ProcessId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
