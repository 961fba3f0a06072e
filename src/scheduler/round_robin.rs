use std::collections::VecDeque;

use super::{ProcessId, ReadyPool, SchedCtx};
use crate::{core::Ticks, sim::Algorithm};

/// Rotation with a fixed quantum. An expired process goes to the tail,
/// behind anything admitted earlier in the same tick.
#[derive(Debug)]
pub struct RoundRobinPool {
    queue: VecDeque<ProcessId>,
    quantum: Ticks,
}

impl RoundRobinPool {
    pub fn new(quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "Round-Robin quantum must be positive");
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }
}

impl ReadyPool for RoundRobinPool {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn quantum(&self) -> Option<Ticks> {
        Some(self.quantum)
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

    fn should_preempt(&self, ctx: &SchedCtx, running: ProcessId) -> bool {
        ctx.process(running).slice_used >= self.quantum
    }
}
