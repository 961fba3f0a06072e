use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{ProcessId, ReadyPool, SchedCtx};
use crate::{
    core::{Ticks, state::Process},
    sim::Algorithm,
};

/// Ordering key for shortest-remaining-time: less remaining work first, then
/// earlier arrival, then earlier input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrtfKey {
    pub remaining: Ticks,
    pub arrival: Ticks,
    pub seq: usize,
}

impl SrtfKey {
    pub fn of(proc: &Process) -> Self {
        Self {
            remaining: proc.remaining,
            arrival: proc.arrival,
            seq: proc.seq,
        }
    }

    fn tuple(&self) -> (Ticks, Ticks, usize) {
        (self.remaining, self.arrival, self.seq)
    }
}

// KeyedPriorityQueue is a max-heap, so the smallest key must compare greatest
impl PartialOrd for SrtfKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SrtfKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.tuple().cmp(&self.tuple())
    }
}

/// Preemptive shortest-remaining-time-first.
#[derive(Debug, Default)]
pub struct SrtfPool {
    heap: KeyedPriorityQueue<ProcessId, SrtfKey>,
}

impl SrtfPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_key(&self) -> Option<SrtfKey> {
        self.heap.peek().map(|(_, key)| *key)
    }
}

impl ReadyPool for SrtfPool {
    fn name(&self) -> &'static str {
        "srtf"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn admit(&mut self, ctx: &SchedCtx, id: ProcessId) {
        let previous = self.heap.push(id, SrtfKey::of(ctx.process(id)));
        debug_assert!(previous.is_none(), "Process admitted twice");
    }

    fn peek_best(&self) -> Option<ProcessId> {
        self.heap.peek().map(|(id, _)| *id)
    }

    fn pop_best(&mut self) -> Option<ProcessId> {
        self.heap.pop().map(|(id, _)| id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    // Strictly shorter only; equal remaining never preempts
    fn should_preempt(&self, ctx: &SchedCtx, running: ProcessId) -> bool {
        self.best_key()
            .is_some_and(|best| best.remaining < ctx.process(running).remaining)
    }
}
