use log::{debug, trace};

use super::{
    event::TimelineEvent,
    observer::Observer,
    state::{ProcessId, SchedCtx, Ticks},
};
use crate::scheduler::ReadyPool;

pub struct SchedCore<P: ReadyPool> {
    pub ctx: SchedCtx,
    pub pool: P,
    timeline: Vec<TimelineEvent>,
    // Admitted or pending processes that have not finished
    active_count: usize,
    observer: Observer,
}

impl<P: ReadyPool> SchedCore<P> {
    pub fn new(ctx: SchedCtx, pool: P) -> Self {
        let active_count = ctx.procs.len();
        Self {
            ctx,
            pool,
            timeline: Vec::new(),
            active_count,
            observer: Observer::new(),
        }
    }

    /// Runs the current tick and advances the clock by one.
    ///
    /// Work done by the running process during the previous tick is
    /// credited first, so a completion is always handled before this
    /// tick's selection. Returns the process that finished, if any.
    pub fn tick(&mut self) -> Option<ProcessId> {
        let now = self.ctx.now;
        trace!(
            "t={now} running={:?} ready={}",
            self.ctx.running.map(|id| self.ctx.process(id).name.as_str()),
            self.pool.len()
        );

        let finished = self.account_running(now);

        if let Some(running) = self.ctx.running {
            if self.pool.should_preempt(&self.ctx, running) {
                self.preempt(running, now);
            }
        }

        if self.ctx.cpu_is_idle() {
            self.try_dispatch(now);
        }

        if self.ctx.cpu_is_idle() {
            debug_assert!(self.pool.is_empty(), "CPU idle with a non-empty pool");
            self.timeline.push(TimelineEvent::idle(now));
        }

        self.observer.observe(&self.ctx, self.pool.len());
        self.ctx.advance_time(1);
        finished
    }

    // Credit one tick of CPU to the running process
    fn account_running(&mut self, now: Ticks) -> Option<ProcessId> {
        let id = self.ctx.running?;

        // In its own block to avoid double-mutable-borrow
        let done = {
            let proc = self.ctx.process_mut(id);
            debug_assert!(proc.remaining > 0, "Running process {} has no work", proc.name);
            proc.remaining -= 1;
            proc.slice_used += 1;
            proc.remaining == 0
        };

        if !done {
            return None;
        }

        self.ctx.clear_cpu();
        self.ctx.mark_finished(id, now);
        self.active_count -= 1;

        let name = &self.ctx.process(id).name;
        debug!("t={now} {name} finished, {} active", self.active_count);
        self.timeline.push(TimelineEvent::finished(now, name));
        Some(id)
    }

    fn preempt(&mut self, id: ProcessId, now: Ticks) {
        self.ctx.clear_cpu();
        self.ctx.mark_ready(id);
        self.pool.requeue(&self.ctx, id);

        let proc = self.ctx.process(id);
        debug!(
            "t={now} {} preempted by {} with {} remaining",
            proc.name,
            self.pool.name(),
            proc.remaining
        );
        self.timeline.push(TimelineEvent::preempted(now, &proc.name));
    }

    fn try_dispatch(&mut self, now: Ticks) {
        let Some(id) = self.pool.pop_best() else {
            return;
        };

        let first_run = self.ctx.set_running(id);
        let proc = self.ctx.process(id);
        if first_run {
            debug!("t={now} {} starts, response {}", proc.name, now - proc.arrival);
        }
        self.timeline
            .push(TimelineEvent::selected(now, &proc.name, proc.remaining));
    }

    pub fn admit(&mut self, id: ProcessId) {
        self.ctx.mark_ready(id);
        self.pool.admit(&self.ctx, id);

        let proc = self.ctx.process(id);
        debug!("t={} {} arrived (burst {})", self.ctx.now, proc.name, proc.burst);
        self.timeline
            .push(TimelineEvent::arrived(self.ctx.now, &proc.name));
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn timeline(&self) -> &[TimelineEvent] {
        &self.timeline
    }

    pub fn into_parts(self) -> (SchedCtx, Vec<TimelineEvent>) {
        (self.ctx, self.timeline)
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
