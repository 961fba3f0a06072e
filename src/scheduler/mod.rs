pub mod fifo;
pub mod round_robin;
pub mod srtf;

use crate::{
    core::state::{ProcessId, SchedCtx, Ticks},
    sim::Algorithm,
};
pub use fifo::FcfsPool;
pub use round_robin::RoundRobinPool;
pub use srtf::SrtfPool;

/// Holds arrived, unfinished processes that are not on the CPU, ordered by
/// the policy's selection rule.
///
/// The engine loop is written once against this trait; each policy only
/// decides ordering and when the running process must give up the CPU.
pub trait ReadyPool {
    fn name(&self) -> &'static str;

    fn algorithm(&self) -> Algorithm;

    fn quantum(&self) -> Option<Ticks> {
        None
    }

    /// A newly arrived process joins the pool.
    fn admit(&mut self, ctx: &SchedCtx, id: ProcessId);

    /// A preempted process rejoins the pool with its current state.
    fn requeue(&mut self, ctx: &SchedCtx, id: ProcessId) {
        self.admit(ctx, id);
    }

    fn peek_best(&self) -> Option<ProcessId>;

    fn pop_best(&mut self) -> Option<ProcessId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked once per tick while `running` holds the CPU, after arrivals
    /// and accounting.
    fn should_preempt(&self, _ctx: &SchedCtx, _running: ProcessId) -> bool {
        false
    }
}
