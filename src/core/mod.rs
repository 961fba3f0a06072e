pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{EventKind, TimelineEvent};
pub use state::{Process, ProcessId, ProcessState, SchedCtx, Ticks};
