pub mod core;
pub mod input;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{EventKind, TimelineEvent};
pub use scheduler::ReadyPool;
pub use sim::{Algorithm, ConfigError, Metrics, ProcessSpec, RunConfig, Sim, SimOutcome, simulate};
