pub mod config;
pub mod driver;
pub mod metrics;
pub mod workload;

pub use config::{Algorithm, ConfigError, ProcessSpec, RunConfig};
pub use driver::{Sim, SimOutcome, simulate};
pub use metrics::{Metrics, ProcessMetrics, RunSummary};
