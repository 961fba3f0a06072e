//! Per-process wait, turnaround and response times.
//!
//! A process cut off by the end of the run is charged up to the horizon:
//! its turnaround is `run_for - arrival` and its wait follows from that.
//! Both are signed, since a process that arrives late in the run with a
//! long burst ends up with a negative wait under that rule. Validation caps
//! every time at `MAX_TICKS`, so the signed arithmetic below cannot wrap.

use average::{Estimate, Mean};
use rustc_hash::FxHashMap;

use super::driver::SimOutcome;
use crate::core::{EventKind, Process, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub name: String,
    pub wait: i64,
    pub turnaround: i64,
    /// `None` if the process never got the CPU.
    pub response: Option<Ticks>,
    pub completed: bool,
}

impl ProcessMetrics {
    pub fn of(proc: &Process, run_for: Ticks) -> Self {
        let end = proc.completion_time.unwrap_or(run_for);
        let turnaround = end as i64 - proc.arrival as i64;
        Self {
            name: proc.name.clone(),
            wait: turnaround - proc.burst as i64,
            turnaround,
            response: proc.start_time.map(|start| start - proc.arrival),
            completed: proc.completion_time.is_some(),
        }
    }

    /// Response time with `-1` standing in for "never ran".
    pub fn response_or_sentinel(&self) -> i64 {
        self.response.map_or(-1, |r| r as i64)
    }
}

/// Run-wide averages.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mean_wait: f64,
    pub mean_turnaround: f64,
    /// Over processes that started; `None` if none did.
    pub mean_response: Option<f64>,
    pub completed: usize,
    pub total: usize,
    pub idle_ticks: usize,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    entries: Vec<ProcessMetrics>,
    by_name: FxHashMap<String, usize>,
    idle_ticks: usize,
}

impl Metrics {
    pub fn compute(outcome: &SimOutcome) -> Self {
        let entries: Vec<_> = outcome
            .processes
            .iter()
            .map(|p| ProcessMetrics::of(p, outcome.run_for))
            .collect();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();
        let idle_ticks = outcome
            .timeline
            .iter()
            .filter(|e| e.kind == EventKind::Idle)
            .count();

        Self {
            entries,
            by_name,
            idle_ticks,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProcessMetrics> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessMetrics> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        let responses: Vec<f64> = self
            .entries
            .iter()
            .filter_map(|m| m.response)
            .map(|r| r as f64)
            .collect();

        RunSummary {
            mean_wait: avg(self.entries.iter().map(|m| m.wait as f64)),
            mean_turnaround: avg(self.entries.iter().map(|m| m.turnaround as f64)),
            mean_response: (!responses.is_empty()).then(|| avg(responses.into_iter())),
            completed: self.entries.iter().filter(|m| m.completed).count(),
            total: self.entries.len(),
            idle_ticks: self.idle_ticks,
        }
    }
}

pub fn compute(outcome: &SimOutcome) -> Metrics {
    Metrics::compute(outcome)
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
