use log::info;

use super::config::{Algorithm, ConfigError, RunConfig};
use crate::{
    core::{
        driver::SchedCore,
        event::TimelineEvent,
        state::{Process, ProcessId, SchedCtx, Ticks},
    },
    scheduler::{FcfsPool, ReadyPool, RoundRobinPool, SrtfPool},
};

/// Frozen result of one run: the event timeline and every process record
/// in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOutcome {
    pub algorithm: Algorithm,
    pub quantum: Option<Ticks>,
    pub run_for: Ticks,
    pub timeline: Vec<TimelineEvent>,
    pub processes: Vec<Process>,
}

impl SimOutcome {
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    pub fn finished_count(&self) -> usize {
        self.processes.iter().filter(|p| p.is_finished()).count()
    }
}

pub struct Sim<P: ReadyPool> {
    pub core: SchedCore<P>,
    algorithm: Algorithm,
    quantum: Option<Ticks>,
    run_for: Ticks,
    // Sorted by (arrival, input position)
    arrivals: Vec<ProcessId>,
    arrival_cursor: usize,
}

impl<P: ReadyPool> Sim<P> {
    /// Validates `config` and checks that `pool` runs the configured policy
    /// before building the process table.
    pub fn new(config: &RunConfig, pool: P) -> Result<Self, ConfigError> {
        config.validate()?;
        if pool.algorithm() != config.algorithm || pool.quantum() != config.quantum {
            return Err(ConfigError::PoolMismatch {
                configured: config.algorithm,
                pool: pool.name(),
            });
        }

        let mut ctx = SchedCtx::new();
        let mut arrivals: Vec<ProcessId> = config
            .processes
            .iter()
            .map(|p| ctx.create_process(&p.name, p.arrival, p.burst))
            .collect();
        arrivals.sort_by_key(|&id| {
            let proc = ctx.process(id);
            (proc.arrival, proc.seq)
        });

        Ok(Self {
            core: SchedCore::new(ctx, pool),
            algorithm: config.algorithm,
            quantum: config.quantum,
            run_for: config.run_for,
            arrivals,
            arrival_cursor: 0,
        })
    }

    /// Admits this tick's arrivals, then runs the tick. Returns the process
    /// that finished, if any.
    pub fn step(&mut self) -> Option<ProcessId> {
        self.handle_arrivals();
        self.core.tick()
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        while let Some(&id) = self.arrivals.get(self.arrival_cursor) {
            // Contiguous, since arrivals are sorted
            if self.core.ctx.process(id).arrival != now {
                break;
            }
            self.core.admit(id);
            self.arrival_cursor += 1;
        }
    }

    pub fn is_done(&self) -> bool {
        self.core.now() >= self.run_for
    }

    pub fn all_finished(&self) -> bool {
        self.core.active_count() == 0
    }

    /// Steps until the horizon. Unfinished processes are left as they are.
    pub fn run(mut self) -> SimOutcome {
        while !self.is_done() {
            self.step();
        }

        let unfinished = self.core.active_count();
        let (algorithm, quantum, run_for) = (self.algorithm, self.quantum, self.run_for);
        let (ctx, timeline) = self.core.into_parts();
        info!(
            "{algorithm} finished at {run_for}: {} events, {unfinished} processes cut off",
            timeline.len()
        );

        SimOutcome {
            algorithm,
            quantum,
            run_for,
            timeline,
            processes: ctx.snapshot(),
        }
    }
}

/// Validates `config` and replays it with the selected policy.
pub fn simulate(config: &RunConfig) -> Result<SimOutcome, ConfigError> {
    config.validate()?;
    info!(
        "simulating {} processes with {} for {} ticks",
        config.process_count, config.algorithm, config.run_for
    );

    let outcome = match (config.algorithm, config.quantum) {
        (Algorithm::Fcfs, _) => Sim::new(config, FcfsPool::new())?.run(),
        (Algorithm::Srtf, _) => Sim::new(config, SrtfPool::new())?.run(),
        (Algorithm::RoundRobin, Some(quantum)) => {
            Sim::new(config, RoundRobinPool::new(quantum))?.run()
        }
        (Algorithm::RoundRobin, None) => return Err(ConfigError::MissingQuantum),
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::EventKind, sim::ProcessSpec};

    #[test]
    fn test_simultaneous_arrivals_keep_input_order() {
        let config = RunConfig::new(
            Algorithm::Fcfs,
            3,
            vec![
                ProcessSpec::new("late", 1, 1),
                ProcessSpec::new("B", 0, 2),
                ProcessSpec::new("A", 0, 2),
            ],
        );
        let outcome = simulate(&config).unwrap();
        let arrived: Vec<_> = outcome
            .timeline
            .iter()
            .filter(|e| e.kind == EventKind::Arrived)
            .map(|e| (e.time, e.process.clone().unwrap()))
            .collect();
        assert_eq!(
            arrived,
            [(0, "B".into()), (0, "A".into()), (1, "late".into())]
        );
        assert_eq!(outcome.timeline[2], TimelineEvent::selected(0, "B", 2));
    }

    #[test]
    fn test_invalid_config_never_runs() {
        let config = RunConfig::new(Algorithm::RoundRobin, 5, vec![ProcessSpec::new("A", 0, 1)]);
        assert_eq!(simulate(&config), Err(ConfigError::MissingQuantum));
    }

    #[test]
    fn test_step_reports_completion() {
        let config = RunConfig::new(Algorithm::Fcfs, 4, vec![ProcessSpec::new("A", 0, 1)]);
        let mut sim = Sim::new(&config, FcfsPool::new()).unwrap();
        assert_eq!(sim.step(), None);
        assert!(!sim.all_finished());
        assert!(sim.step().is_some());
        assert!(sim.all_finished());
        assert!(!sim.is_done());
    }

    #[test]
    fn test_sim_rejects_invalid_config_before_running() {
        let zero_burst = RunConfig::new(Algorithm::Fcfs, 3, vec![ProcessSpec::new("A", 0, 0)]);
        assert_eq!(
            Sim::new(&zero_burst, FcfsPool::new()).err(),
            Some(ConfigError::NonPositiveBurst { name: "A".into() })
        );
    }

    #[test]
    fn test_sim_rejects_pool_for_another_policy() {
        let fcfs = RunConfig::new(Algorithm::Fcfs, 3, vec![ProcessSpec::new("A", 0, 2)]);
        assert_eq!(
            Sim::new(&fcfs, RoundRobinPool::new(2)).err(),
            Some(ConfigError::PoolMismatch {
                configured: Algorithm::Fcfs,
                pool: "rr"
            })
        );

        let rr = RunConfig::new(Algorithm::RoundRobin, 3, vec![ProcessSpec::new("A", 0, 2)])
            .with_quantum(2);
        assert!(Sim::new(&rr, RoundRobinPool::new(3)).is_err());

        let outcome = Sim::new(&rr, RoundRobinPool::new(2)).unwrap().run();
        assert_eq!(outcome.algorithm, Algorithm::RoundRobin);
        assert_eq!(outcome.quantum, Some(2));
    }

    #[test]
    fn test_arrivals_after_horizon_stay_pending() {
        let config = RunConfig::new(Algorithm::Srtf, 2, vec![ProcessSpec::new("A", 5, 1)]);
        let outcome = simulate(&config).unwrap();
        assert_eq!(
            outcome.timeline,
            [TimelineEvent::idle(0), TimelineEvent::idle(1)]
        );
        let a = outcome.process("A").unwrap();
        assert_eq!(a.start_time, None);
        assert_eq!(a.completion_time, None);
        assert_eq!(outcome.finished_count(), 0);
    }
}
