use rustc_hash::FxHashMap;
use schedsim::{
    Algorithm, EventKind, Metrics, ProcessSpec, RunConfig, Sim, SimOutcome,
    scheduler::{ReadyPool, RoundRobinPool, SrtfPool},
    sim::workload::bernoulli_processes,
    simulate,
};

const SEEDS: u64 = 25;
const RUN_FOR: u64 = 60;

fn workload(seed: u64) -> Vec<ProcessSpec> {
    bernoulli_processes(40, 0.3, 0.4, 1, 7, seed)
}

fn config(algorithm: Algorithm, seed: u64) -> RunConfig {
    let config = RunConfig::new(algorithm, RUN_FOR, workload(seed));
    match algorithm {
        Algorithm::RoundRobin => config.with_quantum(1 + seed % 4),
        _ => config,
    }
}

fn all_outcomes() -> impl Iterator<Item = SimOutcome> {
    [Algorithm::Fcfs, Algorithm::Srtf, Algorithm::RoundRobin]
        .into_iter()
        .flat_map(|algorithm| (0..SEEDS).map(move |seed| config(algorithm, seed)))
        .map(|config| simulate(&config).unwrap())
}

fn names_of(outcome: &SimOutcome, kind: EventKind) -> Vec<String> {
    outcome
        .timeline
        .iter()
        .filter(|e| e.kind == kind)
        .filter_map(|e| e.process.clone())
        .collect()
}

#[test]
fn test_each_process_finishes_at_most_once() {
    for outcome in all_outcomes() {
        let mut finished: FxHashMap<String, usize> = FxHashMap::default();
        for name in names_of(&outcome, EventKind::Finished) {
            *finished.entry(name).or_default() += 1;
        }
        assert!(finished.values().all(|&n| n == 1));
        assert!(finished.len() <= outcome.processes.len());
        assert_eq!(finished.len(), outcome.finished_count());
    }
}

#[test]
fn test_wait_plus_burst_is_turnaround() {
    for outcome in all_outcomes() {
        let metrics = Metrics::compute(&outcome);
        for (proc, m) in outcome.processes.iter().zip(metrics.iter()) {
            assert_eq!(proc.name, m.name);
            assert_eq!(m.wait + proc.burst as i64, m.turnaround);
            if let Some(done) = proc.completion_time {
                assert_eq!(m.turnaround, (done - proc.arrival) as i64);
                assert!(m.wait >= 0);
            }
        }
    }
}

#[test]
fn test_timeline_is_time_ordered_with_one_cpu_state_per_tick() {
    for outcome in all_outcomes() {
        assert!(outcome.timeline.windows(2).all(|w| w[0].time <= w[1].time));

        // Every tick either selects, keeps running, or idles, never both
        for event in outcome
            .timeline
            .iter()
            .filter(|e| e.kind == EventKind::Idle)
        {
            assert!(
                !outcome
                    .timeline
                    .iter()
                    .any(|e| e.time == event.time && e.kind == EventKind::Selected)
            );
        }
    }
}

#[test]
fn test_fcfs_never_preempts_and_selects_in_arrival_order() {
    for seed in 0..SEEDS {
        let outcome = simulate(&config(Algorithm::Fcfs, seed)).unwrap();
        assert!(names_of(&outcome, EventKind::Preempted).is_empty());

        // Stable sort keeps input position as the tie-break
        let mut by_arrival = workload(seed);
        by_arrival.sort_by_key(|p| p.arrival);
        let by_arrival: Vec<String> = by_arrival.into_iter().map(|p| p.name).collect();

        let selected = names_of(&outcome, EventKind::Selected);
        assert!(by_arrival.starts_with(&selected), "seed {seed}");

        let finished = names_of(&outcome, EventKind::Finished);
        assert!(selected.starts_with(&finished));
        assert!(selected.len() <= finished.len() + 1);
    }
}

#[test]
fn test_srtf_runs_the_shortest_remaining() {
    for seed in 0..SEEDS {
        let mut sim = Sim::new(&config(Algorithm::Srtf, seed), SrtfPool::new()).unwrap();
        while !sim.is_done() {
            sim.step();
            let ctx = &sim.core.ctx;
            let Some(running) = ctx.running else {
                assert!(sim.core.pool.is_empty());
                continue;
            };
            let running = ctx.process(running).remaining;
            assert!(
                ctx.ready
                    .iter()
                    .all(|&id| ctx.process(id).remaining >= running),
                "seed {seed} t={}",
                ctx.now
            );
        }
    }
}

#[test]
fn test_round_robin_respects_quantum() {
    for seed in 0..SEEDS {
        let quantum = 1 + seed % 4;
        let config = config(Algorithm::RoundRobin, seed);
        let mut sim = Sim::new(&config, RoundRobinPool::new(quantum)).unwrap();
        while !sim.is_done() {
            sim.step();
            if let Some(running) = sim.core.ctx.running {
                assert!(sim.core.ctx.process(running).slice_used < quantum);
            }
        }

        let outcome = simulate(&config).unwrap();
        let mut since: FxHashMap<&str, u64> = FxHashMap::default();
        for event in &outcome.timeline {
            let Some(name) = event.process.as_deref() else {
                continue;
            };
            match event.kind {
                EventKind::Selected => {
                    since.insert(name, event.time);
                }
                EventKind::Preempted | EventKind::Finished => {
                    let start = since.remove(name).unwrap();
                    assert!(event.time - start <= quantum);
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_same_config_same_result() {
    for algorithm in [Algorithm::Fcfs, Algorithm::Srtf, Algorithm::RoundRobin] {
        let config = config(algorithm, 3);
        let first = simulate(&config).unwrap();
        let second = simulate(&config).unwrap();
        assert_eq!(first, second);

        let (a, b) = (Metrics::compute(&first), Metrics::compute(&second));
        assert!(a.iter().eq(b.iter()));
        assert_eq!(a.summary(), b.summary());
    }
}
