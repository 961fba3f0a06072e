use rand::prelude::*;

use super::config::ProcessSpec;
use crate::core::Ticks;

/// Synthetic process set: on each of `ticks` ticks a process arrives with
/// probability `p_arrival`; it is short with probability `p_short`.
/// Names are `P01`, `P02`, ... in arrival order.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut procs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            procs.push(ProcessSpec::new(
                format!("P{:02}", procs.len() + 1),
                t,
                burst,
            ));
        }
    }

    procs
}
