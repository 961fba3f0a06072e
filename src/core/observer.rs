use super::state::{ProcessState, SchedCtx};

/// Checks engine bookkeeping after every tick. All checks are debug-only.
#[derive(Debug, Default)]
pub struct Observer {
    steps: u64,
    finished: usize,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn observe(&mut self, ctx: &SchedCtx, pool_len: usize) {
        debug_assert_eq!(self.steps, ctx.now, "Clock skipped or rewound a tick");
        self.steps += 1;

        if let Some(id) = ctx.running {
            let proc = ctx.process(id);
            debug_assert_eq!(
                proc.state,
                ProcessState::Running,
                "running process {} must be Running",
                proc.name
            );
            debug_assert!(
                !ctx.ready.contains(&id),
                "Running process {} must not be ready",
                proc.name
            );
            debug_assert!(proc.start_time.is_some(), "{} running without start", proc.name);
        }

        debug_assert_eq!(
            ctx.ready.len(),
            pool_len,
            "Ready set and pool disagree on membership"
        );

        let mut finished = 0;
        for (id, proc) in ctx.procs.iter() {
            match proc.state {
                ProcessState::Finished => {
                    finished += 1;
                    debug_assert_eq!(proc.remaining, 0, "Finished {} has work left", proc.name);
                    debug_assert!(
                        proc.completion_time.is_some(),
                        "Finished {} has no completion time",
                        proc.name
                    );
                }
                ProcessState::Ready => debug_assert!(
                    ctx.ready.contains(&id),
                    "Ready {} missing from ready set",
                    proc.name
                ),
                ProcessState::Pending => debug_assert!(
                    proc.arrival > ctx.now,
                    "{} should have arrived at {}",
                    proc.name,
                    proc.arrival
                ),
                ProcessState::Running => {}
            }
        }

        debug_assert!(finished >= self.finished, "A finished process came back");
        self.finished = finished;
    }
}
