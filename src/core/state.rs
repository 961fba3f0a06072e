use rustc_hash::FxHashSet;
use slotmap::{SlotMap, new_key_type};

pub type Ticks = u64;
new_key_type! {
    pub struct ProcessId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    // Not yet arrived
    Pending,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    /// Position in the input; last-resort tie-breaker.
    pub seq: usize,
    pub state: ProcessState,
    pub remaining: Ticks,
    /// Ticks consumed since the process was last selected.
    pub slice_used: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Finished
    }
}

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: SlotMap<ProcessId, Process>,
    pub running: Option<ProcessId>,
    pub ready: FxHashSet<ProcessId>,

    // Input order, used for snapshots
    order: Vec<ProcessId>,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            procs: SlotMap::with_key(),
            running: None,
            ready: FxHashSet::default(),
            order: Vec::new(),
        }
    }

    pub fn create_process(&mut self, name: &str, arrival: Ticks, burst: Ticks) -> ProcessId {
        let seq = self.order.len();
        let id = self.procs.insert(Process {
            name: name.to_owned(),
            arrival,
            burst,
            seq,
            state: ProcessState::Pending,
            remaining: burst,
            slice_used: 0,
            start_time: None,
            completion_time: None,
        });
        self.order.push(id);
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        &self.procs[id]
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.procs[id]
    }

    pub fn process_ids(&self) -> &[ProcessId] {
        &self.order
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn mark_ready(&mut self, id: ProcessId) {
        let proc = &mut self.procs[id];
        debug_assert!(
            proc.state == ProcessState::Pending || proc.state == ProcessState::Running,
            "Process {} cannot become ready from {:?}",
            proc.name,
            proc.state
        );
        proc.state = ProcessState::Ready;
        let inserted = self.ready.insert(id);
        debug_assert!(inserted, "Process {} already ready", self.procs[id].name);
    }

    // Returns true the first time this process is given the CPU
    pub fn set_running(&mut self, id: ProcessId) -> bool {
        debug_assert!(self.running.is_none(), "CPU already running a process");
        let removed = self.ready.remove(&id);
        debug_assert!(removed, "Dispatched process must have been ready");

        let now = self.now;
        let proc = &mut self.procs[id];
        proc.state = ProcessState::Running;
        proc.slice_used = 0;
        let first_run = proc.start_time.is_none();
        if first_run {
            proc.start_time = Some(now);
        }
        self.running = Some(id);
        first_run
    }

    pub fn clear_cpu(&mut self) -> Option<ProcessId> {
        self.running.take()
    }

    pub fn mark_finished(&mut self, id: ProcessId, completion_time: Ticks) {
        debug_assert!(
            !self.ready.contains(&id),
            "Finishing process {} that is still ready",
            self.procs[id].name
        );

        let proc = &mut self.procs[id];
        debug_assert_eq!(proc.remaining, 0, "Process {} has work left", proc.name);
        debug_assert!(
            proc.completion_time.is_none(),
            "Process {} finished twice",
            proc.name
        );
        proc.state = ProcessState::Finished;
        proc.completion_time = Some(completion_time);
    }

    /// Clones every process record in input order.
    pub fn snapshot(&self) -> Vec<Process> {
        self.order.iter().map(|&id| self.procs[id].clone()).collect()
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}
