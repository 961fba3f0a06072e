use crate::core::Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Arrived,
    Selected,
    Preempted,
    Finished,
    // CPU idle even after selection
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    pub time: Ticks,
    pub kind: EventKind,
    pub process: Option<String>,
    /// Remaining burst when the process was selected.
    pub burst: Option<Ticks>,
}

impl TimelineEvent {
    pub fn arrived(time: Ticks, process: &str) -> Self {
        Self::with_process(time, EventKind::Arrived, process)
    }

    pub fn selected(time: Ticks, process: &str, remaining: Ticks) -> Self {
        Self {
            burst: Some(remaining),
            ..Self::with_process(time, EventKind::Selected, process)
        }
    }

    pub fn preempted(time: Ticks, process: &str) -> Self {
        Self::with_process(time, EventKind::Preempted, process)
    }

    pub fn finished(time: Ticks, process: &str) -> Self {
        Self::with_process(time, EventKind::Finished, process)
    }

    pub fn idle(time: Ticks) -> Self {
        Self {
            time,
            kind: EventKind::Idle,
            process: None,
            burst: None,
        }
    }

    fn with_process(time: Ticks, kind: EventKind, process: &str) -> Self {
        Self {
            time,
            kind,
            process: Some(process.to_owned()),
            burst: None,
        }
    }

    pub fn is(&self, kind: EventKind, process: &str) -> bool {
        self.kind == kind && self.process.as_deref() == Some(process)
    }
}
