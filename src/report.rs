//! Text report in the classic scheduler-assignment layout.
//!
//! `Preempted` events stay in the timeline but have no report line.

use std::fmt::{self, Write};

use crate::{
    core::{EventKind, TimelineEvent},
    sim::{Algorithm, Metrics, SimOutcome},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Append run-wide averages after the per-process lines.
    pub stats: bool,
}

/// A formatted run report. Use `to_string()` or write it straight to a
/// formatter.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub outcome: &'a SimOutcome,
    pub metrics: &'a Metrics,
    pub opts: ReportOptions,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.outcome, self.metrics, self.opts)
    }
}

pub fn render(outcome: &SimOutcome, metrics: &Metrics, opts: ReportOptions) -> String {
    Report {
        outcome,
        metrics,
        opts,
    }
    .to_string()
}

pub fn write_report(
    out: &mut impl Write,
    outcome: &SimOutcome,
    metrics: &Metrics,
    opts: ReportOptions,
) -> fmt::Result {
    writeln!(out, "{} processes", outcome.processes.len())?;
    writeln!(out, "Using {}", outcome.algorithm.display_name())?;
    if let (Algorithm::RoundRobin, Some(quantum)) = (outcome.algorithm, outcome.quantum) {
        writeln!(out, "Quantum {quantum:>3}")?;
        writeln!(out)?;
    }

    for event in &outcome.timeline {
        if let Some(line) = event_line(event) {
            writeln!(out, "{line}")?;
        }
    }
    writeln!(out, "Finished at time {:>3}", outcome.run_for)?;
    writeln!(out)?;

    for m in metrics.iter() {
        writeln!(
            out,
            "{} wait {:>3} turnaround {:>3} response {:>3}",
            m.name,
            m.wait,
            m.turnaround,
            m.response_or_sentinel()
        )?;
    }
    for m in metrics.iter().filter(|m| !m.completed) {
        writeln!(out, "{} did not finish", m.name)?;
    }

    if opts.stats && !metrics.is_empty() {
        let summary = metrics.summary();
        writeln!(out)?;
        writeln!(out, "Average wait {:.2}", summary.mean_wait)?;
        writeln!(out, "Average turnaround {:.2}", summary.mean_turnaround)?;
        match summary.mean_response {
            Some(response) => writeln!(out, "Average response {response:.2}")?,
            None => writeln!(out, "Average response n/a")?,
        }
        writeln!(
            out,
            "Completed {}/{}, idle {} ticks",
            summary.completed, summary.total, summary.idle_ticks
        )?;
    }

    Ok(())
}

pub fn event_line(event: &TimelineEvent) -> Option<String> {
    let name = event.process.as_deref().unwrap_or_default();
    let what = match event.kind {
        EventKind::Arrived => format!("{name} arrived"),
        EventKind::Selected => {
            format!("{name} selected (burst {:>3})", event.burst.unwrap_or_default())
        }
        EventKind::Finished => format!("{name} finished"),
        EventKind::Idle => "Idle".to_owned(),
        EventKind::Preempted => return None,
    };
    Some(format!("Time {:>4} : {what}", event.time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ProcessSpec, RunConfig, simulate};

    #[test]
    fn test_fcfs_report() {
        let config = RunConfig::new(
            Algorithm::Fcfs,
            10,
            vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)],
        );
        let outcome = simulate(&config).unwrap();
        let report = render(&outcome, &Metrics::compute(&outcome), ReportOptions::default());

        let expected = "\
2 processes
Using First-Come First-Served
Time    0 : P1 arrived
Time    0 : P1 selected (burst   5)
Time    1 : P2 arrived
Time    5 : P1 finished
Time    5 : P2 selected (burst   3)
Time    8 : P2 finished
Time    8 : Idle
Time    9 : Idle
Finished at time  10

P1 wait   0 turnaround   5 response   0
P2 wait   4 turnaround   7 response   4
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_round_robin_header_and_unfinished() {
        let config = RunConfig::new(Algorithm::RoundRobin, 3, vec![ProcessSpec::new("A", 0, 5)])
            .with_quantum(2);
        let outcome = simulate(&config).unwrap();
        let report = render(&outcome, &Metrics::compute(&outcome), ReportOptions { stats: true });

        assert!(report.starts_with("1 processes\nUsing Round-Robin\nQuantum   2\n\n"));
        assert!(report.contains("A wait  -2 turnaround   3 response   0\n"));
        assert!(report.contains("A did not finish\n"));
        assert!(report.contains("Completed 0/1, idle 0 ticks\n"));
        assert!(!report.contains("preempted"));
    }

    #[test]
    fn test_report_writes_into_any_formatter() {
        let config = RunConfig::new(Algorithm::Srtf, 4, vec![ProcessSpec::new("A", 1, 2)]);
        let outcome = simulate(&config).unwrap();
        let metrics = Metrics::compute(&outcome);
        let opts = ReportOptions { stats: true };

        let report = Report {
            outcome: &outcome,
            metrics: &metrics,
            opts,
        };
        let mut padded = String::from("> ");
        write!(padded, "{report}").unwrap();

        assert_eq!(padded, format!("> {}", render(&outcome, &metrics, opts)));
        assert!(padded.ends_with("Completed 1/1, idle 2 ticks\n"));
    }

    #[test]
    fn test_event_lines() {
        assert_eq!(
            event_line(&TimelineEvent::selected(12, "P03", 7)).as_deref(),
            Some("Time   12 : P03 selected (burst   7)")
        );
        assert_eq!(
            event_line(&TimelineEvent::idle(3)).as_deref(),
            Some("Time    3 : Idle")
        );
        assert_eq!(event_line(&TimelineEvent::preempted(3, "A")), None);
    }
}
