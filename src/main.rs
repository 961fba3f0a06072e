use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::info;
use schedsim::{
    Metrics, input,
    report::{self, ReportOptions},
    simulate,
};

/// Replays a process file through FCFS, SRTF or Round-Robin and writes the
/// tick-by-tick report.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Process file to simulate
    input: PathBuf,

    /// Print the report instead of writing it next to the input
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Where to write the report (default: input with an .out extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append average wait, turnaround and response times
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let config =
        input::parse(&text).with_context(|| format!("invalid input {}", cli.input.display()))?;
    let outcome = simulate(&config).context("invalid run configuration")?;

    let metrics = Metrics::compute(&outcome);
    let rendered = report::render(&outcome, &metrics, ReportOptions { stats: cli.stats });

    if cli.stdout {
        print!("{rendered}");
        return Ok(());
    }

    let path = cli.output.unwrap_or_else(|| sibling_output(&cli.input));
    fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    info!("report written to {}", path.display());
    Ok(())
}

// `foo.in` -> `foo.out`; anything else gets `.out` appended
fn sibling_output(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "in") {
        input.with_extension("out")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}
