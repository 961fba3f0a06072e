use std::{error::Error, fmt, str::FromStr};

use rustc_hash::FxHashSet;

use crate::core::Ticks;

/// Largest accepted time value. Keeps every metric inside `i64`, even for
/// processes cut off by the horizon.
pub const MAX_TICKS: Ticks = u32::MAX as Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    Srtf,
    RoundRobin,
}

impl Algorithm {
    /// Name used in the report header.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come First-Served",
            Self::Srtf => "preemptive Shortest Job First",
            Self::RoundRobin => "Round-Robin",
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Srtf => "sjf",
            Self::RoundRobin => "rr",
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "srtf" => Ok(Self::Srtf),
            "rr" => Ok(Self::RoundRobin),
            _ => Err(ConfigError::UnknownAlgorithm {
                token: token.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One input process record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
        }
    }
}

/// Everything a run needs. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub process_count: usize,
    pub run_for: Ticks,
    pub algorithm: Algorithm,
    /// Required for, and only for, Round-Robin.
    pub quantum: Option<Ticks>,
    pub processes: Vec<ProcessSpec>,
}

impl RunConfig {
    pub fn new(algorithm: Algorithm, run_for: Ticks, processes: Vec<ProcessSpec>) -> Self {
        Self {
            process_count: processes.len(),
            run_for,
            algorithm,
            quantum: None,
            processes,
        }
    }

    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Rejects configurations the engine cannot run. Reports the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_for == 0 {
            return Err(ConfigError::NonPositiveRunFor);
        }
        check_range("runfor", self.run_for)?;
        if let Some(quantum) = self.quantum {
            check_range("quantum", quantum)?;
        }

        match (self.algorithm, self.quantum) {
            (Algorithm::RoundRobin, None) => return Err(ConfigError::MissingQuantum),
            (Algorithm::RoundRobin, Some(0)) => return Err(ConfigError::NonPositiveQuantum),
            (Algorithm::RoundRobin, Some(_)) | (_, None) => {}
            (algorithm, Some(_)) => return Err(ConfigError::UnexpectedQuantum { algorithm }),
        }

        if self.process_count != self.processes.len() {
            return Err(ConfigError::ProcessCountMismatch {
                declared: self.process_count,
                actual: self.processes.len(),
            });
        }

        let mut names = FxHashSet::default();
        for proc in &self.processes {
            if proc.burst == 0 {
                return Err(ConfigError::NonPositiveBurst {
                    name: proc.name.clone(),
                });
            }
            check_range("arrival", proc.arrival)?;
            check_range("burst", proc.burst)?;
            if !names.insert(proc.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: proc.name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: Ticks) -> Result<(), ConfigError> {
    if value > MAX_TICKS {
        return Err(ConfigError::ValueTooLarge { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveRunFor,
    NonPositiveBurst { name: String },
    MissingQuantum,
    NonPositiveQuantum,
    UnexpectedQuantum { algorithm: Algorithm },
    DuplicateName { name: String },
    UnknownAlgorithm { token: String },
    ProcessCountMismatch { declared: usize, actual: usize },
    ValueTooLarge { field: &'static str, value: Ticks },
    /// The pool handed to a `Sim` runs a different policy than configured.
    PoolMismatch { configured: Algorithm, pool: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveRunFor => write!(f, "run length must be positive"),
            Self::NonPositiveBurst { name } => {
                write!(f, "process '{name}' must have a positive burst")
            }
            Self::MissingQuantum => write!(f, "Round-Robin requires a quantum"),
            Self::NonPositiveQuantum => write!(f, "quantum must be positive"),
            Self::UnexpectedQuantum { algorithm } => {
                write!(f, "quantum given for non Round-Robin algorithm '{algorithm}'")
            }
            Self::DuplicateName { name } => write!(f, "duplicate process name '{name}'"),
            Self::UnknownAlgorithm { token } => write!(f, "unknown algorithm '{token}'"),
            Self::ProcessCountMismatch { declared, actual } => write!(
                f,
                "process count declared as {declared} but {actual} processes given"
            ),
            Self::ValueTooLarge { field, value } => {
                write!(f, "{field} {value} exceeds the limit of {MAX_TICKS}")
            }
            Self::PoolMismatch { configured, pool } => {
                write!(f, "configured for '{configured}' but given a '{pool}' pool")
            }
        }
    }
}

impl Error for ConfigError {}
