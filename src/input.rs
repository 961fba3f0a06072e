//! Parser for the directive-based process file.
//!
//! ```text
//! processcount 2      # comments run to end of line
//! runfor 15
//! use rr
//! quantum 2
//! process name A arrival 0 burst 5
//! process name B arrival 7 burst 9
//! end
//! ```
//!
//! Only structure is checked here. Semantic rules (positive bursts, unique
//! names, quantum presence) belong to [`RunConfig::validate`].

use std::{error::Error, fmt};

use crate::{
    core::Ticks,
    sim::{Algorithm, ConfigError, ProcessSpec, RunConfig},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingDirective { directive: &'static str },
    MissingValue { line: usize, directive: String },
    InvalidNumber { line: usize, value: String },
    UnknownDirective { line: usize, word: String },
    MalformedProcess { line: usize, reason: String },
    Config(ConfigError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirective { directive } => write!(f, "missing '{directive}' directive"),
            Self::MissingValue { line, directive } => {
                write!(f, "line {line}: '{directive}' needs a value")
            }
            Self::InvalidNumber { line, value } => {
                write!(f, "line {line}: '{value}' is not a non-negative integer")
            }
            Self::UnknownDirective { line, word } => {
                write!(f, "line {line}: unknown directive '{word}'")
            }
            Self::MalformedProcess { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

pub fn parse(text: &str) -> Result<RunConfig, ParseError> {
    let mut process_count = None;
    let mut run_for = None;
    let mut algorithm = None;
    let mut quantum = None;
    let mut processes = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let mut words = content.split_whitespace();
        let Some(directive) = words.next() else {
            continue;
        };

        match directive {
            "processcount" => {
                let count = number(line, directive, words.next())?;
                process_count = Some(count as usize);
            }
            "runfor" => run_for = Some(number(line, directive, words.next())?),
            "quantum" => quantum = Some(number(line, directive, words.next())?),
            "use" => {
                let token = words.next().ok_or_else(|| missing(line, directive))?;
                algorithm = Some(token.parse::<Algorithm>()?);
            }
            "process" => processes.push(process(line, words)?),
            "end" => break,
            word => {
                return Err(ParseError::UnknownDirective {
                    line,
                    word: word.to_owned(),
                });
            }
        }
    }

    let algorithm = algorithm.ok_or(ParseError::MissingDirective { directive: "use" })?;
    Ok(RunConfig {
        process_count: process_count.ok_or(ParseError::MissingDirective {
            directive: "processcount",
        })?,
        run_for: run_for.ok_or(ParseError::MissingDirective { directive: "runfor" })?,
        algorithm,
        quantum,
        processes,
    })
}

// `name <s> arrival <n> burst <n>`, labels in any order
fn process<'a>(
    line: usize,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<ProcessSpec, ParseError> {
    let mut name = None;
    let mut arrival = None;
    let mut burst = None;

    while let Some(label) = words.next() {
        match label {
            "name" => {
                name = Some(words.next().ok_or_else(|| missing(line, label))?.to_owned());
            }
            "arrival" => arrival = Some(number(line, label, words.next())?),
            "burst" => burst = Some(number(line, label, words.next())?),
            other => {
                return Err(ParseError::MalformedProcess {
                    line,
                    reason: format!("unknown process field '{other}'"),
                });
            }
        }
    }

    let field = |what: &str| ParseError::MalformedProcess {
        line,
        reason: format!("process is missing its {what}"),
    };
    Ok(ProcessSpec {
        name: name.ok_or_else(|| field("name"))?,
        arrival: arrival.ok_or_else(|| field("arrival"))?,
        burst: burst.ok_or_else(|| field("burst"))?,
    })
}

fn number(line: usize, directive: &str, value: Option<&str>) -> Result<Ticks, ParseError> {
    let value = value.ok_or_else(|| missing(line, directive))?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.to_owned(),
    })
}

fn missing(line: usize, directive: &str) -> ParseError {
    ParseError::MissingValue {
        line,
        directive: directive.to_owned(),
    }
}
