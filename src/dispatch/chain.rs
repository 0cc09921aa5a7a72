use crate::dispatch::table::MethodTable;
use crate::dispatch::value::Value;
use crate::errors::{invalid_step, PipeResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

lazy_static! {
    static ref METHOD_NAME: Regex =
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*[?!]?|[-+*!])$").expect("Failed to compile method name regex");
}

/// One stage of a pipeline: a method name plus its extra arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub method: String,
    pub args: Vec<Value>,
}

impl Step {
    pub fn new(method: &str, args: Vec<Value>) -> Self {
        Step {
            method: method.to_string(),
            args,
        }
    }
}

/// A textual pipeline such as `upcase | reverse | split [""]`.
///
/// Stages are separated by `|` (outside of string literals). Each stage is a
/// method name, optionally followed by a JSON array of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chain {
    steps: Vec<Step>,
    trace: bool,
}

impl Chain {
    pub fn new(steps: Vec<Step>) -> Self {
        Chain { steps, trace: false }
    }

    /// Logs every intermediate value at info level instead of debug.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Applies every step in order, feeding each result into the next step.
    /// Stops at the first failure.
    pub fn run(&self, table: &MethodTable, input: Value) -> PipeResult<Value> {
        self.steps.iter().enumerate().try_fold(input, |acc, (i, step)| {
            let next = acc.pipe_in(table, &step.method, &step.args)?;
            if self.trace {
                info!("[{}] {} => {}", i + 1, step.method, next);
            } else {
                debug!("[{}] {} => {}", i + 1, step.method, next);
            }
            Ok(next)
        })
    }
}

impl FromStr for Chain {
    type Err = crate::errors::PipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = split_stages(s)?
            .into_iter()
            .map(parse_step)
            .collect::<PipeResult<Vec<_>>>()?;
        Ok(Chain::new(steps))
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", step.method)?;
            if !step.args.is_empty() {
                let args = serde_json::to_string(&step.args).map_err(|_| fmt::Error)?;
                write!(f, " {}", args)?;
            }
        }
        Ok(())
    }
}

// Splits on `|`, skipping separators inside double-quoted strings.
fn split_stages(s: &str) -> PipeResult<Vec<&str>> {
    let mut stages = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '|' if !in_string => {
                stages.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_string {
        return Err(invalid_step("unterminated string literal"));
    }
    stages.push(&s[start..]);
    Ok(stages)
}

fn parse_step(stage: &str) -> PipeResult<Step> {
    let stage = stage.trim();
    if stage.is_empty() {
        return Err(invalid_step("empty stage"));
    }

    let (name, rest) = match stage.find(char::is_whitespace) {
        Some(at) => (&stage[..at], stage[at..].trim()),
        None => (stage, ""),
    };

    if !METHOD_NAME.is_match(name) {
        return Err(invalid_step(&format!("`{}' is not a method name", name)));
    }

    let args = if rest.is_empty() {
        Vec::new()
    } else {
        serde_json::from_str::<Vec<Value>>(rest)?
    };

    Ok(Step::new(name, args))
}
