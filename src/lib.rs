use crate::config::AppConfig;
use crate::dispatch::{Value, STANDARD};
use anyhow::Result;
use tracing::debug;

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod util;

pub use dispatch::TryPipe;
pub use errors::{PipeError, PipeResult};
pub use util::fp::{Invoke, Pipe, Piped};

/// Runs the configured chain against the configured input.
pub fn run(config: &AppConfig) -> Result<Value> {
    let chain = config.validate_config()?;
    let input = config.input_value();
    debug!("Piping {} through `{}`", input, chain);

    let result = crate::timeit!("Pipeline", chain.run(&STANDARD, input))?;
    Ok(result)
}
