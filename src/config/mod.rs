use crate::dispatch::{Chain, Value};
use crate::util::env::{get_bool_from_env_or, get_env_or, load_dotenv};
use anyhow::{Context, Result};

pub const DEFAULT_INPUT: &str = "Metova";
pub const DEFAULT_CHAIN: &str = r#"upcase | reverse | split [""]"#;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Basic app info
    pub app_name: String,
    pub app_version: String,

    // What the binary pipes, and through which stages
    pub input: String,
    pub chain: String,

    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub trace_steps: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        let app_name = get_env_or("APP_NAME", "pipes".to_string())?;
        let app_version = get_env_or("APP_VERSION", env!("CARGO_PKG_VERSION").to_string())?;

        let input = get_env_or("PIPES_INPUT", DEFAULT_INPUT.to_string())?;
        let chain = get_env_or("PIPES_CHAIN", DEFAULT_CHAIN.to_string())?;

        Ok(AppConfig {
            app_name,
            app_version,
            input,
            chain,
            log: LogConfig::from_env()?,
        })
    }

    /// Checks that the configured chain parses, returning it.
    pub fn validate_config(&self) -> Result<Chain> {
        let chain = self
            .chain
            .parse::<Chain>()
            .with_context(|| format!("Invalid PIPES_CHAIN `{}`", self.chain))?;
        Ok(chain.with_trace(self.log.trace_steps))
    }

    /// The receiver to pipe: JSON when the input is valid JSON, a plain string otherwise.
    pub fn input_value(&self) -> Value {
        parse_input(&self.input)
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        let trace_steps = get_bool_from_env_or("PIPES_TRACE_STEPS", false)?;

        Ok(LogConfig { trace_steps })
    }
}

fn parse_input(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|_| Value::from(input))
}
