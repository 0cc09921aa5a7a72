use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

// Set once the `.env` files have been read; later calls are no-ops.
static LOAD_ENV: OnceLock<()> = OnceLock::new();

/// Makes `PIPES_INPUT`, `PIPES_CHAIN`, `PIPES_TRACE_STEPS` and `RUST_LOG`
/// settable from dotenv files as well as the process environment.
///
/// Files are read in this order, and none of them overrides a variable that
/// is already set:
/// 1. `.env`
/// 2. `.env.dev` in debug builds, `.env.prod` in release builds
/// 3. `.env.local`
pub fn load_dotenv() {
    LOAD_ENV.get_or_init(|| {
        dotenv().ok();

        let debug = cfg!(debug_assertions);
        let env_file = if debug { ".env.dev" } else { ".env.prod" };

        if Path::new(env_file).exists() {
            dotenvy::from_filename(env_file).ok();
        }

        if Path::new(".env.local").exists() {
            dotenvy::from_filename(".env.local").ok();
        }
    });
}

/// Reads a `PIPES_*` setting and parses it into `T`, falling back to `default`
/// when unset. A value that does not parse is an error naming the variable.
pub fn get_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!(format!("Failed to parse {} env var", key))),
        Err(_) => Ok(default),
    }
}

/// Reads an on/off switch such as `PIPES_TRACE_STEPS`.
/// Accepts `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, case-insensitively.
pub fn get_bool_from_env_or(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(value) => parse_bool(&value)
            .ok_or_else(|| anyhow!(format!("Failed to parse {} env var as `bool`", key))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Measures and logs the execution time of an expression.
///
/// Logs the elapsed time using `tracing::debug!`.
///
/// # Usage
/// - `timeit!({ /* code */ })`
/// - `timeit!("Task", { /* code */ })`
#[macro_export]
macro_rules! timeit {
    ($expr:expr) => {
        $crate::timeit!("Time elapsed", $expr)
    };

    ($prefix:expr, $expr:expr) => {{
        let start = std::time::Instant::now();
        let result = $expr;
        let duration = start.elapsed();
        tracing::debug!("{}: {:?}", $prefix, duration);
        result
    }};
}
