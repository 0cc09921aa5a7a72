// Scenario tests live on /src/tests and reach the library through its public
// API, the same way the binary does.
#[cfg(test)]
mod tests;

use anyhow::Result;
use pipes::config::AppConfig;
use pipes::util::env::load_dotenv;
use std::process;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    debug!("Config:\n {:#?}", config);

    match pipes::run(&config) {
        Ok(result) => {
            println!("{}", result);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{} {} failed: {:#}", config.app_name, config.app_version, e);
            process::exit(1);
        }
    }
}
