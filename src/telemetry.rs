use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs the global fmt subscriber. JSON lines when `config.json` is set.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(&config.filter)?;

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}
