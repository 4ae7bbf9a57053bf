use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const BOOTSTRAP_FILTER: &str = "info";

pub struct LogConfig {
    pub filter: String,
}

pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

impl Logger {
    /// Install the global subscriber. `RUST_LOG`, when set, wins over the
    /// bootstrap filter and over later reloads.
    pub fn new_bootstrap() -> Self {
        let env_filter = EnvFilter::try_from_default_env().ok();
        let env_override = env_filter.is_some();
        let filter = env_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_FILTER));
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();

        Self {
            reload_handle,
            env_override,
        }
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        if self.env_override {
            return Ok(());
        }
        let filter = EnvFilter::try_new(&config.filter).map_err(|e| anyhow!(e))?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}
