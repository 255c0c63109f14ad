use anyhow::Error;
use confique::Config;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Config)]
pub struct StatboardConfig {
    /// Base URL for both the statistics API and the dashboard endpoint.
    #[config(env = "STATBOARD_API_URL", default = "http://127.0.0.1:8000")]
    pub api_url: String,

    #[config(env = "STATBOARD_REQUEST_TIMEOUT_SECONDS", default = 30)]
    pub request_timeout_seconds: u64,

    #[config(env = "STATBOARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl StatboardConfig {
    pub fn load() -> Result<StatboardConfig, Error> {
        let c = StatboardConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }
}

static STATBOARD_CONFIG: OnceLock<Arc<StatboardConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<StatboardConfig>, Error> {
    STATBOARD_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if STATBOARD_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = StatboardConfig::load()?;
    STATBOARD_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

static TEST_CONFIG_INIT: Mutex<()> = Mutex::new(());

/// Test-only loader ensuring the configuration is initialized exactly
/// once per test run.
#[allow(dead_code)] // Used by integration tests, not visible in cargo check
pub fn load_configuration_for_tests() -> Result<(), Error> {
    let _guard = TEST_CONFIG_INIT.lock().unwrap();

    if STATBOARD_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = StatboardConfig::load()?;
    STATBOARD_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
