//! Application configuration from environment variables

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Symbol appended to displayed prices (`CURRENCY_SYMBOL`)
    pub currency_symbol: String,
    /// How long an untouched booking flow stays open (`FLOW_IDLE_MINUTES`)
    pub flow_idle: Duration,
    /// Upper bound on concurrently open flows (`MAX_OPEN_FLOWS`)
    pub max_open_flows: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            currency_symbol: "€".to_string(),
            flow_idle: Duration::from_secs(30 * 60),
            max_open_flows: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset or malformed values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, "BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(symbol) = lookup("CURRENCY_SYMBOL").filter(|s| !s.trim().is_empty()) {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(minutes) = parse_var::<u64, _>(&lookup, "FLOW_IDLE_MINUTES") {
            if minutes > 0 {
                config.flow_idle = Duration::from_secs(minutes * 60);
            } else {
                warn!("FLOW_IDLE_MINUTES must be positive, keeping default");
            }
        }

        if let Some(max) = parse_var(&lookup, "MAX_OPEN_FLOWS") {
            config.max_open_flows = max;
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring malformed {}={:?}", key, raw);
            None
        }
    }
}
