use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use nbc_fx_core::constants::{
    DEFAULT_CACHE_SWEEP_INTERVAL, DEFAULT_CACHE_TTL, SOURCE_URL_ENV_VAR,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    /// URL of the NBC rate page. Checked on every request, not at startup.
    pub source_url: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_sweep_interval: Duration,
    pub table_timeout: Duration,
    pub chrome_executable: Option<PathBuf>,
    pub chrome_no_sandbox: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("FX_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("Invalid FX_LISTEN_ADDR")?;
        let source_url = lookup(SOURCE_URL_ENV_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let cors_allow = lookup("FX_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = parse_or(&lookup, "FX_REQUEST_TIMEOUT_MS", 120_000);
        let cache_ttl_secs = parse_or(&lookup, "FX_CACHE_TTL_SECS", DEFAULT_CACHE_TTL.as_secs());
        let sweep_secs = parse_or(
            &lookup,
            "FX_CACHE_SWEEP_SECS",
            DEFAULT_CACHE_SWEEP_INTERVAL.as_secs(),
        );
        let table_timeout_ms = parse_or(&lookup, "FX_TABLE_TIMEOUT_MS", 30_000);
        let chrome_executable = lookup("FX_CHROME_EXECUTABLE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let chrome_no_sandbox = lookup("FX_CHROME_NO_SANDBOX")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            source_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_sweep_interval: Duration::from_secs(sweep_secs.max(1)),
            table_timeout: Duration::from_millis(table_timeout_ms),
            chrome_executable,
            chrome_no_sandbox,
        })
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
