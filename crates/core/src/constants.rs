use std::time::Duration;

/// Environment variable holding the URL of the NBC rate page
pub const SOURCE_URL_ENV_VAR: &str = "NBC";

/// Cache key of the one exchange rate snapshot
pub const EXCHANGE_RATES_CACHE_KEY: &str = "exchangeRates";

/// How long a snapshot is served before the page is scraped again (12 hours)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(43_200);

/// How often expired cache entries are evicted eagerly
pub const DEFAULT_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(600);
