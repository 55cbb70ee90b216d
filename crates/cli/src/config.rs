//! Runtime configuration read from the environment.

/// Currency label printed after money totals when none is configured.
pub const DEFAULT_CURRENCY: &str = "UAH";

pub const CURRENCY_ENV: &str = "SHELFKEEP_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let currency = lookup(CURRENCY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("{CURRENCY_ENV} not set; using {DEFAULT_CURRENCY}");
                DEFAULT_CURRENCY.to_string()
            });

        Self { currency }
    }
}
