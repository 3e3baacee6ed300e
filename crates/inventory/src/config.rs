//! Resolver configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use stockpipe_core::{StockError, StockResult};

/// Quantity reported on hand for every resolved product.
pub const DEFAULT_QUANTITY: u64 = 1_000_000;

pub const DEFAULT_UNIT_OF_MEASURE: &str = "ea";

/// Cache timeout used when none (or an unparseable one) is supplied.
pub const DEFAULT_CACHE_TIMEOUT_SECS: f64 = 1.0;

pub const ENV_CACHE_TIMEOUT: &str = "INVENTORY_CACHE_TIMEOUT";
pub const ENV_DEFAULT_QUANTITY: &str = "STOCK_DEFAULT_QUANTITY";
pub const ENV_UNIT_OF_MEASURE: &str = "STOCK_UNIT_OF_MEASURE";

/// Stock resolution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Seconds a caching collaborator may keep resolved records.
    /// The resolver itself does not cache.
    #[serde(deserialize_with = "deserialize_cache_timeout")]
    pub inventory_cache_timeout: f64,
    pub default_quantity: u64,
    pub unit_of_measure: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            inventory_cache_timeout: DEFAULT_CACHE_TIMEOUT_SECS,
            default_quantity: DEFAULT_QUANTITY,
            unit_of_measure: DEFAULT_UNIT_OF_MEASURE.to_string(),
        }
    }
}

impl StockConfig {
    pub fn with_default_quantity(mut self, quantity: u64) -> Self {
        self.default_quantity = quantity;
        self
    }

    pub fn with_unit_of_measure(mut self, unit: impl Into<String>) -> Self {
        self.unit_of_measure = unit.into();
        self
    }

    /// Set the cache timeout from text, using the lenient parsing rule.
    pub fn with_cache_timeout_text(mut self, text: &str) -> Self {
        self.inventory_cache_timeout = parse_cache_timeout(Some(text));
        self
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.inventory_cache_timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_CACHE_TIMEOUT_SECS))
    }

    pub fn validate(&self) -> StockResult<()> {
        if self.default_quantity == 0 {
            return Err(StockError::invalid_configuration(
                "default_quantity must be greater than zero",
            ));
        }
        if self.unit_of_measure.trim().is_empty() {
            return Err(StockError::invalid_configuration(
                "unit_of_measure cannot be empty",
            ));
        }
        if !(self.inventory_cache_timeout.is_finite() && self.inventory_cache_timeout >= 0.0) {
            return Err(StockError::invalid_configuration(
                "inventory_cache_timeout must be a finite non-negative number",
            ));
        }
        Ok(())
    }

    /// Load from process environment, falling back to defaults for unset or
    /// malformed values.
    pub fn from_env() -> StockResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (same rules as [`StockConfig::from_env`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StockResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CACHE_TIMEOUT) {
            config.inventory_cache_timeout = parse_cache_timeout(Some(&raw));
        }

        if let Some(raw) = lookup(ENV_DEFAULT_QUANTITY) {
            match raw.trim().parse::<u64>() {
                Ok(quantity) => config.default_quantity = quantity,
                Err(e) => tracing::warn!(
                    value = %raw,
                    "{ENV_DEFAULT_QUANTITY} is not a valid quantity ({e}); using {DEFAULT_QUANTITY}"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_UNIT_OF_MEASURE) {
            if raw.trim().is_empty() {
                tracing::warn!(
                    "{ENV_UNIT_OF_MEASURE} is empty; using {DEFAULT_UNIT_OF_MEASURE:?}"
                );
            } else {
                config.unit_of_measure = raw;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Lenient cache timeout parse.
///
/// Absent, blank, non-numeric, negative and non-finite input all resolve to
/// [`DEFAULT_CACHE_TIMEOUT_SECS`]. Never fails.
pub fn parse_cache_timeout(text: Option<&str>) -> f64 {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return DEFAULT_CACHE_TIMEOUT_SECS;
    };
    match text.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => secs,
        _ => {
            tracing::debug!(value = text, "unparseable cache timeout; using default");
            DEFAULT_CACHE_TIMEOUT_SECS
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeout {
    Number(f64),
    Text(String),
}

fn deserialize_cache_timeout<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimeout>::deserialize(deserializer)?;
    Ok(match raw {
        None => DEFAULT_CACHE_TIMEOUT_SECS,
        Some(RawTimeout::Number(n)) => parse_cache_timeout(Some(&n.to_string())),
        Some(RawTimeout::Text(t)) => parse_cache_timeout(Some(&t)),
    })
}
