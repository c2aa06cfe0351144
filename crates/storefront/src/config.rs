//! # Configuration
//!
//! [`StoreConfig`] gathers the knobs of a running store. Defaults match the
//! published pricing (flat 15000 shipping, 11% tax); each value can be
//! overridden from the environment:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `STOREFRONT_SHIPPING_FEE` | `pricing.flat_shipping_fee` | `15000` |
//! | `STOREFRONT_TAX_RATE` | `pricing.tax_rate` | `0.11` |
//! | `STOREFRONT_ACTOR_BUFFER` | `actor_buffer` | `32` |
//! | `STOREFRONT_STOCK_RETRIES` | `stock_retry_limit` | `3` |

use crate::model::Money;
use crate::pricing::PricingPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const SHIPPING_FEE_VAR: &str = "STOREFRONT_SHIPPING_FEE";
pub const TAX_RATE_VAR: &str = "STOREFRONT_TAX_RATE";
pub const ACTOR_BUFFER_VAR: &str = "STOREFRONT_ACTOR_BUFFER";
pub const STOCK_RETRIES_VAR: &str = "STOREFRONT_STOCK_RETRIES";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub pricing: PricingPolicy,
    /// Mailbox size of each resource actor.
    pub actor_buffer: usize,
    /// How many times checkout retries a product whose stock moved under it.
    pub stock_retry_limit: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            actor_buffer: 32,
            stock_retry_limit: 3,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn invalid(key: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl StoreConfig {
    /// Defaults overridden by whatever `STOREFRONT_*` variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(SHIPPING_FEE_VAR) {
            let fee: Decimal = parse(SHIPPING_FEE_VAR, value)?;
            if fee.is_sign_negative() && !fee.is_zero() {
                return Err(invalid(SHIPPING_FEE_VAR, fee, "must not be negative"));
            }
            if !Money::new(fee).is_within_limit() {
                return Err(invalid(SHIPPING_FEE_VAR, fee, "exceeds the largest supported amount"));
            }
            config.pricing.flat_shipping_fee = Money::new(fee);
        }
        if let Some(value) = lookup(TAX_RATE_VAR) {
            let rate: Decimal = parse(TAX_RATE_VAR, value)?;
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(TAX_RATE_VAR, rate, "must be between 0 and 1"));
            }
            config.pricing.tax_rate = rate;
        }
        if let Some(value) = lookup(ACTOR_BUFFER_VAR) {
            let buffer: usize = parse(ACTOR_BUFFER_VAR, value)?;
            if buffer == 0 {
                return Err(invalid(ACTOR_BUFFER_VAR, buffer, "must be at least 1"));
            }
            config.actor_buffer = buffer;
        }
        if let Some(value) = lookup(STOCK_RETRIES_VAR) {
            let retries: u32 = parse(STOCK_RETRIES_VAR, value)?;
            if retries == 0 {
                return Err(invalid(STOCK_RETRIES_VAR, retries, "must be at least 1"));
            }
            config.stock_retry_limit = retries;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.pricing.flat_shipping_fee, Money::from_units(15_000));
        assert_eq!(config.stock_retry_limit, 3);
    }

    #[test]
    fn test_overrides_apply() {
        let config = StoreConfig::from_lookup(lookup(&[
            (SHIPPING_FEE_VAR, "20000"),
            (TAX_RATE_VAR, "0.1"),
            (ACTOR_BUFFER_VAR, "64"),
            (STOCK_RETRIES_VAR, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.pricing.flat_shipping_fee, Money::from_units(20_000));
        assert_eq!(config.pricing.tax_rate, Decimal::new(1, 1));
        assert_eq!(config.actor_buffer, 64);
        assert_eq!(config.stock_retry_limit, 5);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        for (key, value) in [
            (SHIPPING_FEE_VAR, "lots"),
            (SHIPPING_FEE_VAR, "-1"),
            (SHIPPING_FEE_VAR, "1000000000000000001"),
            (TAX_RATE_VAR, "1.5"),
            (ACTOR_BUFFER_VAR, "0"),
            (STOCK_RETRIES_VAR, "-2"),
        ] {
            let err = StoreConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            let ConfigError::Invalid { key: reported, .. } = err;
            assert_eq!(reported, key);
        }
    }
}
