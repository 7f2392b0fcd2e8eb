// src/config.rs
use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use tracing::info;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// `None` runs the service on the in-memory shop store.
    pub database_url: Option<String>,
    pub razorpay: RazorpayConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: parse_or_default("HOST", var("HOST"), DEFAULT_HOST)?,
            port: parse_or_default("PORT", var("PORT"), &DEFAULT_PORT.to_string())?,
            database_url: var("DATABASE_URL"),
            razorpay: RazorpayConfig {
                key_id: var("RAZORPAY_KEY_ID").ok_or(ConfigError::Missing("RAZORPAY_KEY_ID"))?,
                key_secret: var("RAZORPAY_KEY_SECRET").ok_or(ConfigError::Missing("RAZORPAY_KEY_SECRET"))?,
                base_url: var("RAZORPAY_BASE_URL").unwrap_or_else(|| DEFAULT_RAZORPAY_BASE_URL.to_string()),
            },
        })
    }
}

fn parse_or_default<T: FromStr>(key: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = value.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
