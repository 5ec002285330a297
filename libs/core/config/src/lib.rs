//! Environment-driven configuration shared by every binary in the workspace.
//!
//! Each config struct implements [`FromEnv`] and builds itself from a few
//! variables through [`env_or_default`], [`env_required`] and [`env_parse`].
//! A variable set to the empty string counts as unset.

pub mod server;
pub mod tracing;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{key}' is required but not set")]
    Missing { key: String },

    #[error("Environment variable '{key}' has invalid value '{value}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Deployment flavour; selects the log format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Pretty, human-oriented logs
    #[default]
    Development,
    /// JSON logs for aggregation
    Production,
}

impl Environment {
    /// Read `APP_ENV`. Anything other than `production` (any case) is development.
    pub fn from_env() -> Self {
        Self::from_name(&env_or_default("APP_ENV", "development"))
    }

    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Static application metadata reported by the health endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Configuration that can be assembled from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

fn lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Value of `key`, or `default` when unset
pub fn env_or_default(key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

/// Value of `key`, failing with [`ConfigError::Missing`] when unset
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_owned(),
    })
}

/// Value of `key` (or `default`) parsed into `T`
pub fn env_parse<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = env_or_default(key, default);
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_owned(),
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_app_env() {
        for (value, expected) in [
            (None, Environment::Development),
            (Some("production"), Environment::Production),
            (Some("PRODUCTION"), Environment::Production),
            (Some("staging"), Environment::Development),
            (Some(""), Environment::Development),
        ] {
            temp_env::with_var("APP_ENV", value, || {
                assert_eq!(Environment::from_env(), expected, "APP_ENV={:?}", value);
            });
        }
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        temp_env::with_var("GARAGE_TEST_EMPTY", Some(""), || {
            assert_eq!(env_or_default("GARAGE_TEST_EMPTY", "fallback"), "fallback");
            assert!(matches!(
                env_required("GARAGE_TEST_EMPTY"),
                Err(ConfigError::Missing { .. })
            ));
        });
    }

    #[test]
    fn test_env_required_names_the_variable() {
        temp_env::with_var_unset("GARAGE_TEST_REQUIRED", || {
            let err = env_required("GARAGE_TEST_REQUIRED").unwrap_err();
            assert_eq!(
                err.to_string(),
                "Environment variable 'GARAGE_TEST_REQUIRED' is required but not set"
            );
        });
    }

    #[test]
    fn test_env_parse() {
        temp_env::with_var("GARAGE_TEST_PORT", Some("3000"), || {
            assert_eq!(env_parse::<u16>("GARAGE_TEST_PORT", "8080").unwrap(), 3000);
        });
        temp_env::with_var_unset("GARAGE_TEST_PORT", || {
            assert_eq!(env_parse::<u16>("GARAGE_TEST_PORT", "8080").unwrap(), 8080);
        });
    }

    #[test]
    fn test_env_parse_reports_key_and_value() {
        temp_env::with_var("GARAGE_TEST_PORT", Some("eighty"), || {
            let err = env_parse::<u16>("GARAGE_TEST_PORT", "8080").unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid { ref key, ref value, .. }
                    if key == "GARAGE_TEST_PORT" && value == "eighty"
            ));
        });
    }

    #[test]
    fn test_app_info_macro() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
