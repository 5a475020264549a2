use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::render::MarkupPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub archive_path: PathBuf,
    pub assets_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Author name the export uses for the channel itself.
    pub channel_identity: String,
    pub markup_policy: MarkupPolicy,
    pub theme_ttl_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from("db/db.json"),
            assets_dir: PathBuf::from("public"),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            channel_identity: "kitoblab.uz".to_owned(),
            markup_policy: MarkupPolicy::Trusted,
            theme_ttl_days: 365,
        }
    }
}

impl Config {
    /// Reads the process environment, including anything `.env` supplies.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            archive_path: lookup("ARCHIVE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.archive_path),
            assets_dir: lookup("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            bind_addr: parse(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            channel_identity: lookup("CHANNEL_IDENTITY").unwrap_or(defaults.channel_identity),
            markup_policy: parse(&lookup, "MARKUP_POLICY")?.unwrap_or(defaults.markup_policy),
            theme_ttl_days: match parse::<i64>(&lookup, "THEME_TTL_DAYS")? {
                Some(days) if days <= 0 => {
                    return Err(ConfigError::Invalid {
                        key: "THEME_TTL_DAYS",
                        value: days.to_string(),
                        reason: "must be positive".to_owned(),
                    });
                }
                Some(days) => days,
                None => defaults.theme_ttl_days,
            },
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value,
        })
}
