//! Runtime Configuration
//!
//! Settings are resolved in three layers: built-in defaults, then `WORDFREQ_*`
//! environment variables, then command-line flags.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: word-frequency [OPTIONS]

Options:
  --bind <addr:port>             Address to listen on      [env: WORDFREQ_BIND] [default: 127.0.0.1:8000]
  --cache-ttl-secs <secs>        Lifetime of cached results [env: WORDFREQ_CACHE_TTL_SECS] [default: 600]
  --max-text-bytes <bytes>       Largest accepted text      [env: WORDFREQ_MAX_TEXT_BYTES] [default: 1048576]
  --redis-url <url>              Use Redis instead of the in-memory cache [env: WORDFREQ_REDIS_URL]
  --sweep-interval-secs <secs>   In-memory cache purge period [env: WORDFREQ_SWEEP_INTERVAL_SECS] [default: 60]
  --log-level <level>            trace|debug|info|warn|error [env: WORDFREQ_LOG_LEVEL] [default: info]
  --help                         Print this message";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
    #[error("unknown argument {0}")]
    UnknownArgument(String),
    #[error("help requested")]
    HelpRequested,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub cache_ttl: Duration,
    pub max_text_bytes: usize,
    /// When set, results are cached in Redis instead of in-process.
    pub redis_url: Option<String>,
    pub sweep_interval: Duration,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            redis_url: None,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Reads the process environment and arguments.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(std::env::args().skip(1), |name| std::env::var(name).ok())
    }

    pub fn from_sources<I, F>(args: I, env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        for (name, flag) in SETTINGS {
            if let Some(value) = env(name) {
                config.apply(flag, &value)?;
            }
        }

        let args: Vec<String> = args.into_iter().collect();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--help" | "-h" => return Err(ConfigError::HelpRequested),
                flag if SETTINGS.iter().any(|(_, known)| *known == flag) => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
                    config.apply(flag, value)?;
                    i += 2;
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(config)
    }

    fn apply(&mut self, flag: &str, value: &str) -> Result<(), ConfigError> {
        match flag {
            "--bind" => self.bind_addr = parse_value(flag, value)?,
            "--cache-ttl-secs" => {
                self.cache_ttl = Duration::from_secs(parse_positive(flag, value)?);
            }
            "--max-text-bytes" => self.max_text_bytes = parse_positive(flag, value)?,
            "--redis-url" => {
                let url = value.trim();
                self.redis_url = (!url.is_empty()).then(|| url.to_string());
            }
            "--sweep-interval-secs" => {
                self.sweep_interval = Duration::from_secs(parse_positive(flag, value)?);
            }
            "--log-level" => self.log_level = parse_value(flag, value)?,
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
        Ok(())
    }
}

/// Environment variable and matching command-line flag for every setting.
const SETTINGS: [(&str, &str); 6] = [
    ("WORDFREQ_BIND", "--bind"),
    ("WORDFREQ_CACHE_TTL_SECS", "--cache-ttl-secs"),
    ("WORDFREQ_MAX_TEXT_BYTES", "--max-text-bytes"),
    ("WORDFREQ_REDIS_URL", "--redis-url"),
    ("WORDFREQ_SWEEP_INTERVAL_SECS", "--sweep-interval-secs"),
    ("WORDFREQ_LOG_LEVEL", "--log-level"),
];

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_positive<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: Display,
{
    let parsed: T = parse_value(name, value)?;
    if parsed <= T::default() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}
