use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAILCHIMP_API_URL: &str = mailchimp_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mailchimp_api_url: String,
    /// Members fetched per job when the form leaves the count blank
    pub fetch_limit: u32,
    /// Lanes per job
    pub max_concurrency: usize,
    /// Inbound request timeout; a whole batch runs inside one request
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            mailchimp_api_url: DEFAULT_MAILCHIMP_API_URL.to_string(),
            fetch_limit: 100,
            max_concurrency: 10,
            request_timeout: Duration::from_secs(10 * 60),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        let max_concurrency = parse_var("MAILCHIMP_MAX_CONCURRENCY", defaults.max_concurrency)?;
        if max_concurrency == 0 {
            anyhow::bail!("MAILCHIMP_MAX_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            mailchimp_api_url: env::var("MAILCHIMP_API_URL")
                .unwrap_or(defaults.mailchimp_api_url),
            fetch_limit: parse_var("MAILCHIMP_FETCH_LIMIT", defaults.fetch_limit)?,
            max_concurrency,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{} must be a valid number, got {:?}", name, raw))
}
