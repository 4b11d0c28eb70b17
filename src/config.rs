use std::env;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// BBB API root, always ending in `/`
    pub bbb_url: String,
    pub bbb_secret: String,
    pub bbb_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (env in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bbb_url = lookup("BBB_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBbbUrl)?;
        let bbb_secret = lookup("BBB_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingBbbSecret)?;

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            bbb_url: normalize_api_root(&bbb_url),
            bbb_secret,
            bbb_timeout_seconds: lookup("BBB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn bbb_timeout(&self) -> Duration {
        Duration::from_secs(self.bbb_timeout_seconds)
    }
}

// Keep the shared secret out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("bbb_url", &self.bbb_url)
            .field("bbb_secret", &"<redacted>")
            .field("bbb_timeout_seconds", &self.bbb_timeout_seconds)
            .finish()
    }
}

fn normalize_api_root(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("BBB_TIMEOUT_SECONDS must be a positive number of seconds")]
    InvalidTimeout,
    #[error("BBB_URL environment variable is required")]
    MissingBbbUrl,
    #[error("BBB_SECRET environment variable is required")]
    MissingBbbSecret,
}
