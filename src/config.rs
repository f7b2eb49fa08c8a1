use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::report::Format;
use crate::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NVD API key is empty; set NVD_API_KEY or pass --api-key")]
    EmptyApiKey,
    #[error("invalid NVD endpoint '{0}': {1}")]
    InvalidEndpoint(String, url::ParseError),
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: Url,
    pub delimiter: char,
    pub delay: Duration,
    pub timeout: Duration,
    pub format: Format,
}

impl TryFrom<&Args> for Config {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let api_key = args.api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let endpoint = Url::parse(&args.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(args.endpoint.clone(), e))?;

        let config = Config {
            api_key: api_key.to_string(),
            endpoint,
            delimiter: args.delimiter,
            delay: Duration::from_millis(args.delay_ms),
            timeout: Duration::from_secs(args.timeout_secs),
            format: args.format,
        };
        debug!(
            "endpoint {} delay {:?} timeout {:?}",
            config.endpoint, config.delay, config.timeout
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::usecase::{NVD_API_URL, REQUEST_DELAY, REQUEST_TIMEOUT};

    fn parse(extra: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(["cvss-peak"].iter().chain(extra)).unwrap();
        Config::try_from(&args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--api-key", "secret", "--endpoint", NVD_API_URL]).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.endpoint.as_str(), NVD_API_URL);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.delay, REQUEST_DELAY);
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
        assert_eq!(config.format, Format::Text);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--api-key",
            " secret ",
            "--endpoint",
            "http://localhost:8080/cves",
            "--delimiter",
            ";",
            "--delay-ms",
            "0",
            "--timeout-secs",
            "5",
            "--format",
            "json",
            "CVE-1",
            "CVE-2",
        ])
        .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/cves");
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            parse(&["--api-key", "  "]),
            Err(ConfigError::EmptyApiKey)
        ));
        assert!(matches!(
            parse(&["--api-key", "k", "--endpoint", "not a url"]),
            Err(ConfigError::InvalidEndpoint(..))
        ));
        assert!(matches!(
            parse(&["--api-key", "k", "--timeout-secs", "0"]),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
