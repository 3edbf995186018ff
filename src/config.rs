//! Gateway configuration
//!
//! Configuration is read from an optional YAML file, then overridden by
//! environment variables, then by command-line flags. Every field has a
//! default so an empty file (or no file) is a valid configuration.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `upstream.base_url`
pub const ENV_UPSTREAM_URL: &str = "CATALOG_UPSTREAM_URL";
/// Environment variable overriding `upstream.timeout_ms`
pub const ENV_TIMEOUT_MS: &str = "CATALOG_TIMEOUT_MS";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "CATALOG_PORT";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Upstream catalog API
    pub upstream: UpstreamConfig,
    /// Aggregation limits
    pub aggregation: AggregationConfig,
    /// HTTP server binding
    pub server: ServerSettings,
}

impl GatewayConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the file if given, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_UPSTREAM_URL) {
            self.upstream.base_url = url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.upstream.timeout_ms = timeout
                .parse()
                .map_err(|e| Error::invalid_config(ENV_TIMEOUT_MS, format!("{e}")))?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|e| Error::invalid_config(ENV_PORT, format!("{e}")))?;
        }
        Ok(())
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.upstream.base_url.trim().is_empty() {
            return Err(Error::invalid_config("upstream.base_url", "must not be empty"));
        }
        url::Url::parse(&self.upstream.base_url)?;
        if self.upstream.timeout_ms == 0 {
            return Err(Error::invalid_config(
                "upstream.timeout_ms",
                "must be greater than zero",
            ));
        }
        if let Some(limit) = &self.upstream.rate_limit {
            if limit.requests_per_second == 0 || limit.burst_size == 0 {
                return Err(Error::invalid_config(
                    "upstream.rate_limit",
                    "requests_per_second and burst_size must be greater than zero",
                ));
            }
        }
        if self.aggregation.max_pages == 0 {
            return Err(Error::invalid_config(
                "aggregation.max_pages",
                "must be greater than zero",
            ));
        }
        if self.aggregation.prefetch_concurrency == 0 {
            return Err(Error::invalid_config(
                "aggregation.prefetch_concurrency",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Render the configuration back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ============================================================================
// Upstream
// ============================================================================

/// Upstream catalog API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// Path of the artist songs endpoint
    pub songs_path: String,
    /// Path of the artist albums endpoint
    pub albums_path: String,
    /// Timeout for a single page fetch in milliseconds
    pub timeout_ms: u64,
    /// User agent sent upstream
    pub user_agent: String,
    /// Optional outbound rate limit
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            songs_path: "/artists/songs".to_string(),
            albums_path: "/artists/albums".to_string(),
            timeout_ms: 10_000,
            user_agent: format!("catalog-gateway/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: None,
        }
    }
}

impl UpstreamConfig {
    /// Per-fetch timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(self.timeout())
            .user_agent(&self.user_agent)
            .header("Accept", "application/json");

        match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()).build(),
            None => builder.build(),
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Limits applied while walking upstream pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Refuse listings spanning more pages than this
    pub max_pages: u32,
    /// Pages fetched concurrently once the page count is known (1 = sequential)
    pub prefetch_concurrency: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_pages: 200,
            prefetch_concurrency: 1,
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = GatewayConfig::default();
        config.validate().unwrap();
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
        assert_eq!(config.aggregation.max_pages, 200);
        assert_eq!(config.aggregation.prefetch_concurrency, 1);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(GatewayConfig::from_yaml("").unwrap(), GatewayConfig::default());
        assert_eq!(
            GatewayConfig::from_yaml("  \n").unwrap(),
            GatewayConfig::default()
        );
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r"
upstream:
  base_url: https://catalog.example.com/api
  timeout_ms: 2500
  rate_limit:
    requests_per_second: 5
    burst_size: 2
aggregation:
  prefetch_concurrency: 4
";
        let config = GatewayConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.upstream.base_url, "https://catalog.example.com/api");
        assert_eq!(config.upstream.timeout_ms, 2500);
        assert_eq!(config.upstream.songs_path, "/artists/songs");
        assert_eq!(
            config.upstream.rate_limit,
            Some(RateLimiterConfig::new(5, 2))
        );
        assert_eq!(config.aggregation.prefetch_concurrency, 4);
        assert_eq!(config.aggregation.max_pages, 200);
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_yaml() {
        let result = GatewayConfig::from_yaml("upstream: [1, 2");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9191").unwrap();

        let config = GatewayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_file() {
        let result = GatewayConfig::from_file("/nonexistent/gateway.yaml");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_UPSTREAM_URL, "http://upstream.internal:9000"),
            (ENV_TIMEOUT_MS, "750"),
            (ENV_PORT, "3001"),
        ]
        .into_iter()
        .collect();

        let mut config = GatewayConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.upstream.base_url, "http://upstream.internal:9000");
        assert_eq!(config.upstream.timeout_ms, 750);
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_override_rejects_garbage() {
        let mut config = GatewayConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_PORT).then(|| "not-a-port".to_string())
        });
        assert!(matches!(
            result,
            Err(Error::InvalidConfigValue { ref field, .. }) if field == ENV_PORT
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let mut config = GatewayConfig::default();
        config.upstream.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.aggregation.max_pages = 0;
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.aggregation.prefetch_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.upstream.rate_limit = Some(RateLimiterConfig::new(0, 1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_keeps_settings() {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "https://catalog.example.com".to_string();
        config.server.port = 4000;

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("base_url: https://catalog.example.com"));
        assert_eq!(GatewayConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_http_client_config() {
        let mut upstream = UpstreamConfig::default();
        upstream.timeout_ms = 1234;
        upstream.rate_limit = Some(RateLimiterConfig::new(3, 3));

        let http = upstream.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some("http://127.0.0.1:3000"));
        assert_eq!(http.timeout, Duration::from_millis(1234));
        assert!(http.rate_limit.is_some());
        assert_eq!(
            http.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}
