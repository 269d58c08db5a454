//! CLI configuration.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use joyeria_client::IdStrategy;
use joyeria_commerce::cart::ShippingPolicy;
use joyeria_commerce::{Currency, Money};
use joyeria_data::TimeoutPolicy;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "JOYERIA_API_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-call timeouts.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> Result<CliConfig> {
        let Some(env_config) = self.environments.get(env) else {
            let mut known: Vec<&str> = self.environments.keys().map(String::as_str).collect();
            known.sort_unstable();
            bail!(
                "Unknown environment '{}'. Known: {}",
                env,
                if known.is_empty() { "none".to_string() } else { known.join(", ") }
            );
        };

        let mut config = self.clone();
        if let Some(ref api) = env_config.api {
            config.api = api.clone();
        }
        if let Some(ref timeouts) = env_config.timeouts {
            config.timeouts = timeouts.clone();
        }
        Ok(config)
    }

    /// Replace the base URL when an override is set and non-empty.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Timeouts as used by the clients.
    pub fn timeout_policy(&self) -> TimeoutPolicy {
        let t = &self.timeouts;
        TimeoutPolicy {
            connect: Duration::from_millis(t.connect_ms),
            cart_read: Duration::from_millis(t.cart_read_ms),
            cart_write: Duration::from_millis(t.cart_write_ms),
            checkout: Duration::from_millis(t.checkout_ms),
            catalog: Duration::from_millis(t.catalog_ms),
        }
    }

    /// Shipping rule built from `cart.shipping_fee` and `cart.currency`.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy> {
        let Some(currency) = Currency::from_code(&self.cart.currency) else {
            bail!("Unknown currency: {}", self.cart.currency);
        };
        if !self.cart.shipping_fee.is_finite() || self.cart.shipping_fee < 0.0 {
            bail!("cart.shipping_fee must be a non-negative amount");
        }
        Ok(ShippingPolicy::flat(Money::from_decimal(
            self.cart.shipping_fee,
            currency,
        )))
    }

    /// Problems found in this config, split into errors and warnings.
    pub fn check(&self) -> ConfigReport {
        let mut report = ConfigReport::default();

        let url = self.api.base_url.trim();
        if url.is_empty() {
            report.errors.push("api.base_url is required".to_string());
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            report
                .errors
                .push(format!("api.base_url '{}' must start with http:// or https://", url));
        } else if url.starts_with("http://") && !is_local_url(url) {
            report
                .warnings
                .push("api.base_url uses plain http for a remote host".to_string());
        }

        for (name, ms) in self.timeouts.entries() {
            if ms == 0 {
                report.errors.push(format!("timeouts.{} must be greater than 0", name));
            }
        }
        if self.timeouts.checkout_ms < self.timeouts.cart_write_ms {
            report
                .warnings
                .push("timeouts.checkout_ms is shorter than timeouts.cart_write_ms".to_string());
        }

        if let Err(e) = self.shipping_policy() {
            report.errors.push(e.to_string());
        }

        if self.log.level.trim().is_empty() {
            report.errors.push("log.level must not be empty".to_string());
        }

        for (name, env) in &self.environments {
            if let Some(api) = &env.api {
                if api.base_url.trim().is_empty() {
                    report
                        .errors
                        .push(format!("environments.{}.api.base_url is required", name));
                }
            }
        }

        report
    }
}

fn is_local_url(url: &str) -> bool {
    let host = url
        .trim_start_matches("http://")
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1" | "0.0.0.0")
}

/// Result of [`CliConfig::check`].
#[derive(Debug, Default)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Storefront API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headers: HashMap::new(),
        }
    }
}

/// Per-call timeouts in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_connect_ms")]
    pub connect_ms: u64,
    #[serde(default = "default_cart_read_ms")]
    pub cart_read_ms: u64,
    #[serde(default = "default_cart_write_ms")]
    pub cart_write_ms: u64,
    #[serde(default = "default_checkout_ms")]
    pub checkout_ms: u64,
    #[serde(default = "default_catalog_ms")]
    pub catalog_ms: u64,
}

impl TimeoutsConfig {
    fn entries(&self) -> [(&'static str, u64); 5] {
        [
            ("connect_ms", self.connect_ms),
            ("cart_read_ms", self.cart_read_ms),
            ("cart_write_ms", self.cart_write_ms),
            ("checkout_ms", self.checkout_ms),
            ("catalog_ms", self.catalog_ms),
        ]
    }
}

fn default_connect_ms() -> u64 {
    TimeoutPolicy::default().connect.as_millis() as u64
}

fn default_cart_read_ms() -> u64 {
    TimeoutPolicy::default().cart_read.as_millis() as u64
}

fn default_cart_write_ms() -> u64 {
    TimeoutPolicy::default().cart_write.as_millis() as u64
}

fn default_checkout_ms() -> u64 {
    TimeoutPolicy::default().checkout.as_millis() as u64
}

fn default_catalog_ms() -> u64 {
    TimeoutPolicy::default().catalog.as_millis() as u64
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_ms(),
            cart_read_ms: default_cart_read_ms(),
            cart_write_ms: default_cart_write_ms(),
            checkout_ms: default_checkout_ms(),
            catalog_ms: default_catalog_ms(),
        }
    }
}

/// Cart behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Where new cart ids come from (`server` or `local`).
    #[serde(default)]
    pub id_strategy: IdStrategy,

    /// File holding the cart id (default: `~/.local/share/joyeria/state.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,

    /// Flat shipping fee.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,

    /// Currency code for totals.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_shipping_fee() -> f64 {
    15.0
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            store_path: None,
            shipping_fee: default_shipping_fee(),
            currency: default_currency(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Human,
    /// JSON lines.
    Json,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive, e.g. `warn` or `joyeria_client=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// API override.
    #[serde(default)]
    pub api: Option<ApiConfig>,

    /// Timeouts override.
    #[serde(default)]
    pub timeouts: Option<TimeoutsConfig>,
}

/// Generate a default joyeria.toml config file.
pub fn generate_default_config() -> String {
    r#"# Joyeria storefront client configuration

[api]
base_url = "http://127.0.0.1:5000"

[timeouts]
connect_ms = 3000
cart_read_ms = 5000
cart_write_ms = 8000
checkout_ms = 15000
catalog_ms = 10000

[cart]
# "server" asks the backend for a cart id, "local" mints one on this machine
id_strategy = "server"
# store_path = "state.json"
shipping_fee = 15.0
currency = "BOB"

[log]
format = "human"
level = "warn"

[environments.staging.api]
base_url = "https://staging.joyeria.example"

[environments.production.api]
base_url = "https://joyeria.example"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_is_valid() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        let report = config.check();
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(config.timeout_policy(), TimeoutPolicy::default());
        assert_eq!(config.environments.len(), 2);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.cart.id_strategy, IdStrategy::Server);
        assert_eq!(
            config.shipping_policy().unwrap(),
            ShippingPolicy::default()
        );
    }

    #[test]
    fn test_for_environment_overrides_api() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://127.0.0.1:5000"

            [environments.staging.api]
            base_url = "https://staging.example"

            [environments.staging.timeouts]
            checkout_ms = 30000
            "#,
        )
        .unwrap();

        let staging = config.for_environment("staging").unwrap();
        assert_eq!(staging.api.base_url, "https://staging.example");
        assert_eq!(staging.timeouts.checkout_ms, 30000);
        assert_eq!(staging.timeouts.cart_read_ms, 5000);

        let err = config.for_environment("qa").unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_api_url_override() {
        let config = CliConfig::default()
            .with_api_url_override(Some("  https://shop.example  ".to_string()));
        assert_eq!(config.api.base_url, "https://shop.example");

        let config = CliConfig::default().with_api_url_override(Some(String::new()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_check_reports_problems() {
        let mut config = CliConfig::default();
        config.api.base_url = "ftp://shop".to_string();
        config.timeouts.catalog_ms = 0;
        config.cart.currency = "EUR".to_string();

        let report = config.check();
        assert_eq!(report.errors.len(), 3, "{:?}", report.errors);
    }

    #[test]
    fn test_check_warns_on_remote_http() {
        let mut config = CliConfig::default();
        config.api.base_url = "http://shop.example".to_string();
        let report = config.check();
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_local_id_strategy_parses() {
        let config: CliConfig = toml::from_str("[cart]\nid_strategy = \"local\"").unwrap();
        assert_eq!(config.cart.id_strategy, IdStrategy::Local);
    }
}
