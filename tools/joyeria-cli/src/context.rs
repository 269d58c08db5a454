//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use joyeria_client::{AdminClient, CartClient, CatalogClient, FileStore};
use joyeria_data::FetchClient;

use crate::config::{CliConfig, API_URL_ENV};
use crate::output::Output;
use crate::ui::TerminalUi;

/// Config file names looked for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["joyeria.toml", ".joyeria.toml", "joyeria.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment and env-var overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };
        let config = config.with_api_url_override(std::env::var(API_URL_ENV).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// File holding the current cart id.
    pub fn store_path(&self) -> PathBuf {
        match &self.config.cart.store_path {
            Some(path) => self.resolve_path(path),
            None => data_dir().join("state.json"),
        }
    }

    /// HTTP transport for the configured backend.
    pub fn transport(&self) -> Result<FetchClient> {
        let base_url = &self.config.api.base_url;
        let mut client = FetchClient::new(base_url)
            .and_then(|c| c.with_timeouts(&self.config.timeout_policy()))
            .with_context(|| format!("Cannot use backend URL {}", base_url))?;
        for (key, value) in &self.config.api.headers {
            client = client.with_default_header(key.clone(), value.clone());
        }
        self.output.debug(&format!("Backend: {}", client.base_url()));
        Ok(client)
    }

    /// Cart client wired to the terminal.
    pub fn cart_client(&self, assume_yes: bool) -> Result<CartClient<FetchClient>> {
        let store_path = self.store_path();
        self.output
            .debug(&format!("Cart id store: {}", store_path.display()));
        let ui = Arc::new(TerminalUi::new(self.output.clone(), assume_yes));

        let client = CartClient::open(self.transport()?, Arc::new(FileStore::new(store_path)))
            .context("Failed to read the stored cart id")?
            .with_confirm(ui.clone())
            .with_notifier(ui)
            .with_shipping(self.config.shipping_policy()?)
            .with_timeouts(self.config.timeout_policy())
            .with_id_strategy(self.config.cart.id_strategy);
        Ok(client)
    }

    /// Catalog and orders client.
    pub fn catalog_client(&self) -> Result<CatalogClient<FetchClient>> {
        Ok(CatalogClient::new(self.transport()?).with_timeouts(self.config.timeout_policy()))
    }

    /// Admin client; deletions confirm through the terminal.
    pub fn admin_client(&self, assume_yes: bool) -> Result<AdminClient<FetchClient>> {
        let ui = Arc::new(TerminalUi::new(self.output.clone(), assume_yes));
        Ok(AdminClient::new(self.transport()?)
            .with_timeouts(self.config.timeout_policy())
            .with_confirm(ui))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    let base = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    };
    base.join("joyeria")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("joyeria.toml"),
            "[api]\nbase_url = \"https://shop.example\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (path, config) = Context::find_config(&nested).unwrap();
        assert_eq!(path, dir.path().join("joyeria.toml"));
        assert_eq!(config.api.base_url, "https://shop.example");
    }

    #[test]
    fn test_store_path_resolves_relative_to_cwd() {
        let mut config = CliConfig::default();
        config.cart.store_path = Some("cart.json".to_string());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/srv/shop"),
        };
        assert_eq!(ctx.store_path(), PathBuf::from("/srv/shop/cart.json"));
    }
}
