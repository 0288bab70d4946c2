//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use qrshop_commerce::cart::CartStore;
use qrshop_commerce::catalog::InMemoryCatalog;
use qrshop_commerce::Currency;
use qrshop_storage::{Cache, FileStore};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["qrshop.toml", ".qrshop.toml", "qrshop.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
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
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let (config, config_path) = Self::load_config(&cwd, config_path)?;

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Like [`load`](Self::load), but a config file that cannot be read or
    /// fails validation is reported and replaced by defaults.
    pub fn load_or_default(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let (config, config_path) = match Self::load_config(&cwd, config_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                output.warn(&format!("Ignoring config ({:#}), using defaults", e));
                (CliConfig::default(), None)
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    fn load_config(cwd: &Path, config_path: Option<&str>) -> Result<(CliConfig, Option<PathBuf>)> {
        match config_path {
            Some(path) => {
                let path = resolve(cwd, path);
                Ok((CliConfig::load(&path)?, Some(path)))
            }
            // Try to find config in current directory or parent directories
            None => match Self::find_config(cwd)? {
                Some(path) => Ok((CliConfig::load(&path)?, Some(path))),
                None => Ok((CliConfig::default(), None)),
            },
        }
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Result<Option<PathBuf>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Ok(Some(candidate));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.shop.currency()
    }

    /// Directory holding the durable records.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the shopper's cart, rehydrating it from storage.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
        let store = CartStore::load(cache, self.config.storage.cart_key.clone(), self.currency()?)
            .context("Failed to load cart")?;
        self.output.debug(&format!(
            "Cart loaded from {} ({} lines)",
            dir.display(),
            store.items().len()
        ));
        Ok(store)
    }

    /// Load the product catalog.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        InMemoryCatalog::load(&path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("qrshop.toml"), "").unwrap();

        let found = Context::find_config(&nested).unwrap().unwrap();
        assert_eq!(found, dir.path().join("qrshop.toml"));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve(cwd, "/data/catalog.json"), PathBuf::from("/data/catalog.json"));
        assert_eq!(resolve(cwd, "catalog.json"), PathBuf::from("/srv/shop/catalog.json"));
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrshop.toml");
        std::fs::write(&path, "[shop]\ncurrency = \"XYZ\"\n").unwrap();
        let path = path.to_str().unwrap();

        assert!(Context::load(Some(path), Output::new(false, true)).is_err());

        let ctx = Context::load_or_default(Some(path), Output::new(false, true)).unwrap();
        assert!(ctx.config_path.is_none());
        assert_eq!(ctx.config.shop.currency, "PEN");
    }
}
