use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which document backend the catalog talks to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Memory,
    JsonFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_products_collection")]
    pub products_collection: String,
    #[serde(default = "default_pharmacies_collection")]
    pub pharmacies_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            path: String::new(),
            products_collection: default_products_collection(),
            pharmacies_collection: default_pharmacies_collection(),
        }
    }
}

fn default_products_collection() -> String { "products".into() }
fn default_pharmacies_collection() -> String { "pharmacies".into() }

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::Compact, filter: default_log_filter() }
    }
}

fn default_log_filter() -> String { "info".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.store.normalize_from_env();
        self.store.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        self.path = self.path.trim().to_string();
        // An empty path in the file may be supplied through the environment.
        if self.path.is_empty() {
            if let Ok(path) = std::env::var("STORE_PATH") {
                self.path = path.trim().to_string();
            }
        }
        self.products_collection = self.products_collection.trim().to_string();
        if self.products_collection.is_empty() {
            self.products_collection = default_products_collection();
        }
        self.pharmacies_collection = self.pharmacies_collection.trim().to_string();
        if self.pharmacies_collection.is_empty() {
            self.pharmacies_collection = default_pharmacies_collection();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend == BackendKind::JsonFile && self.path.is_empty() {
            return Err(anyhow!("store.path is empty; set it in config.toml or the STORE_PATH environment variable"));
        }
        if self.products_collection == self.pharmacies_collection {
            return Err(anyhow!("store.products_collection and store.pharmacies_collection must differ"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.filter.trim().is_empty() {
            self.filter = default_log_filter();
        }
    }
}
