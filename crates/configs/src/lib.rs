use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

/// Signing configuration for bearer credentials. The secret has no default
/// and must come from `config.toml` or the `SECRET_KEY` environment variable;
/// startup fails without it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: u64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: default_algorithm(),
            access_ttl_minutes: default_access_ttl_minutes(),
            refresh_ttl_days: default_refresh_ttl_days(),
        }
    }
}

/// Address-suggestion provider and cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    #[serde(default = "default_suggest_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_suggest_count")]
    pub count: u32,
    #[serde(default = "default_suggest_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_url: default_suggest_url(),
            api_key: String::new(),
            count: default_suggest_count(),
            timeout_secs: default_suggest_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Object-store settings for uploaded meme images.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub media_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { media_dir: default_media_dir() }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_algorithm() -> String { "HS256".into() }
fn default_access_ttl_minutes() -> u64 { 15 }
fn default_refresh_ttl_days() -> u64 { 7 }
fn default_suggest_url() -> String {
    "https://suggestions.dadata.ru/suggestions/api/4_1/rs/suggest/address".into()
}
fn default_suggest_count() -> u32 { 5 }
fn default_suggest_timeout() -> u64 { 5 }
fn default_cache_ttl() -> u64 { 86_400 }
fn default_cache_capacity() -> u64 { 10_000 }
fn default_media_dir() -> String { "data/media".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `config.toml` (or `CONFIG_PATH`), falling back to built-in
    /// defaults when the file is absent, then fill from environment variables
    /// and validate. Binaries should use this single entry point.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.suggest.normalize_from_env();
        self.suggest.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            None | Some(0) => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or via DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.secret.trim().is_empty() {
            if let Ok(v) = std::env::var("SECRET_KEY") {
                self.secret = v;
            }
        }
        if let Ok(v) = std::env::var("ALGORITHM") {
            if !v.trim().is_empty() {
                self.algorithm = v;
            }
        }
        if let Ok(v) = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            if let Ok(n) = v.parse::<u64>() {
                self.access_ttl_minutes = n;
            }
        }
        if let Ok(v) = std::env::var("REFRESH_TOKEN_EXPIRE_DAYS") {
            if let Ok(n) = v.parse::<u64>() {
                self.refresh_ttl_days = n;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            return Err(anyhow!("auth.secret is empty; set it in config.toml or via SECRET_KEY"));
        }
        match self.algorithm.as_str() {
            "HS256" | "HS384" | "HS512" => {}
            other => {
                return Err(anyhow!("auth.algorithm {other} is not supported (HS256/HS384/HS512)"))
            }
        }
        if self.access_ttl_minutes == 0 || self.refresh_ttl_days == 0 {
            return Err(anyhow!("auth token lifetimes must be positive"));
        }
        Ok(())
    }
}

impl SuggestConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            if let Ok(v) = std::env::var("DADATA_API_KEY") {
                self.api_key = v;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow!("suggest.api_url is empty"));
        }
        if self.count == 0 || self.count > 20 {
            return Err(anyhow!("suggest.count must be in 1..=20"));
        }
        if self.timeout_secs == 0 || self.cache_ttl_secs == 0 {
            return Err(anyhow!("suggest timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.media_dir.trim().is_empty() {
            return Err(anyhow!("storage.media_dir is empty"));
        }
        Ok(())
    }
}
