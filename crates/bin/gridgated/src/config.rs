//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `gridgate.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values; site addresses are read from `JSC_TPP`,
//! `TASHKENT_TTC`, `SIRDARYA_TPP` and `MUBAREK_TPP`.

use std::time::Duration;

use serde::Deserialize;

use gridgate_app::registry::AddressRegistry;
use gridgate_domain::address::BACKEND_PORT;
use gridgate_domain::location::Site;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Outbound calls to site chart servers.
    pub backend: BackendConfig,
    /// Per-site chart server addresses.
    pub sites: SitesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Outbound call settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Per-call timeout, in seconds.
    pub timeout_secs: u64,
    /// Port the site chart servers listen on.
    pub port: u16,
}

/// Site addresses. Missing entries are allowed; calls to them fail.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub jsc_tpp: Option<String>,
    pub tashkent_ttc: Option<String>,
    pub sirdarya_tpp: Option<String>,
    pub mubarek_tpp: Option<String>,
}

impl SitesConfig {
    fn slot(&mut self, site: Site) -> &mut Option<String> {
        match site {
            Site::JscTpp => &mut self.jsc_tpp,
            Site::TashkentTtc => &mut self.tashkent_ttc,
            Site::SirdaryaTpp => &mut self.sirdarya_tpp,
            Site::MubarekTpp => &mut self.mubarek_tpp,
        }
    }

    /// Raw configured address of `site`.
    #[must_use]
    pub fn get(&self, site: Site) -> Option<&str> {
        match site {
            Site::JscTpp => self.jsc_tpp.as_deref(),
            Site::TashkentTtc => self.tashkent_ttc.as_deref(),
            Site::SirdaryaTpp => self.sirdarya_tpp.as_deref(),
            Site::MubarekTpp => self.mubarek_tpp.as_deref(),
        }
    }
}

impl Config {
    /// Load configuration from `gridgate.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gridgate.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GRIDGATE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GRIDGATE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GRIDGATE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("GRIDGATE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(secs) = var("GRIDGATE_BACKEND_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.backend.timeout_secs = secs;
        }
        if let Some(port) = var("GRIDGATE_BACKEND_PORT").and_then(|val| val.parse().ok()) {
            self.backend.port = port;
        }
        for site in Site::ALL {
            if let Some(val) = var(site.as_str()) {
                *self.sites.slot(site) = Some(val);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.backend.port == 0 {
            return Err(ConfigError::Validation(
                "backend port must be non-zero".to_string(),
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Build the address registry from the configured sites.
    #[must_use]
    pub fn registry(&self) -> AddressRegistry {
        AddressRegistry::from_lookup(|site| self.sites.get(site).map(str::to_owned))
            .with_port(self.backend.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gridgate=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            port: BACKEND_PORT,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
