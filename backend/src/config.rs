//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI arguments, `FOLIO_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;
use crate::telemetry::LogFormat;

/// Settings for the Folio backend core and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOLIO")]
pub struct FolioSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Largest number of pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections kept open.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connect_timeout_secs: u64,
    /// `json` or `pretty`.
    pub log_format: Option<String>,
    /// Export mutation counters to Prometheus.
    pub metrics_enabled: Option<bool>,
}

/// Raised when settings cannot drive the requested adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("FOLIO_DATABASE_URL is not set")]
    MissingDatabaseUrl,
    /// The log format is neither `json` nor `pretty`.
    #[error("unknown log format `{value}`; expected `json` or `pretty`")]
    UnknownLogFormat { value: String },
}

impl FolioSettings {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when it is unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool configuration derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size)
            .with_min_idle(Some(self.pool_min_idle))
            .with_connection_timeout(Duration::from_secs(self.connect_timeout_secs)))
    }

    /// Whether mutation counters are exported, off unless configured.
    #[must_use]
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled.unwrap_or(false)
    }

    /// Log output format, JSON unless configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownLogFormat`] for unrecognised values.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        match self.log_format.as_deref().map(str::trim) {
            None | Some("") => Ok(LogFormat::Json),
            Some(value) => value.parse(),
        }
    }
}
