//! ---
//! svc_section: "02-runtime-support"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Shared configuration and logging primitives."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for svcver binaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and defaults are in effect.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "SVCVER_CONFIG";

    /// Load configuration from disk, respecting the `SVCVER_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// A path named by `SVCVER_CONFIG` must exist. Otherwise the first existing
    /// candidate wins, and defaults apply when none exist.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        let inspected = candidates
            .iter()
            .map(|p| p.as_ref().display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        debug!(%inspected, "no configuration file found; using defaults");
        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Load exactly `path`; unlike candidates, a missing file is an error.
    pub fn load_explicit<P: AsRef<Path>>(path: P) -> Result<LoadedAppConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(anyhow!("config file {} does not exist", path.display()));
        }
        Ok(LoadedAppConfig {
            config: Self::from_path(path)?,
            source: Some(path.to_path_buf()),
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.service.validate()
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Service identity and version override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Replaces the build-time service name.
    #[serde(default)]
    pub name: Option<String>,
    /// Applied as a runtime version override at startup.
    #[serde(default)]
    pub version_override: Option<String>,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(anyhow!("service.name must not be blank"));
        }
        if matches!(&self.version_override, Some(version) if version.trim().is_empty()) {
            return Err(anyhow!("service.version_override must not be blank"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Daily rolling log files are written here when set.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: default_log_format(),
            file_prefix: None,
        }
    }
}
