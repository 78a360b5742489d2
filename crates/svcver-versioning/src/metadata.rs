//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dynamic::{DynamicVersionStore, UNKNOWN_VERSION};

/// Value vergen emits when it cannot resolve a variable.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Build date reported when the build timestamp is missing or unreadable.
pub const DEFAULT_BUILD_DATE: &str = "1970-01-01T00:00:00Z";

/// Compile-time identifiers captured via `vergen` and `SVCVER_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
    /// Service name supplied at build time.
    pub service_name: String,
    /// Git tag or describe output, used as the default version.
    pub git_version: String,
    /// Git commit hash.
    pub git_commit: String,
    /// Git branch name.
    pub git_branch: String,
    /// `clean`, `dirty`, or `unknown`.
    pub git_tree_state: String,
    /// Build timestamp, ISO-8601 UTC.
    pub build_date: String,
}

impl BuildMetadata {
    /// Read the identifiers baked into this binary.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            service_name: build_value(option_env!("SVCVER_SERVICE_NAME"))
                .unwrap_or(UNKNOWN_VERSION)
                .to_owned(),
            git_version: build_value(option_env!("SVCVER_GIT_VERSION"))
                .or_else(|| build_value(option_env!("VERGEN_GIT_DESCRIBE")))
                .map(str::to_owned)
                .unwrap_or_else(|| format!("v{}", env!("CARGO_PKG_VERSION"))),
            git_commit: build_value(option_env!("VERGEN_GIT_SHA"))
                .unwrap_or(UNKNOWN_VERSION)
                .to_owned(),
            git_branch: build_value(option_env!("VERGEN_GIT_BRANCH"))
                .unwrap_or(UNKNOWN_VERSION)
                .to_owned(),
            git_tree_state: tree_state(build_value(option_env!("VERGEN_GIT_DIRTY"))).to_owned(),
            build_date: normalize_build_date(build_value(option_env!("VERGEN_BUILD_TIMESTAMP"))),
        }
    }

    /// Replace the service name, typically from configuration or the binary name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// True when no service name was supplied at build time.
    #[must_use]
    pub fn has_unknown_service(&self) -> bool {
        self.service_name == UNKNOWN_VERSION
    }

    /// A fresh override store whose reference is the build-time version.
    #[must_use]
    pub fn default_store(&self) -> DynamicVersionStore {
        DynamicVersionStore::new(self.git_version.clone())
    }
}

/// Facts about the toolchain and platform this binary targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    /// rustc semantic version.
    pub rust_version: String,
    /// Compiler identifier.
    pub compiler: String,
    /// `os/arch` pair.
    pub platform: String,
}

impl RuntimeInfo {
    /// Runtime facts for the current binary.
    #[must_use]
    pub fn current() -> Self {
        let compiler = match build_value(option_env!("VERGEN_RUSTC_CHANNEL")) {
            Some(channel) => format!("rustc ({channel})"),
            None => "rustc".to_owned(),
        };
        Self {
            rust_version: build_value(option_env!("VERGEN_RUSTC_SEMVER"))
                .unwrap_or(UNKNOWN_VERSION)
                .to_owned(),
            compiler,
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

fn build_value(value: Option<&'static str>) -> Option<&'static str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != VERGEN_PLACEHOLDER)
}

fn tree_state(dirty: Option<&str>) -> &'static str {
    match dirty {
        Some("true") => "dirty",
        Some("false") => "clean",
        _ => UNKNOWN_VERSION,
    }
}

fn normalize_build_date(raw: Option<&str>) -> String {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|timestamp| {
            timestamp
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string()
        })
        .unwrap_or_else(|| DEFAULT_BUILD_DATE.to_owned())
}
