//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::info::Info;

/// Output selected by `--version[=MODE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionMode {
    /// Bare version string.
    #[value(alias = "true")]
    Short,
    /// Full labelled report.
    #[value(alias = "detailed")]
    Raw,
    /// Machine readable JSON.
    Json,
}

impl VersionMode {
    /// Render `info` for this mode.
    pub fn render(self, info: &Info) -> Result<String> {
        Ok(match self {
            VersionMode::Short => info.to_string(),
            VersionMode::Raw => info.text(),
            VersionMode::Json => info.to_json()?,
        })
    }
}

/// Flattenable `--version[=MODE]` argument for clap parsers.
///
/// Parsers embedding this must not enable clap's built-in version flag.
#[derive(Debug, Clone, Default, Args)]
pub struct VersionArgs {
    /// Print version information and exit.
    #[arg(
        short = 'V',
        long = "version",
        value_enum,
        value_name = "MODE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "short",
        help = "Print version information (short, raw, json) and exit"
    )]
    pub version: Option<VersionMode>,
}

impl VersionArgs {
    /// The requested mode, `None` when the flag was absent.
    #[must_use]
    pub fn requested(&self) -> Option<VersionMode> {
        self.version
    }
}
