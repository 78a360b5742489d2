//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
//! Error types for version parsing and override validation.

use thiserror::Error;

use crate::semver::VersionTriple;

/// Failure to parse a semantic version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty after trimming whitespace.
    #[error("version string cannot be empty")]
    EmptyInput,
    /// The input does not follow `MAJOR.MINOR.PATCH[-PRERELEASE][+METADATA]`.
    #[error("invalid semantic version format: {0}")]
    InvalidFormat(String),
}

/// Failure to accept a runtime version override.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The override string was empty.
    #[error("version override cannot be empty")]
    EmptyVersion,
    /// The override is not a semantic version.
    #[error("invalid version override: {0}")]
    Parse(#[from] ParseError),
    /// The override names a different release than the reference version.
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Release triple of the reference version.
        expected: VersionTriple,
        /// Release triple of the rejected override.
        actual: VersionTriple,
    },
}
