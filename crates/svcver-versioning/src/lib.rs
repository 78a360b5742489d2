//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Version metadata for services: a semantic version parser and comparator,
//! a validated runtime override store, build-time identifiers injected via
//! `vergen`, and the aggregated [`Info`] record with its renderings.

pub mod dynamic;
pub mod error;
pub mod flag;
pub mod info;
pub mod metadata;
pub mod semver;

pub use dynamic::{DynamicVersionStore, UNKNOWN_VERSION};
pub use error::{ParseError, ValidationError};
pub use flag::{VersionArgs, VersionMode};
pub use info::Info;
pub use metadata::{BuildMetadata, RuntimeInfo};
pub use semver::{SemanticVersion, VersionTriple};
