//! ---
//! svc_section: "02-runtime-support"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Shared configuration and logging primitives."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
//! Shared primitives for svcver binaries: TOML configuration loading and
//! tracing initialisation.

pub mod config;
pub mod logging;

pub use config::{AppConfig, LoadedAppConfig, LoggingConfig, ServiceConfig};
pub use logging::{init_tracing, LogFormat};
