//! ---
//! svc_section: "03-cli"
//! svc_subsection: "binary"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Control CLI for inspecting and validating service versions."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use svcver_common::config::AppConfig;
use svcver_common::logging::init_tracing;
use svcver_versioning::{BuildMetadata, DynamicVersionStore, Info, VersionArgs};
use tracing::{debug, warn};

mod inspect;

const DEFAULT_CONFIG: &str = "svcver.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Service version inspection utility",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Apply a runtime version override before running the command"
    )]
    override_version: Option<String>,

    #[command(flatten)]
    version: VersionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Print the aggregated version record")]
    Show(inspect::ShowArgs),
    #[command(about = "Validate a candidate override against the build version")]
    Check(inspect::CheckArgs),
    #[command(about = "Compare two semantic versions")]
    Compare(inspect::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppConfig::load_explicit(path)?,
        None => AppConfig::load_with_source(&[PathBuf::from(DEFAULT_CONFIG)])?,
    };
    let config = loaded.config;

    let build = resolve_build(&config);
    init_tracing(&build.service_name, &config.logging)?;
    debug!(source = ?loaded.source, service = %build.service_name, "configuration loaded");

    let store = build.default_store();
    let overrides = apply_overrides(&store, &config, cli.override_version.as_deref());

    // Version reporting must succeed even when an override is rejected.
    if let Some(mode) = cli.version.requested() {
        if let Err(err) = &overrides {
            let reason = format!("{err:#}");
            warn!(error = %reason, "version override ignored");
        }
        println!("{}", mode.render(&Info::collect(&build, &store))?);
        return Ok(());
    }
    overrides?;
    let info = Info::collect(&build, &store);

    match cli.command {
        Some(Commands::Show(args)) => inspect::show(&info, &args)?,
        Some(Commands::Check(args)) => inspect::check(&store, &args)?,
        Some(Commands::Compare(args)) => inspect::compare(&args)?,
        None => inspect::show(&info, &inspect::ShowArgs::default())?,
    }
    Ok(())
}

fn resolve_build(config: &AppConfig) -> BuildMetadata {
    let build = BuildMetadata::from_build_env();
    match &config.service.name {
        Some(name) => build.with_service_name(name.clone()),
        None if build.has_unknown_service() => build.with_service_name(env!("CARGO_PKG_NAME")),
        None => build,
    }
}

fn apply_overrides(
    store: &DynamicVersionStore,
    config: &AppConfig,
    cli_override: Option<&str>,
) -> Result<()> {
    if let Some(version) = config.service.version_override.as_deref() {
        store
            .set(version)
            .with_context(|| format!("configured version_override {version:?} rejected"))?;
    }
    if let Some(version) = cli_override {
        store
            .set(version)
            .with_context(|| format!("--override-version {version:?} rejected"))?;
    }
    Ok(())
}
