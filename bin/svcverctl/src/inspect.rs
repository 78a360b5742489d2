//! ---
//! svc_section: "03-cli"
//! svc_subsection: "binary"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Control CLI for inspecting and validating service versions."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use svcver_versioning::{DynamicVersionStore, Info, SemanticVersion};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Short,
}

#[derive(Debug, Default, Args)]
pub struct ShowArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(value_name = "CANDIDATE", help = "Version override to validate")]
    pub candidate: String,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[arg(value_name = "LEFT")]
    pub left: String,
    #[arg(value_name = "RIGHT")]
    pub right: String,
}

pub fn show(info: &Info, args: &ShowArgs) -> Result<()> {
    let rendered = match args.format {
        OutputFormat::Text => info.text(),
        OutputFormat::Json => info.to_json()?,
        OutputFormat::Yaml => info.to_yaml()?,
        OutputFormat::Short => info.to_string(),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

pub fn check(store: &DynamicVersionStore, args: &CheckArgs) -> Result<()> {
    let accepted = store.validate(&args.candidate).with_context(|| {
        format!(
            "{:?} is not a valid override for {}",
            args.candidate,
            store.reference()
        )
    })?;
    info!(candidate = %accepted, reference = store.reference(), "override check passed");
    println!(
        "ok: {} is a valid override for {}",
        accepted.original(),
        store.reference()
    );
    Ok(())
}

pub fn compare(args: &CompareArgs) -> Result<()> {
    let left = SemanticVersion::parse(&args.left)
        .with_context(|| format!("left operand {:?}", args.left))?;
    let right = SemanticVersion::parse(&args.right)
        .with_context(|| format!("right operand {:?}", args.right))?;
    let symbol = match left.compare(&right) {
        -1 => "<",
        0 => "=",
        _ => ">",
    };
    println!("{} {} {}", left.original(), symbol, right.original());
    println!("compatible: {}", left.compatible_with(&right));
    println!(
        "prerelease: {}={}, {}={}",
        left.original(),
        left.is_prerelease(),
        right.original(),
        right.is_prerelease()
    );
    Ok(())
}
