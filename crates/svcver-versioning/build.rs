//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "build"
//! svc_type: "source"
//! svc_scope: "build"
//! svc_description: "Build script injecting git, build, and rustc identifiers."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing git checkouts must not break the build; the crate degrades to sentinels.
    EmitBuilder::builder()
        .all_build()
        .all_git()
        .git_describe(false, true, None)
        .all_rustc()
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SVCVER_SERVICE_NAME");
    println!("cargo:rerun-if-env-changed=SVCVER_GIT_VERSION");
    Ok(())
}
