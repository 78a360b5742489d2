//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dynamic::{DynamicVersionStore, UNKNOWN_VERSION};
use crate::metadata::{BuildMetadata, RuntimeInfo};

/// Aggregated build and runtime version record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Service name.
    pub service_name: String,
    /// Effective version: the runtime override if any, else the build-time version.
    pub git_version: String,
    /// Git commit hash.
    pub git_commit: String,
    /// Git branch name.
    pub git_branch: String,
    /// `clean`, `dirty`, or `unknown`.
    pub git_tree_state: String,
    /// Build timestamp, ISO-8601 UTC.
    pub build_date: String,
    /// rustc version used for the build.
    pub rust_version: String,
    /// Compiler identifier.
    pub compiler: String,
    /// `os/arch` pair.
    pub platform: String,
}

impl Info {
    /// Collect the record for the running binary.
    #[must_use]
    pub fn collect(build: &BuildMetadata, store: &DynamicVersionStore) -> Self {
        Self::assemble(build, &RuntimeInfo::current(), store)
    }

    /// Combine explicit build and runtime facts. Blank fields become `unknown`.
    #[must_use]
    pub fn assemble(
        build: &BuildMetadata,
        runtime: &RuntimeInfo,
        store: &DynamicVersionStore,
    ) -> Self {
        Self {
            service_name: or_unknown(&build.service_name),
            git_version: store.effective_version(),
            git_commit: or_unknown(&build.git_commit),
            git_branch: or_unknown(&build.git_branch),
            git_tree_state: or_unknown(&build.git_tree_state),
            build_date: or_unknown(&build.build_date),
            rust_version: or_unknown(&runtime.rust_version),
            compiler: or_unknown(&runtime.compiler),
            platform: or_unknown(&runtime.platform),
        }
    }

    /// Pretty-printed JSON with camelCase keys.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// YAML document with camelCase keys.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Human readable report, one labelled field per line with aligned values.
    #[must_use]
    pub fn text(&self) -> String {
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        rows.iter()
            .map(|(label, value)| format!("{label:<width$}  {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Service:", self.service_name.as_str()),
            ("Version:", self.git_version.as_str()),
            ("Git commit:", self.git_commit.as_str()),
            ("Git branch:", self.git_branch.as_str()),
            ("Git tree state:", self.git_tree_state.as_str()),
            ("Build date:", self.build_date.as_str()),
            ("Rust version:", self.rust_version.as_str()),
            ("Compiler:", self.compiler.as_str()),
            ("Platform:", self.platform.as_str()),
        ]
    }
}

/// The bare version string.
impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.git_version)
    }
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN_VERSION.to_owned()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> BuildMetadata {
        BuildMetadata {
            service_name: "inventory".to_owned(),
            git_version: "v1.4.0".to_owned(),
            git_commit: "abc12345".to_owned(),
            git_branch: "main".to_owned(),
            git_tree_state: "clean".to_owned(),
            build_date: "2024-03-01T08:15:30Z".to_owned(),
        }
    }

    fn runtime() -> RuntimeInfo {
        RuntimeInfo {
            rust_version: "1.82.0".to_owned(),
            compiler: "rustc (stable)".to_owned(),
            platform: "linux/x86_64".to_owned(),
        }
    }

    #[test]
    fn display_is_the_effective_version() {
        let build = build();
        let store = build.default_store();
        assert_eq!(Info::assemble(&build, &runtime(), &store).to_string(), "v1.4.0");
        store.set("v1.4.0-hotfix.1").expect("override accepted");
        assert_eq!(
            Info::assemble(&build, &runtime(), &store).to_string(),
            "v1.4.0-hotfix.1"
        );
    }

    #[test]
    fn blank_fields_degrade_to_unknown() {
        let mut build = build();
        build.git_branch = String::new();
        build.git_commit = "  ".to_owned();
        let info = Info::assemble(&build, &runtime(), &DynamicVersionStore::new(""));
        assert_eq!(info.git_branch, "unknown");
        assert_eq!(info.git_commit, "unknown");
        assert_eq!(info.git_version, "unknown");
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let build = build();
        let info = Info::assemble(&build, &runtime(), &build.default_store());
        let json = info.to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["serviceName"], "inventory");
        assert_eq!(value["gitVersion"], "v1.4.0");
        assert_eq!(value["gitTreeState"], "clean");
        assert_eq!(value["rustVersion"], "1.82.0");
        assert_eq!(value["platform"], "linux/x86_64");
        let back: Info = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, info);
    }

    #[test]
    fn yaml_contains_every_field() {
        let build = build();
        let yaml = Info::assemble(&build, &runtime(), &build.default_store())
            .to_yaml()
            .expect("serialize");
        for key in [
            "serviceName:",
            "gitVersion:",
            "gitCommit:",
            "gitBranch:",
            "gitTreeState:",
            "buildDate:",
            "rustVersion:",
            "compiler:",
            "platform:",
        ] {
            assert!(yaml.contains(key), "missing {key} in {yaml}");
        }
    }

    #[test]
    fn text_report_aligns_values() {
        let build = build();
        let text = Info::assemble(&build, &runtime(), &build.default_store()).text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Service:         inventory");
        assert_eq!(lines[4], "Git tree state:  clean");
        let column = "Git tree state:  ".len();
        for line in &lines {
            assert_ne!(line.as_bytes()[column], b' ', "misaligned line {line:?}");
            assert_eq!(line.as_bytes()[column - 1], b' ');
        }
    }
}
