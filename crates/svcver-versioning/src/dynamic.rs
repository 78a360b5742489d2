//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::semver::SemanticVersion;

/// Sentinel reported when neither an override nor a default version exists.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Holds at most one runtime version override on top of a static reference version.
///
/// Overrides must name the same `MAJOR.MINOR.PATCH` release as the reference;
/// only prerelease and metadata may differ. The last successful [`set`](Self::set)
/// wins. Share it as `Arc<DynamicVersionStore>` across threads.
#[derive(Debug)]
pub struct DynamicVersionStore {
    reference: String,
    current: RwLock<Option<Arc<str>>>,
}

impl DynamicVersionStore {
    /// Create an unset store falling back to `reference`, trimmed.
    pub fn new(reference: impl Into<String>) -> Self {
        let reference: String = reference.into();
        Self {
            reference: reference.trim().to_owned(),
            current: RwLock::new(None),
        }
    }

    /// Statically configured default version.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Validate `candidate` without storing it.
    ///
    /// When the reference itself is not a semantic version (for example an
    /// unexpanded build placeholder) the release triple check is skipped.
    pub fn validate(&self, candidate: &str) -> Result<SemanticVersion, ValidationError> {
        if candidate.is_empty() {
            return Err(ValidationError::EmptyVersion);
        }
        let parsed = SemanticVersion::parse(candidate)?;
        match SemanticVersion::parse(&self.reference) {
            Ok(reference) if reference.triple() != parsed.triple() => {
                return Err(ValidationError::VersionMismatch {
                    expected: reference.triple(),
                    actual: parsed.triple(),
                });
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    reference = %self.reference,
                    error = %err,
                    "reference version is not semantic; skipping release check"
                );
            }
        }
        debug!(candidate = %parsed, "version override validated");
        Ok(parsed)
    }

    /// Validate and store `candidate` as the current override.
    ///
    /// On error the previous state is left untouched.
    pub fn set(&self, candidate: &str) -> Result<(), ValidationError> {
        let parsed = self.validate(candidate).map_err(|err| {
            warn!(candidate, error = %err, "version override rejected");
            err
        })?;
        let value: Arc<str> = Arc::from(parsed.original());
        let previous = self.current.write().replace(value);
        info!(
            version = parsed.original(),
            previous = previous.as_deref().unwrap_or(""),
            "version override applied"
        );
        Ok(())
    }

    /// The stored override, if any.
    #[must_use]
    pub fn current_override(&self) -> Option<String> {
        self.current.read().as_deref().map(str::to_owned)
    }

    /// Drop the override so queries fall back to the reference again.
    pub fn clear(&self) {
        let previous = self.current.write().take();
        if let Some(previous) = previous {
            debug!(previous = %previous, "version override cleared");
        }
    }

    /// Override if set, otherwise the reference, otherwise [`UNKNOWN_VERSION`].
    #[must_use]
    pub fn effective_version(&self) -> String {
        if let Some(current) = self.current_override() {
            return current;
        }
        if self.reference.is_empty() {
            UNKNOWN_VERSION.to_owned()
        } else {
            self.reference.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::semver::VersionTriple;

    #[test]
    fn unset_store_reports_reference() {
        let store = DynamicVersionStore::new("v1.4.0");
        assert_eq!(store.current_override(), None);
        assert_eq!(store.effective_version(), "v1.4.0");
    }

    #[test]
    fn empty_reference_falls_back_to_sentinel() {
        let store = DynamicVersionStore::new("");
        assert_eq!(store.effective_version(), UNKNOWN_VERSION);
    }

    #[test]
    fn reference_is_trimmed_once() {
        let store = DynamicVersionStore::new("  v1.4.0 \n");
        assert_eq!(store.reference(), "v1.4.0");
        assert_eq!(store.effective_version(), "v1.4.0");
        assert_eq!(DynamicVersionStore::new(" \t ").effective_version(), UNKNOWN_VERSION);
    }

    #[test]
    fn empty_candidate_is_rejected() {
        let store = DynamicVersionStore::new("1.4.0");
        assert_eq!(store.set(""), Err(ValidationError::EmptyVersion));
    }

    #[test]
    fn whitespace_candidate_reports_parse_failure() {
        let store = DynamicVersionStore::new("1.4.0");
        assert_eq!(
            store.set("  "),
            Err(ValidationError::Parse(ParseError::EmptyInput))
        );
    }

    #[test]
    fn malformed_candidate_is_rejected() {
        let store = DynamicVersionStore::new("1.4.0");
        assert_eq!(
            store.set("not-a-version"),
            Err(ValidationError::Parse(ParseError::InvalidFormat(
                "not-a-version".to_owned()
            )))
        );
    }

    #[test]
    fn mismatched_release_is_rejected_with_both_triples() {
        let store = DynamicVersionStore::new("v1.4.0");
        let err = store.set("1.5.0").expect_err("minor bump must fail");
        assert_eq!(
            err,
            ValidationError::VersionMismatch {
                expected: VersionTriple { major: 1, minor: 4, patch: 0 },
                actual: VersionTriple { major: 1, minor: 5, patch: 0 },
            }
        );
        let message = err.to_string();
        assert!(message.contains("1.4.0"));
        assert!(message.contains("1.5.0"));
    }

    #[test]
    fn triple_check_is_stricter_than_compatibility() {
        let store = DynamicVersionStore::new("1.2.3");
        let candidate = SemanticVersion::parse("1.2.4").expect("valid");
        let reference = SemanticVersion::parse("1.2.3").expect("valid");
        assert!(candidate.compatible_with(&reference));
        assert!(store.set("1.2.4").is_err());
    }

    #[test]
    fn accepted_override_is_visible_immediately() {
        let store = DynamicVersionStore::new("v1.4.0");
        store.set(" v1.4.0-hotfix.1 ").expect("override accepted");
        assert_eq!(store.effective_version(), "v1.4.0-hotfix.1");
        store.set("1.4.0+build.9").expect("override accepted");
        assert_eq!(store.effective_version(), "1.4.0+build.9");
    }

    #[test]
    fn rejected_override_keeps_previous_value() {
        let store = DynamicVersionStore::new("1.4.0");
        store.set("1.4.0-rc.1").expect("override accepted");
        assert!(store.set("2.0.0").is_err());
        assert!(store.set("").is_err());
        assert_eq!(store.effective_version(), "1.4.0-rc.1");
    }

    #[test]
    fn unparsable_reference_skips_release_check() {
        let store = DynamicVersionStore::new("v0.0.0-master+$Format:%h$");
        store.set("3.1.4").expect("release check skipped");
        assert_eq!(store.effective_version(), "3.1.4");
        assert!(store.set("garbage").is_err());
    }

    #[test]
    fn clear_restores_reference() {
        let store = DynamicVersionStore::new("1.4.0");
        store.set("1.4.0-beta").expect("override accepted");
        store.clear();
        assert_eq!(store.effective_version(), "1.4.0");
    }
}
