//! ---
//! svc_section: "01-versioning"
//! svc_subsection: "module"
//! svc_type: "source"
//! svc_scope: "code"
//! svc_description: "Version metadata, semantic versions, and runtime overrides."
//! svc_version: "v0.1.0"
//! svc_owner: "tbd"
//! ---
//! Semantic version parsing and ordering.
//!
//! Accepts `MAJOR.MINOR.PATCH[-PRERELEASE][+METADATA]` with an optional
//! leading `v`. Prerelease strings are ordered lexicographically as a whole
//! rather than identifier by identifier.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// The `MAJOR.MINOR.PATCH` release component of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    /// Major version.
    pub major: u64,
    /// Minor version.
    pub minor: u64,
    /// Patch version.
    pub patch: u64,
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A parsed semantic version.
///
/// Equality and ordering ignore build metadata, so `1.2.3+a == 1.2.3+b`.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: String,
    metadata: String,
    original: String,
}

impl SemanticVersion {
    /// Parse a version string, trimming surrounding whitespace first.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let invalid = || ParseError::InvalidFormat(trimmed.to_owned());

        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (body, metadata) = match body.split_once('+') {
            Some((head, metadata)) => (head, Some(metadata)),
            None => (body, None),
        };
        // The release triple never contains '-', so the first one opens the prerelease.
        let (release, prerelease) = match body.split_once('-') {
            Some((head, prerelease)) => (head, Some(prerelease)),
            None => (body, None),
        };

        let mut numbers = release.split('.').map(parse_numeric);
        let (Some(Some(major)), Some(Some(minor)), Some(Some(patch)), None) = (
            numbers.next(),
            numbers.next(),
            numbers.next(),
            numbers.next(),
        ) else {
            return Err(invalid());
        };

        let prerelease = match prerelease {
            Some(value) if is_identifier_list(value) => value.to_owned(),
            Some(_) => return Err(invalid()),
            None => String::new(),
        };
        let metadata = match metadata {
            Some(value) if is_identifier_list(value) => value.to_owned(),
            Some(_) => return Err(invalid()),
            None => String::new(),
        };

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            metadata,
            original: trimmed.to_owned(),
        })
    }

    /// Major version.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor version.
    #[must_use]
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch version.
    #[must_use]
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Prerelease identifier, empty when absent.
    #[must_use]
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    /// Build metadata, empty when absent.
    #[must_use]
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// The trimmed input this version was parsed from.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Release triple without prerelease or metadata.
    #[must_use]
    pub fn triple(&self) -> VersionTriple {
        VersionTriple {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
        }
    }

    /// Tri-state comparison: `-1` when `self < other`, `0` when equal, `1` when greater.
    #[must_use]
    pub fn compare(&self, other: &Self) -> i8 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Whether both versions have the same precedence.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.compare(other) == 0
    }

    /// Whether `self` orders before `other`.
    #[must_use]
    pub fn less_than(&self, other: &Self) -> bool {
        self.compare(other) < 0
    }

    /// Whether `self` orders after `other`.
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.compare(other) > 0
    }

    /// True when a prerelease identifier is present.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// True when `self` is a safe upgrade from `reference`: same major line
    /// and not older.
    #[must_use]
    pub fn compatible_with(&self, reference: &Self) -> bool {
        self.major == reference.major && !self.less_than(reference)
    }
}

fn parse_numeric(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn is_identifier_list(value: &str) -> bool {
    value.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.metadata.is_empty() {
            write!(f, "+{}", self.metadata)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple()).then_with(|| {
            match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.prerelease.as_str().cmp(other.prerelease.as_str()),
            }
        })
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(input: &str) -> SemanticVersion {
        SemanticVersion::parse(input).expect("valid version")
    }

    #[test]
    fn parses_plain_release() {
        let version = v("1.2.3");
        assert_eq!(version.triple(), VersionTriple { major: 1, minor: 2, patch: 3 });
        assert_eq!(version.prerelease(), "");
        assert_eq!(version.metadata(), "");
        assert_eq!(version.original(), "1.2.3");
    }

    #[test]
    fn keeps_original_but_renders_canonical() {
        let version = v("  v1.2.3-alpha.1+build.123 ");
        assert_eq!(version.original(), "v1.2.3-alpha.1+build.123");
        assert_eq!(version.prerelease(), "alpha.1");
        assert_eq!(version.metadata(), "build.123");
        assert_eq!(version.to_string(), "1.2.3-alpha.1+build.123");
    }

    #[test]
    fn canonical_form_round_trips() {
        for input in [
            "0.0.0",
            "10.20.30",
            "1.2.3-rc-1",
            "1.2.3+sha.5114f85",
            "1.2.3-x.7.z.92+exp.sha.5114f85",
        ] {
            assert_eq!(v(input).to_string(), input);
            assert_eq!(v(&format!("v{input}")).to_string(), input);
        }
    }

    #[test]
    fn metadata_may_contain_hyphens() {
        let version = v("1.0.0+build-7");
        assert_eq!(version.prerelease(), "");
        assert_eq!(version.metadata(), "build-7");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(SemanticVersion::parse(""), Err(ParseError::EmptyInput));
        assert_eq!(SemanticVersion::parse("   \t"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for input in [
            "1.2",
            "1",
            "a.2.3",
            "1.b.3",
            "1.2.c",
            "1.2.3.4",
            "1..3",
            "V1.2.3",
            "vv1.2.3",
            "1.2.3-",
            "1.2.3+",
            "1.2.3-alpha..1",
            "1.2.3-al_pha",
            "1.2.3+build+again",
            "1.2.3 beta",
            "+1.2.3",
            "18446744073709551616.0.0",
            "not-a-version",
        ] {
            match SemanticVersion::parse(input) {
                Err(ParseError::InvalidFormat(echo)) => assert_eq!(echo, input.trim()),
                other => panic!("{input:?} should be invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn accepts_leading_zeros_and_u64_max() {
        assert_eq!(v("01.002.0003").triple(), VersionTriple { major: 1, minor: 2, patch: 3 });
        assert_eq!(v("18446744073709551615.0.0").major(), u64::MAX);
    }

    #[test]
    fn ordering_examples() {
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.3.0") > v("1.2.9"));
        assert!(v("1.2.4") > v("1.2.3"));
        assert!(v("1.2.3") > v("1.2.3-alpha"));
        assert!(v("1.2.3-beta") > v("1.2.3-alpha"));
        assert_eq!(v("1.2.3-beta").compare(&v("1.2.3-alpha")), 1);
        assert_eq!(v("1.2.3").compare(&v("1.2.4")), -1);
    }

    #[test]
    fn prerelease_comparison_is_plain_lexicographic() {
        // Numeric identifiers are not compared numerically.
        assert!(v("1.0.0-alpha.10") < v("1.0.0-alpha.9"));
        assert!(v("1.0.0-rc.1") > v("1.0.0-beta.11"));
    }

    #[test]
    fn metadata_has_no_ordering_weight() {
        assert!(v("1.2.3+build.1").equal(&v("v1.2.3+build.2")));
        assert_eq!(v("1.2.3+zzz"), v("1.2.3"));
        assert!(!v("1.2.3+zzz").greater_than(&v("1.2.3")));
    }

    #[test]
    fn compare_is_a_total_order() {
        let mut versions: Vec<SemanticVersion> = [
            "1.2.3",
            "1.2.3-alpha",
            "1.2.3-beta",
            "0.9.9",
            "2.0.0-rc.1",
            "2.0.0",
            "1.2.3+meta",
            "1.10.0",
        ]
        .iter()
        .map(|s| v(s))
        .collect();
        for a in &versions {
            assert_eq!(a.compare(a), 0);
            for b in &versions {
                assert_eq!(a.compare(b), -b.compare(a));
                for c in &versions {
                    if a.less_than(b) && b.less_than(c) {
                        assert!(a.less_than(c));
                    }
                }
            }
        }
        versions.sort();
        let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(sorted.first().map(String::as_str), Some("0.9.9"));
        assert_eq!(sorted.last().map(String::as_str), Some("2.0.0"));
    }

    #[test]
    fn prerelease_flag_ignores_metadata() {
        assert!(!v("1.2.3").is_prerelease());
        assert!(v("1.2.3-alpha").is_prerelease());
        assert!(!v("1.2.3+build").is_prerelease());
    }

    #[test]
    fn compatibility_requires_same_major_and_not_older() {
        let reference = v("1.2.3");
        assert!(v("1.2.4").compatible_with(&reference));
        assert!(v("1.9.0").compatible_with(&reference));
        assert!(v("1.2.3").compatible_with(&reference));
        assert!(!v("2.0.0").compatible_with(&reference));
        assert!(!v("1.2.2").compatible_with(&reference));
        assert!(!v("1.2.3-alpha").compatible_with(&reference));
    }

    #[test]
    fn serde_uses_original_string() {
        let version = v("v1.4.0-rc.1");
        let json = serde_json::to_string(&version).expect("serialize");
        assert_eq!(json, "\"v1.4.0-rc.1\"");
        let back: SemanticVersion = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.original(), "v1.4.0-rc.1");
        assert!(serde_json::from_str::<SemanticVersion>("\"1.4\"").is_err());
    }
}
