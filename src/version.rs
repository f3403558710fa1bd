//! Schema version identifiers.
//!
//! Every ordering and filtering decision in the migration system goes through
//! [`SchemaVersion`] rather than string comparison, so `1.10.0` sorts after
//! `1.9.0`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::MigrationError;

/// Exact three-segment grammar. Pre-release and build metadata are rejected.
static VERSION_GRAMMAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

/// A schema version in strict `MAJOR.MINOR.PATCH` form.
///
/// Ordered numerically per segment. Values that semver would accept but the
/// migration filename grammar does not (`1.0.0-alpha`, `1.0.0+build`) fail to
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(Version);

impl SchemaVersion {
    /// Parse a version string, returning `None` when it does not match the
    /// `\d+.\d+.\d+` grammar exactly.
    pub fn parse(input: &str) -> Option<Self> {
        if !VERSION_GRAMMAR.is_match(input) {
            return None;
        }
        Version::parse(input).ok().map(SchemaVersion)
    }

    /// Build a version from its numeric segments.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SchemaVersion(Version::new(major, minor, patch))
    }

    /// The baseline version recorded for an installation that predates the
    /// migration system.
    pub fn baseline() -> Self {
        SchemaVersion::new(1, 0, 0)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SchemaVersion {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaVersion::parse(s)
            .ok_or_else(|| MigrationError::Version(format!("invalid schema version '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_three_segment_versions() {
        assert_eq!(SchemaVersion::parse("1.0.0"), Some(SchemaVersion::new(1, 0, 0)));
        assert_eq!(SchemaVersion::parse("0.12.345"), Some(SchemaVersion::new(0, 12, 345)));
    }

    #[test]
    fn rejects_anything_outside_the_grammar() {
        assert!(SchemaVersion::parse("1.0").is_none());
        assert!(SchemaVersion::parse("v1.0.0").is_none());
        assert!(SchemaVersion::parse("1.0.0.0").is_none());
        assert!(SchemaVersion::parse("1.0.0-alpha").is_none());
        assert!(SchemaVersion::parse("1.0.0+build.5").is_none());
        assert!(SchemaVersion::parse("").is_none());
    }

    #[test]
    fn orders_numerically_per_segment() {
        let v = |s: &str| SchemaVersion::parse(s).unwrap();
        assert!(v("1.9.0") < v("1.10.0"));
        assert!(v("2.0.0") > v("1.99.99"));
        assert!(v("1.2.3") == v("1.2.3"));
        assert!(v("1.0.1") <= v("1.0.1"));
        assert!(v("1.0.2") >= v("1.0.1"));
    }

    #[test]
    fn displays_the_original_form() {
        let version: SchemaVersion = "3.14.159".parse().unwrap();
        assert_eq!(version.to_string(), "3.14.159");
    }

    #[test]
    fn from_str_reports_the_offending_input() {
        let err = "not-a-version".parse::<SchemaVersion>().unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }
}
