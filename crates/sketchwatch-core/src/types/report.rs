//! The combined risk-signal record produced per target.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Marker string used for the cargo count when the target is not a cargo
/// package. Stable across serialization so old result files stay readable.
pub const CARGO_NOT_APPLICABLE: &str = "N/A";

/// Cargo-specific dependency count, or an explicit not-applicable marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CargoDependencies {
    /// The target's package manager is not cargo; the tool never ran
    NotApplicable,
    /// Tool-reported count, kept as a string (the tool may report ranges)
    Counted(String),
}

impl Serialize for CargoDependencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotApplicable => serializer.serialize_str(CARGO_NOT_APPLICABLE),
            Self::Counted(count) => serializer.serialize_str(count),
        }
    }
}

impl<'de> Deserialize<'de> for CargoDependencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct V;
        impl Visitor<'_> for V {
            type Value = CargoDependencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a dependency count string or \"{CARGO_NOT_APPLICABLE}\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == CARGO_NOT_APPLICABLE {
                    Ok(CargoDependencies::NotApplicable)
                } else {
                    Ok(CargoDependencies::Counted(v.to_string()))
                }
            }
        }
        deserializer.deserialize_str(V)
    }
}

impl fmt::Display for CargoDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => write!(f, "{CARGO_NOT_APPLICABLE}"),
            Self::Counted(count) => write!(f, "{count}"),
        }
    }
}

/// One audit outcome, one per [`Target`](super::Target), immutable once built.
///
/// Dependency and sketchy-file counts stay strings: the generic dependency
/// counter saturates the build count at the literal `100` ("at least"), and
/// the diff tool may answer with a descriptive string rather than a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Links back to the audited target
    pub repository_url: String,
    /// Commits landed by an untrusted actor on someone else's change
    pub commits_from_untrusted_maintainer: usize,
    /// Build-dependency count; `"100"` means "at least 100"
    pub build_dependencies: String,
    /// Package-dependency count
    pub package_dependencies: String,
    /// Reverse-dependency count
    pub package_reverse_dependencies: String,
    /// Cargo-specific count, or the explicit not-applicable marker
    pub cargo_dependencies: CargoDependencies,
    /// Sketchy files found in the working copy
    pub sketchy_files: String,
    /// Sketchy-file patterns matched inside `.gitignore`, when one exists.
    /// Serialized as explicit `null` for repos without a `.gitignore`.
    pub sketchy_files_in_gitignore: Option<String>,
    /// Sketchy file types found in the working copy
    pub sketchy_file_types: String,
    /// Files differing between the release tarball and the tagged tree
    pub differences_in_tarball: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cargo: CargoDependencies, gitignore: Option<String>) -> TargetReport {
        TargetReport {
            repository_url: "https://github.com/tukaani-project/xz.git".into(),
            commits_from_untrusted_maintainer: 3,
            build_dependencies: "100".into(),
            package_dependencies: "12".into(),
            package_reverse_dependencies: "2481".into(),
            cargo_dependencies: cargo,
            sketchy_files: "1".into(),
            sketchy_files_in_gitignore: gitignore,
            sketchy_file_types: "4".into(),
            differences_in_tarball: "2".into(),
        }
    }

    #[test]
    fn report_round_trips() {
        let report = sample(
            CargoDependencies::Counted("37".into()),
            Some("build-to-host.m4".into()),
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: TargetReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn not_applicable_round_trips_as_marker() {
        let report = sample(CargoDependencies::NotApplicable, None);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"cargo_dependencies\":\"N/A\""));
        let back: TargetReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cargo_dependencies, CargoDependencies::NotApplicable);
    }

    #[test]
    fn missing_gitignore_serializes_as_null() {
        let report = sample(CargoDependencies::NotApplicable, None);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"sketchy_files_in_gitignore\":null"));
    }
}
