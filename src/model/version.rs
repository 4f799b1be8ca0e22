use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Version string reported by crawlers when no version could be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

/// The set of raw version strings associated with one scanned file.
///
/// A `BTreeSet` collapses duplicates and iterates in lexical order, which
/// keeps report output deterministic. Lexical order misplaces multi-digit
/// components (`2.10.0` sorts before `2.9.0`) but is stable.
pub type Versions = BTreeSet<String>;

static LOG4J_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)\.([0-9]+)\.?([0-9]+)?(?:[./-].*)?$")
        .expect("log4j version pattern is a valid regex")
});

/// A parsed log4j version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Log4jVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Log4jVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a free-form version string.
    ///
    /// The string must start with `<major>.<minor>`, optionally followed by
    /// a patch number and then any suffix introduced by `.`, `/` or `-`
    /// (`2.14.1`, `2.0-beta9`, `2.12.4.redhat-00001`). A missing patch is
    /// treated as 0. Anything else returns `None`, as does a major or minor
    /// too large for a `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use log4scan::Log4jVersion;
    ///
    /// assert_eq!(Log4jVersion::parse("2.14.1"), Some(Log4jVersion::new(2, 14, 1)));
    /// assert_eq!(Log4jVersion::parse("2.0-beta9"), Some(Log4jVersion::new(2, 0, 0)));
    /// assert_eq!(Log4jVersion::parse("unknown"), None);
    /// ```
    pub fn parse(version: &str) -> Option<Self> {
        let captures = LOG4J_VERSION_REGEX.captures(version)?;
        let major = captures.get(1)?.as_str().parse().ok()?;
        let minor = captures.get(2)?.as_str().parse().ok()?;
        let patch = captures
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for Log4jVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Flat form of [`Log4jVersion::parse`]: `(major, minor, patch, ok)`.
///
/// All numeric fields are zero when `ok` is false.
pub fn parse_log4j_version(version: &str) -> (u64, u64, u64, bool) {
    match Log4jVersion::parse(version) {
        Some(v) => (v.major, v.minor, v.patch, true),
        None => (0, 0, 0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_version() {
        assert_eq!(parse_log4j_version("2.14.1"), (2, 14, 1, true));
        assert_eq!(parse_log4j_version("2.17.1"), (2, 17, 1, true));
    }

    #[test]
    fn test_parse_missing_patch_defaults_to_zero() {
        assert_eq!(parse_log4j_version("2.16"), (2, 16, 0, true));
        assert_eq!(parse_log4j_version("1.2"), (1, 2, 0, true));
    }

    #[test]
    fn test_parse_ignores_suffix() {
        assert_eq!(parse_log4j_version("2.0-beta9"), (2, 0, 0, true));
        assert_eq!(parse_log4j_version("2.0-RC1"), (2, 0, 0, true));
        assert_eq!(parse_log4j_version("2.12.4.redhat-00001"), (2, 12, 4, true));
        assert_eq!(parse_log4j_version("2.3.2/custom"), (2, 3, 2, true));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(parse_log4j_version(""), (0, 0, 0, false));
        assert_eq!(parse_log4j_version(UNKNOWN_VERSION), (0, 0, 0, false));
        assert_eq!(parse_log4j_version("v2.14.1"), (0, 0, 0, false));
        assert_eq!(parse_log4j_version("2"), (0, 0, 0, false));
        assert_eq!(parse_log4j_version("x.14.1"), (0, 0, 0, false));
        assert_eq!(parse_log4j_version("2.x"), (0, 0, 0, false));
    }

    #[test]
    fn test_parse_backtracks_into_suffix() {
        // "1 final" cannot follow the patch group, so ".1 final" becomes the suffix
        assert_eq!(parse_log4j_version("2.14.1 final"), (2, 14, 0, true));
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        assert_eq!(parse_log4j_version("２.１４.１"), (0, 0, 0, false));
    }

    #[test]
    fn test_parse_components_past_u32() {
        assert_eq!(parse_log4j_version("99999999999.1.1"), (99_999_999_999, 1, 1, true));
        assert_eq!(parse_log4j_version("4294967296.0"), (4_294_967_296, 0, 0, true));
        assert_eq!(parse_log4j_version("2.17.4294967296"), (2, 17, 4_294_967_296, true));
    }

    #[test]
    fn test_parse_major_overflow_is_unparseable() {
        assert_eq!(parse_log4j_version("18446744073709551616.1.1"), (0, 0, 0, false));
    }

    #[test]
    fn test_display() {
        assert_eq!(Log4jVersion::new(2, 12, 4).to_string(), "2.12.4");
    }

    proptest! {
        #[test]
        fn prop_three_part_versions_parse(major in 0u64..10_000, minor in 0u64..10_000, patch in 0u64..10_000) {
            let s = format!("{major}.{minor}.{patch}");
            prop_assert_eq!(parse_log4j_version(&s), (major, minor, patch, true));
        }

        #[test]
        fn prop_two_part_versions_default_patch(major in 0u64..10_000, minor in 0u64..10_000) {
            let s = format!("{major}.{minor}");
            prop_assert_eq!(parse_log4j_version(&s), (major, minor, 0, true));
        }

        #[test]
        fn prop_dash_suffix_is_ignored(major in 0u64..100, minor in 0u64..100, patch in 0u64..100, suffix in "[a-zA-Z0-9]{1,8}") {
            let s = format!("{major}.{minor}.{patch}-{suffix}");
            prop_assert_eq!(parse_log4j_version(&s), (major, minor, patch, true));
        }

        #[test]
        fn prop_alphabetic_major_never_parses(prefix in "[a-zA-Z]{1,6}", rest in "[0-9.]{0,8}") {
            let s = format!("{prefix}{rest}");
            prop_assert!(!parse_log4j_version(&s).3);
        }
    }
}
